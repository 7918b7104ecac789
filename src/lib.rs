//! The check_prometheus crate runs one Prometheus instant query and turns the returned samples
//! into a nagios/icinga service state.
//!
//! The flow is linear: build the query URL from a [Config], fetch it once through a
//! [QueryClient], decode the [QueryResponse], fold every sample through the [Thresholds] and
//! report the worst [ServiceState] via its exit code.
//!
//! ```rust
//! # use check_prometheus::{ServiceState, Thresholds, TriggerIfValue};
//! let thresholds = Thresholds::new(3.0, 10.0, TriggerIfValue::GreaterOrEqual);
//! assert_eq!(thresholds.state_for(5.0), ServiceState::Warning);
//! assert_eq!(thresholds.state_for(12.0), ServiceState::Critical);
//! assert_eq!(ServiceState::Critical.exit_code(), 2);
//! ```

use std::cmp::Ordering;
use std::fmt;

pub mod check;
pub mod client;
pub mod config;
pub mod config_generator;
mod error;
pub mod query_url;
pub mod response;
mod runner;
pub mod thresholds;

pub use crate::check::{run, Evaluation, Finding};
pub use crate::client::{HttpClient, QueryClient};
pub use crate::config::{Cli, Config};
pub use crate::error::CheckError;
pub use crate::query_url::build_query_url;
pub use crate::response::{Labels, QueryResponse, Sample};
pub use crate::runner::{safe_run, Runner, RunnerResult};
pub use crate::thresholds::{Thresholds, TriggerIfValue};

/// Represents a service state from nagios.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServiceState {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    /// Returns the corresponding nagios exit code to signal the service state of self.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }

    /// Severity rank used for escalation. Evaluations never produce Unknown; it ranks above
    /// Critical.
    fn rank(&self) -> u8 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

impl PartialOrd for ServiceState {
    fn partial_cmp(&self, other: &ServiceState) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ServiceState {
    fn cmp(&self, other: &ServiceState) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}
