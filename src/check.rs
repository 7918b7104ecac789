use std::fmt;
use std::process;

use crate::query_url::build_query_url;
use crate::response::{Labels, QueryResponse, Sample};
use crate::{CheckError, Config, QueryClient, ServiceState, Thresholds};

/// Runs the whole check: build the URL, fetch it once, decode the response and evaluate every
/// returned sample.
pub fn run<C>(config: &Config, client: &C) -> Result<Evaluation, CheckError>
where
    C: QueryClient + ?Sized,
{
    let url = build_query_url(config)?;
    let body = client.fetch(&url)?;
    let samples = QueryResponse::from_slice(&body)?.into_samples()?;

    Evaluation::from_samples(&samples, &config.thresholds)
}

/// A sample that crossed one of the thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub state: ServiceState,
    pub labels: Labels,
    pub threshold: f64,
    pub value: f64,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' value is {:.4} and got {:.4}",
            self.state, self.labels, self.threshold, self.value
        )
    }
}

/// Result of folding all samples of one response through the thresholds.
///
/// The state starts at Ok and only ever escalates, so it is the worst state of any sample.
/// Findings keep the order of the response.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    state: ServiceState,
    findings: Vec<Finding>,
}

impl Evaluation {
    /// Fails on the first sample whose value isn't a number; nothing is reported for the
    /// samples before it.
    pub fn from_samples(samples: &[Sample], thresholds: &Thresholds) -> Result<Self, CheckError> {
        let mut evaluation = Evaluation {
            state: ServiceState::Ok,
            findings: Vec::new(),
        };

        for sample in samples {
            let value = sample.parse_value()?;
            let state = thresholds.state_for(value);

            if let Some(threshold) = thresholds.threshold_for(state) {
                evaluation.findings.push(Finding {
                    state,
                    labels: sample.metric.clone(),
                    threshold,
                    value,
                });
            }
            evaluation.state = evaluation.state.max(state);
        }

        Ok(evaluation)
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }

    /// One line per finding, or a single OK line if there are none.
    pub fn to_plugin_output(&self) -> String {
        if self.findings.is_empty() {
            return "OK: All values OK!".to_owned();
        }

        self.findings
            .iter()
            .map(Finding::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prints Self::to_plugin_output and exits with the exit code of the evaluated state.
    pub fn print_and_exit(&self) -> ! {
        println!("{}", self.to_plugin_output());
        process::exit(self.exit_code());
    }
}
