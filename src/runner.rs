use std::fmt::Display;

use crate::{Evaluation, ServiceState};

/// Runs a check and turns its error, if any, into a service state.
///
/// A check that fails to produce an [Evaluation] is reported as Unknown unless a different
/// mapping is given with [Runner::on_error].
pub struct Runner<E> {
    on_error: Option<Box<dyn FnOnce(&E) -> ServiceState>>,
}

impl<E: Display> Runner<E> {
    pub fn new() -> Self {
        Self { on_error: None }
    }

    pub fn on_error(mut self, f: impl FnOnce(&E) -> ServiceState + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Runs `f` and keeps either its evaluation or its error together with the state the
    /// error maps to.
    pub fn safe_run(self, f: impl FnOnce() -> Result<Evaluation, E>) -> RunnerResult<E> {
        match f() {
            Ok(evaluation) => RunnerResult::Ok(evaluation),
            Err(err) => {
                let state = self
                    .on_error
                    .map(|f| f(&err))
                    .unwrap_or(ServiceState::Unknown);

                RunnerResult::Err(state, err)
            }
        }
    }
}

impl<E: Display> Default for Runner<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `f` and reports every error with `error_state`.
pub fn safe_run<E: Display>(
    f: impl FnOnce() -> Result<Evaluation, E>,
    error_state: ServiceState,
) -> RunnerResult<E> {
    Runner::new().on_error(move |_| error_state).safe_run(f)
}

pub enum RunnerResult<E> {
    Ok(Evaluation),
    Err(ServiceState, E),
}

impl<E: Display> RunnerResult<E> {
    pub fn state(&self) -> ServiceState {
        match self {
            RunnerResult::Ok(evaluation) => evaluation.state(),
            RunnerResult::Err(state, _) => *state,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.state().exit_code()
    }

    pub fn to_plugin_output(&self) -> String {
        match self {
            RunnerResult::Ok(evaluation) => evaluation.to_plugin_output(),
            RunnerResult::Err(state, err) => format!("{}: {}", state, err),
        }
    }

    pub fn print_and_exit(self) -> ! {
        match &self {
            RunnerResult::Ok(evaluation) => evaluation.print_and_exit(),
            RunnerResult::Err(..) => {
                println!("{}", self.to_plugin_output());
                std::process::exit(self.exit_code());
            }
        }
    }
}
