//! `check_prometheus` -- nagios/icinga check for a Prometheus instant query.
//!
//! ```text
//! check_prometheus --host prometheus.local --query 'node_load1' --warning 4 --critical 8
//! ```
//!
//! Prints one line per sample that crossed a threshold (or a single OK line) and exits with
//! 0 (OK), 1 (WARNING), 2 (CRITICAL) or 3 (UNKNOWN, the check could not be evaluated).
//! Invalid invocations exit with 1.
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG` (default `warn`).

use clap::CommandFactory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use check_prometheus::config::USAGE_EXIT_CODE;
use check_prometheus::config_generator::print_check_command_if_requested;
use check_prometheus::{safe_run, Cli, Config, HttpClient, ServiceState};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = print_check_command_if_requested("check_prometheus", &Cli::command()) {
        println!("{}: {}", ServiceState::Unknown, e);
        std::process::exit(ServiceState::Unknown.exit_code());
    }

    let config = parse_config();

    safe_run(
        || {
            let client = HttpClient::new()?;
            check_prometheus::run(&config, &client)
        },
        ServiceState::Unknown,
    )
    .print_and_exit()
}

/// Parses and validates the command line, exiting with usage information on failure.
fn parse_config() -> Config {
    let cli = Cli::try_parse_normalized(std::env::args_os()).unwrap_or_else(|e| {
        let code = if e.use_stderr() { USAGE_EXIT_CODE } else { 0 };
        let _ = e.print();
        std::process::exit(code);
    });

    Config::try_from(cli).unwrap_or_else(|e| {
        println!("{}", e);
        println!("{}", Cli::command().render_help());
        std::process::exit(USAGE_EXIT_CODE);
    })
}
