//! Command line surface and the immutable configuration derived from it.

use std::ffi::OsString;

use clap::{ArgAction, Parser};

use crate::{Thresholds, TriggerIfValue};

/// Exit code for invalid invocations. It matches WARNING on purpose: existing command
/// definitions rely on it.
pub const USAGE_EXIT_CODE: i32 = 1;

/// Long flags that may also be given with a single dash, e.g. `-host=prometheus`.
const LONG_FLAGS: &[&str] = &[
    "host",
    "port",
    "auth-basic-user",
    "auth-basic-password",
    "ssl",
    "query",
    "critical",
    "warning",
    "lt",
];

#[derive(Debug, Parser)]
#[command(name = "check_prometheus", version)]
#[command(about = "Checks the result of a Prometheus instant query against thresholds")]
pub struct Cli {
    /// Prometheus server host
    #[arg(long, default_value = "", hide_default_value = true)]
    pub host: String,

    /// Prometheus server port
    #[arg(long, default_value = "9090")]
    pub port: String,

    /// Prometheus server basic auth user
    #[arg(long, default_value = "", hide_default_value = true)]
    pub auth_basic_user: String,

    /// Prometheus server basic auth password
    #[arg(long, default_value = "", hide_default_value = true)]
    pub auth_basic_password: String,

    /// Query the Prometheus server over HTTPS
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
          default_value = "false", default_missing_value = "true")]
    pub ssl: bool,

    /// Query that is executed in Prometheus
    #[arg(long, default_value = "", hide_default_value = true)]
    pub query: String,

    /// Critical if a value is greater than or equal to this
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub critical: f64,

    /// Warning if a value is greater than or equal to this
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub warning: f64,

    /// Compare with "less than" instead of "greater than or equal"
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
          default_value = "false", default_missing_value = "true")]
    pub lt: bool,
}

impl Cli {
    /// Parses the given arguments after rewriting single-dash long flags.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

/// Rewrites `-host` and `-host=value` to their `--` form. Anything else is kept as is.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let rewritten = arg.to_str().and_then(|s| {
                let rest = s.strip_prefix('-')?;
                if rest.starts_with('-') {
                    return None;
                }
                let name = rest.split('=').next().unwrap_or(rest);
                LONG_FLAGS.contains(&name).then(|| format!("-{}", s))
            });
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Everything a single check run needs. Built once at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub ssl: bool,
    pub credentials: Option<BasicAuth>,
    pub query: String,
    pub thresholds: Thresholds,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("You need to pass the prometheus query to execute")]
    MissingQuery,
    #[error("You need to pass the host")]
    MissingHost,
}

impl TryFrom<Cli> for Config {
    type Error = UsageError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.query.is_empty() {
            return Err(UsageError::MissingQuery);
        }
        if cli.host.is_empty() {
            return Err(UsageError::MissingHost);
        }

        // Credentials are only used as a pair.
        let credentials = if !cli.auth_basic_user.is_empty() && !cli.auth_basic_password.is_empty()
        {
            Some(BasicAuth {
                username: cli.auth_basic_user,
                password: cli.auth_basic_password,
            })
        } else {
            None
        };

        let trigger = if cli.lt {
            TriggerIfValue::Less
        } else {
            TriggerIfValue::GreaterOrEqual
        };

        Ok(Config {
            host: cli.host,
            port: cli.port,
            ssl: cli.ssl,
            credentials,
            query: cli.query,
            thresholds: Thresholds::new(cli.warning, cli.critical, trigger),
        })
    }
}
