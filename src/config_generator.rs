//! Generates an Icinga 2 `CheckCommand` object from the plugin's own command line definition.
//!
//! Set `GENERATE_ICINGA_COMMAND` and run the plugin to get a definition that can be dropped
//! into the Icinga configuration.

use std::fmt::Write;

/// Name of the environment variable that switches the binary into generator mode.
pub const GENERATE_ENV: &str = "GENERATE_ICINGA_COMMAND";

pub struct CheckCommand {
    name: String,
    arguments: Vec<CommandArgument>,
}

pub struct CommandArgument {
    flag: String,
    variable: String,
    description: Option<String>,
    is_flag: bool,
    default_value: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid executable path")]
    InvalidExecutablePath,
    #[error("argument '{0}' has no long flag")]
    MissingLongArgument(String),
}

impl CheckCommand {
    /// Reads the arguments of `cmd`. Custom variables are prefixed with `name` so they don't
    /// collide with Icinga's own `$host$` and friends.
    pub fn from_command(name: &str, cmd: &clap::Command) -> Result<Self, GenerateError> {
        let prefix = name.replace('-', "_");
        let mut arguments = Vec::new();

        for arg in cmd.get_arguments() {
            let id = arg.get_id().as_str();
            if id == "help" || id == "version" {
                continue;
            }

            let long = arg
                .get_long()
                .ok_or_else(|| GenerateError::MissingLongArgument(id.to_owned()))?;

            let is_flag = {
                let values = arg.get_possible_values();
                values.len() == 2
                    && values.iter().any(|v| v.get_name() == "true")
                    && values.iter().any(|v| v.get_name() == "false")
            };

            let default_value = arg
                .get_default_values()
                .first()
                .and_then(|v| v.to_str())
                .filter(|v| !v.is_empty() && !(is_flag && *v == "false"))
                .map(str::to_owned);

            arguments.push(CommandArgument {
                flag: format!("--{}", long),
                variable: format!("{}_{}", prefix, long.replace('-', "_")),
                description: arg.get_help().map(|s| s.to_string()),
                is_flag,
                default_value,
            });
        }

        Ok(CheckCommand {
            name: name.to_owned(),
            arguments,
        })
    }

    /// Renders the object definition with `executable` as the command.
    pub fn render(&self, executable: &str) -> String {
        let mut out = String::new();
        // Writing into a String can't fail.
        let _ = self.write_to(&mut out, executable);
        out
    }

    fn write_to(&self, out: &mut String, executable: &str) -> std::fmt::Result {
        writeln!(out, "object CheckCommand \"{}\" {{", escape_string(&self.name))?;
        writeln!(out, "  command = [ \"{}\" ]", escape_string(executable))?;
        writeln!(out)?;
        writeln!(out, "  arguments = {{")?;

        for arg in &self.arguments {
            writeln!(out, "    \"{}\" = {{", arg.flag)?;
            if arg.is_flag {
                writeln!(out, "      set_if = \"${}$\"", arg.variable)?;
            } else {
                writeln!(out, "      value = \"${}$\"", arg.variable)?;
            }
            if let Some(description) = &arg.description {
                writeln!(out, "      description = \"{}\"", escape_string(description))?;
            }
            writeln!(out, "    }}")?;
        }
        writeln!(out, "  }}")?;

        let defaults: Vec<_> = self
            .arguments
            .iter()
            .filter_map(|arg| arg.default_value.as_ref().map(|v| (&arg.variable, v)))
            .collect();
        if !defaults.is_empty() {
            writeln!(out)?;
            for (variable, value) in defaults {
                writeln!(out, "  vars.{} = \"{}\"", variable, escape_string(value))?;
            }
        }

        writeln!(out, "}}")
    }
}

fn escape_string(s: &str) -> String {
    ["\\", "\"", "$"]
        .iter()
        .fold(s.to_string(), |acc, c| acc.replace(c, &format!("\\{}", c)))
}

/// Prints the CheckCommand for `cmd` and exits if [GENERATE_ENV] is set, otherwise does nothing.
pub fn print_check_command_if_requested(
    name: &str,
    cmd: &clap::Command,
) -> Result<(), GenerateError> {
    if std::env::var_os(GENERATE_ENV).is_none() {
        return Ok(());
    }

    let executable = std::env::current_exe()?
        .to_str()
        .ok_or(GenerateError::InvalidExecutablePath)?
        .to_owned();
    let command = CheckCommand::from_command(name, cmd)?;

    println!("{}", command.render(&executable).trim());
    std::process::exit(0);
}
