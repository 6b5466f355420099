//! Child process adapter.

use std::path::Path;
use std::process::{Command, Stdio};

use honest_core::{
    application::{ApplicationError, ports::CommandRunner},
    error::HonestResult,
};
use tracing::{debug, instrument};

/// Runs programs with `std::process::Command`, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip(self, args), fields(args = ?args))]
    fn run(&self, program: &str, args: &[String], cwd: &Path, inherit_stdio: bool) -> HonestResult<()> {
        let mut command = Command::new(program);
        command.args(args).current_dir(cwd);
        if inherit_stdio {
            command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        } else {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }

        let display = std::iter::once(program)
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        let status = command.status().map_err(|e| ApplicationError::CommandFailed {
            command: display.clone(),
            reason: e.to_string(),
        })?;
        debug!(%status, "Command finished");

        if status.success() {
            Ok(())
        } else {
            Err(ApplicationError::CommandFailed {
                command: display,
                reason: match status.code() {
                    Some(code) => format!("exited with status {code}"),
                    None => "terminated by signal".into(),
                },
            }
            .into())
        }
    }
}
