use std::path::Path;
use std::process::{Command, Stdio};

/// What happened to a single spawned invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// The process ran to completion. `code` is `None` when killed by a signal.
    Exited { success: bool, code: Option<i32> },
    /// The process could not be started at all (missing executable, bad permissions).
    SpawnFailed { detail: String },
}

impl InvocationOutcome {
    pub fn is_failure(&self) -> bool {
        !matches!(self, InvocationOutcome::Exited { success: true, .. })
    }
}

/// Seam for running a language command against a benchmark file.
///
/// Implementations must block until the invocation is over; the runner times
/// the span of `execute`.
pub trait CommandExecutor {
    fn execute(&mut self, command: &str, target: &Path) -> InvocationOutcome;
}

/// Spawns real processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&mut self, command: &str, target: &Path) -> InvocationOutcome {
        let (program, leading_args) = match split_command(command) {
            Some(parts) => parts,
            None => {
                return InvocationOutcome::SpawnFailed {
                    detail: "empty command".to_string(),
                };
            }
        };

        let status = Command::new(program)
            .args(leading_args)
            .arg(target)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) => InvocationOutcome::Exited {
                success: status.success(),
                code: status.code(),
            },
            Err(err) => InvocationOutcome::SpawnFailed {
                detail: err.to_string(),
            },
        }
    }
}

/// Splits a command string into program and leading arguments on whitespace.
pub fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;
    Some((program, parts.collect()))
}
