//! External process execution
//!
//! Git and pip are never invoked directly by the scaffolding steps. They go
//! through a [`CommandRunner`], which lets tests substitute a scripted fake.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Space-joined form used in diagnostics
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Exit status and captured output of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Best diagnostic text: stderr, falling back to stdout
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// The process could not be run to completion
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' timed out after {} seconds", .limit.as_secs())]
    TimedOut { command: String, limit: Duration },
}

/// Capability to run an external command and capture its output
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `invocation` in `workdir` (or the current directory), killing it
    /// once `limit` elapses
    async fn run(
        &self,
        invocation: &Invocation,
        workdir: Option<&Path>,
        limit: Option<Duration>,
    ) -> Result<CommandOutput, RunError>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        workdir: Option<&Path>,
        limit: Option<Duration>,
    ) -> Result<CommandOutput, RunError> {
        let mut command = TokioCommand::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the wait future on timeout must not leave the child running
            .kill_on_drop(true);

        if let Some(dir) = workdir {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|source| RunError::Spawn {
            command: invocation.command_line(),
            source,
        })?;

        let waited = match limit {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(RunError::TimedOut {
                        command: invocation.command_line(),
                        limit,
                    })
                }
            },
            None => child.wait_with_output().await,
        };

        let output = waited.map_err(|source| RunError::Spawn {
            command: invocation.command_line(),
            source,
        })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
