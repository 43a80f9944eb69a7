//! Scripted [`CommandRunner`] for unit tests

use super::runner::{CommandOutput, CommandRunner, Invocation, RunError};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Canned result for commands whose line starts with a given prefix
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Exit { code: i32, stderr: String },
    TimedOut,
    Missing,
}

/// A command the fake was asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub command_line: String,
    pub workdir: Option<PathBuf>,
    pub limit: Option<Duration>,
}

/// Succeeds for everything unless scripted otherwise
///
/// A successful `git clone` materializes the destination directory with a
/// `.git/` folder and the configured template files.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    calls: Mutex<Vec<Call>>,
    replies: Vec<(String, Reply)>,
    template_files: Vec<(String, String)>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_template_file(mut self, path: &str, content: &str) -> Self {
        self.template_files
            .push((path.to_string(), content.to_string()));
        self
    }

    pub(crate) fn reply(mut self, prefix: &str, reply: Reply) -> Self {
        self.replies.push((prefix.to_string(), reply));
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command_line).collect()
    }

    fn materialize_clone(&self, invocation: &Invocation) -> io::Result<()> {
        let Some(dest) = invocation.args.last() else {
            return Ok(());
        };
        let dest = Path::new(dest);
        std::fs::create_dir_all(dest.join(".git"))?;
        std::fs::write(dest.join(".git").join("HEAD"), "ref: refs/heads/main\n")?;
        for (path, content) in &self.template_files {
            let target = dest.join(path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(target, content)?;
        }
        Ok(())
    }
}

impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        invocation: &Invocation,
        workdir: Option<&Path>,
        limit: Option<Duration>,
    ) -> Result<CommandOutput, RunError> {
        let command_line = invocation.command_line();
        self.calls.lock().unwrap().push(Call {
            command_line: command_line.clone(),
            workdir: workdir.map(Path::to_path_buf),
            limit,
        });

        let reply = self
            .replies
            .iter()
            .find(|(prefix, _)| command_line.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Exit { code, stderr }) => Ok(CommandOutput {
                code: Some(code),
                stdout: String::new(),
                stderr,
            }),
            Some(Reply::TimedOut) => Err(RunError::TimedOut {
                command: command_line,
                limit: limit.unwrap_or_default(),
            }),
            Some(Reply::Missing) => Err(RunError::Spawn {
                command: command_line,
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            }),
            None => {
                if invocation.program == "git"
                    && invocation.args.first().map(String::as_str) == Some("clone")
                {
                    self.materialize_clone(invocation)
                        .map_err(|source| RunError::Spawn {
                            command: command_line,
                            source,
                        })?;
                }
                Ok(CommandOutput {
                    code: Some(0),
                    ..CommandOutput::default()
                })
            }
        }
    }
}
