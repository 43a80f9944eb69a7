//! Fresh git history for a generated project

use crate::runtime::{CommandRunner, Invocation, RunError};
use std::path::Path;
use thiserror::Error;

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

#[derive(Debug, Error)]
pub enum VcsError {
    #[error(transparent)]
    Command(#[from] RunError),

    /// A git step exited non-zero; later steps were not run
    #[error("'{command}' failed: {diagnostic}")]
    Step { command: String, diagnostic: String },
}

/// Runs `git init`, `git add .` and the initial commit in order
pub struct VersionControlInitializer<'a, R> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> VersionControlInitializer<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    fn steps() -> [Invocation; 3] {
        [
            Invocation::new("git", ["init"]),
            Invocation::new("git", ["add", "."]),
            Invocation::new("git", ["commit", "-m", INITIAL_COMMIT_MESSAGE]),
        ]
    }

    pub async fn init(&self, project_dir: &Path) -> Result<(), VcsError> {
        for step in Self::steps() {
            let output = self.runner.run(&step, Some(project_dir), None).await?;
            if !output.success() {
                return Err(VcsError::Step {
                    command: step.command_line(),
                    diagnostic: output.diagnostic().to_string(),
                });
            }
        }
        Ok(())
    }
}
