//! Best-effort dependency installation
//!
//! Installation never aborts project creation. Every failure mode is turned
//! into an [`InstallOutcome::Warning`] that the caller reports and moves past.

use crate::runtime::{CommandRunner, Invocation, RunError};
use std::path::Path;
use std::time::Duration;

/// Timeout for installation (5 minutes)
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Result of an installation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Warning { message: String, detail: Option<String> },
}

/// Installs the project in editable mode with pip
pub struct DependencyInstaller<'a, R> {
    runner: &'a R,
    limit: Duration,
}

impl<'a, R: CommandRunner> DependencyInstaller<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self {
            runner,
            limit: INSTALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.limit = limit;
        self
    }

    pub fn invocation() -> Invocation {
        Invocation::new("pip", ["install", "-e", "."])
    }

    /// Install dependencies for a project targeting `python_version`
    pub async fn install(&self, project_dir: &Path, python_version: &str) -> InstallOutcome {
        let result = self
            .runner
            .run(&Self::invocation(), Some(project_dir), Some(self.limit))
            .await;

        match result {
            Ok(output) if output.success() => InstallOutcome::Installed,
            Ok(output) => InstallOutcome::Warning {
                message: format!(
                    "Failed to install dependencies (Python {})",
                    python_version
                ),
                detail: Some(output.diagnostic().to_string()).filter(|d| !d.is_empty()),
            },
            Err(RunError::TimedOut { .. }) => InstallOutcome::Warning {
                message: "Dependency installation timed out".to_string(),
                detail: None,
            },
            Err(e) => InstallOutcome::Warning {
                message: e.to_string(),
                detail: None,
            },
        }
    }
}
