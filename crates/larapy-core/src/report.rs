//! Progress reporting
//!
//! Components never print directly. They are handed a [`Reporter`] and
//! describe what they are doing through it, so the terminal front end and
//! tests can render (or record) the same sequence of events.

use crate::templates::Template;
use std::fmt;

/// Named steps of project creation, in the order they run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Cloning { template: Template },
    RemovingHistory,
    ConfiguringEnvironment,
    InstallingDependencies { python: String },
    GeneratingKey,
    InitializingGit,
    Finalizing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Cloning { template } => write!(f, "Cloning {} template...", template),
            Stage::RemovingHistory => f.write_str("Removing .git directory..."),
            Stage::ConfiguringEnvironment => f.write_str("Configuring environment..."),
            Stage::InstallingDependencies { python } => {
                write!(f, "Installing dependencies (Python {})...", python)
            }
            Stage::GeneratingKey => f.write_str("Generating application key..."),
            Stage::InitializingGit => f.write_str("Initializing git repository..."),
            Stage::Finalizing => f.write_str("Finalizing setup..."),
        }
    }
}

/// Output sink for progress and diagnostics
pub trait Reporter {
    /// A new step is starting
    fn stage(&self, stage: &Stage);

    fn info(&self, message: &str);

    /// Something went wrong but creation continues
    fn warning(&self, message: &str);

    fn success(&self, message: &str);
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn stage(&self, _stage: &Stage) {}
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
}
