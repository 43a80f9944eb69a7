//! cliclack-backed [`Reporter`]

use crate::report::{Reporter, Stage};

/// Renders progress as cliclack log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalReporter;

// A failed terminal write is not worth aborting a scaffold over
impl Reporter for TerminalReporter {
    fn stage(&self, stage: &Stage) {
        let _ = cliclack::log::step(stage.to_string());
    }

    fn info(&self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn warning(&self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn success(&self, message: &str) {
        let _ = cliclack::log::success(message);
    }
}
