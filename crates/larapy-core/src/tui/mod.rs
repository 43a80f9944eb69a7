//! Terminal output using cliclack (Charm-style inline logs)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod commands;
#[cfg(feature = "tui")]
mod reporter;

#[cfg(feature = "tui")]
pub use commands::{list_templates, list_versions, run_new, NewArgs};
#[cfg(feature = "tui")]
pub use reporter::TerminalReporter;
