//! External process execution
//!
//! This module provides:
//! - The [`CommandRunner`] capability used for git and pip
//! - A tokio-backed runner for real child processes

pub mod runner;

#[cfg(test)]
pub(crate) mod fake;

pub use runner::{CommandOutput, CommandRunner, Invocation, RunError, SystemRunner};
