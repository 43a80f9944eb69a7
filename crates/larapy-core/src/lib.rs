//! Larapy Core - project scaffolding for the Larapy installer
//!
//! This library turns a project name and a handful of options into a ready
//! to run application skeleton: it clones a template branch, derives the
//! project's `.env`, installs dependencies and optionally starts a git history.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name validation, template fetching, `.env`
//!   rewriting, key generation, dependency install, git init
//! - **Layer 2: Workflow Orchestration** - `ProjectCreator` sequencing the steps,
//!   `ProductConfig` for product identity, `Reporter` as the output sink
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based output (feature-gated)
//!
//! External programs (git, pip) are only reached through [`CommandRunner`].
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based terminal front end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use larapy_core::{ProjectCreator, ProjectRequest, SilentReporter, SystemRunner};
//!
//! let repository = TemplateRepository::from_config(&MyConfig)?;
//! let creator = ProjectCreator::new(SystemRunner, &SilentReporter, repository, cwd);
//! let created = creator.create(&ProjectRequest::new("blog-app")).await?;
//! ```

pub mod config;
pub mod create;
pub mod error;
pub mod install;
pub mod product;
pub mod project;
pub mod report;
pub mod runtime;
pub mod templates;
pub mod validation;
pub mod vcs;
pub mod versions;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use create::{CheckOrder, CreatedProject, ProjectCreator};
pub use error::CreateError;
pub use product::ProductConfig;
pub use project::{Database, ProjectRequest};
pub use report::{Reporter, SilentReporter, Stage};
pub use runtime::{CommandRunner, SystemRunner};
pub use templates::{Template, TemplateRepository};
pub use validation::{validate, NameRejection, ProjectName};
