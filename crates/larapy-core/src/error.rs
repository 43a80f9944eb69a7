//! Errors that abort project creation

use crate::templates::FetchError;
use crate::validation::NameRejection;
use crate::vcs::VcsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal project creation failures
///
/// Dependency installation problems are not represented here; they are
/// downgraded to warnings on the created project.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error(transparent)]
    InvalidName(#[from] NameRejection),

    #[error("Directory '{name}' already exists")]
    DirectoryExists { name: String, path: PathBuf },

    #[error("Failed to remove existing directory {}: {source}", .path.display())]
    RemoveExisting {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to clone repository: {0}")]
    Fetch(#[source] FetchError),

    #[error("Failed to remove template history: {0}")]
    StripHistory(#[source] io::Error),

    #[error("Failed to configure environment: {0}")]
    Environment(#[source] io::Error),

    #[error("Failed to initialize git repository: {0}")]
    VersionControl(#[source] VcsError),
}

impl CreateError {
    /// Follow-up lines telling the user how to recover
    pub fn guidance(&self) -> Vec<String> {
        match self {
            CreateError::InvalidName(rejection) => rejection.guidance(),
            CreateError::DirectoryExists { .. } => {
                vec!["Use --force to overwrite existing directory".to_string()]
            }
            CreateError::Fetch(_) | CreateError::VersionControl(_) => {
                vec!["Re-run with --force to start over from a clean directory".to_string()]
            }
            _ => Vec::new(),
        }
    }
}
