//! Template fetching from the remote application repository
//!
//! Each template variant is a branch of one git repository. Fetching is a
//! single-revision clone of that branch, after which the clone's own history
//! is removed so the new project starts clean.

use crate::product::ProductConfig;
use crate::runtime::{CommandRunner, Invocation, RunError};
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use url::Url;
use walkdir::WalkDir;

/// Remote repository the templates are cloned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRepository {
    url: Url,
}

impl TemplateRepository {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Repository from the product config, honouring its environment override
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.template_url_env())
            .unwrap_or_else(|_| config.default_template_url().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid template URL: {}", url_str))?;
        Ok(Self::new(url))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error(transparent)]
    Command(#[from] RunError),

    /// git ran and reported failure; carries its stderr verbatim
    #[error("{0}")]
    Git(String),
}

/// Clones template branches through a [`CommandRunner`]
pub struct RemoteFetcher<'a, R> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> RemoteFetcher<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Shallow-clone `reference` of `url` into `destination`, which must not exist yet
    pub async fn fetch(
        &self,
        url: &Url,
        destination: &Path,
        reference: &str,
    ) -> Result<(), FetchError> {
        if destination.exists() {
            return Err(FetchError::DestinationExists(destination.to_path_buf()));
        }

        let invocation = Invocation::new(
            "git",
            [
                "clone".to_string(),
                "--branch".to_string(),
                reference.to_string(),
                "--depth".to_string(),
                "1".to_string(),
                url.as_str().to_string(),
                destination.display().to_string(),
            ],
        );

        let output = self.runner.run(&invocation, None, None).await?;
        if !output.success() {
            return Err(FetchError::Git(output.stderr.trim_end().to_string()));
        }

        Ok(())
    }
}

/// Remove the `.git` directory left by the clone; returns whether one existed
pub async fn strip_history(project_dir: &Path) -> io::Result<bool> {
    let git_dir = project_dir.join(".git");
    if !fs::try_exists(&git_dir).await? {
        return Ok(false);
    }
    fs::remove_dir_all(&git_dir).await?;
    Ok(true)
}

/// Count regular files under `dir`, ignoring any `.git` directory
pub fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != OsStr::new(".git"))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}
