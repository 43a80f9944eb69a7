//! Published framework versions from the package index

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Request timeout for the index query
pub const INDEX_TIMEOUT: Duration = Duration::from_secs(10);

/// Most releases listed
pub const MAX_LISTED: usize = 15;

#[derive(Debug, Error)]
pub enum VersionQueryError {
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to fetch versions from {url}: HTTP {status}")]
    Status {
        url: Url,
        status: reqwest::StatusCode,
    },
}

/// One uploaded distribution file of a release
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseFile {
    #[serde(default)]
    pub upload_time: Option<String>,
}

/// The parts of the index's JSON document that are used
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageIndex {
    #[serde(default)]
    pub releases: BTreeMap<String, Vec<ReleaseFile>>,
}

/// A version and the date its first file was uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: String,
    pub released: String,
}

/// Numeric dot-separated components; parts that are not all digits are skipped
fn version_key(version: &str) -> Vec<u64> {
    version
        .split('.')
        .filter(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|part| part.parse().ok())
        .collect()
}

impl PackageIndex {
    /// All version strings, newest first
    pub fn sorted_versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.releases.keys().map(String::as_str).collect();
        // Stable sort keeps ties in key order
        versions.sort_by(|a, b| version_key(b).cmp(&version_key(a)));
        versions
    }

    /// Up to [`MAX_LISTED`] newest versions that have uploaded files
    pub fn latest_releases(&self) -> Vec<Release> {
        self.sorted_versions()
            .into_iter()
            .take(MAX_LISTED)
            .filter_map(|version| {
                let files = self.releases.get(version)?;
                let first = files.first()?;
                let released = match first.upload_time.as_deref() {
                    Some(time) => time.split('T').next().unwrap_or(time).to_string(),
                    None => "Unknown".to_string(),
                };
                Some(Release {
                    version: version.to_string(),
                    released,
                })
            })
            .collect()
    }

    pub fn latest_version(&self) -> Option<&str> {
        self.sorted_versions().into_iter().next()
    }
}

/// Queries the package index JSON endpoint
pub struct VersionIndex {
    url: Url,
    client: reqwest::Client,
}

impl VersionIndex {
    pub fn new(url: Url, user_agent: &str) -> Self {
        Self {
            url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(INDEX_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Index from the product config, honouring its environment override
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.index_url_env())
            .unwrap_or_else(|_| config.default_index_url().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid package index URL: {}", url_str))?;
        Ok(Self::new(url, config.user_agent()))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn fetch(&self) -> Result<PackageIndex, VersionQueryError> {
        let response = self.client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(VersionQueryError::Status {
                url: self.url.clone(),
                status: response.status(),
            });
        }

        Ok(response.json::<PackageIndex>().await?)
    }
}
