//! Template catalog and fetching
//!
//! This module provides:
//! - The static list of template variants and the branch each one lives on
//! - Shallow cloning of a template branch into a new project directory

pub mod fetcher;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use fetcher::{count_files, strip_history, FetchError, RemoteFetcher, TemplateRepository};

/// Template variants published in the application repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Template {
    #[default]
    Default,
    Api,
    Minimal,
    Full,
}

impl Template {
    /// All variants in listing order
    pub const ALL: [Template; 4] = [
        Template::Default,
        Template::Api,
        Template::Minimal,
        Template::Full,
    ];

    /// Identifier accepted by `--template`
    pub fn name(&self) -> &'static str {
        match self {
            Template::Default => "default",
            Template::Api => "api",
            Template::Minimal => "minimal",
            Template::Full => "full",
        }
    }

    /// Branch of the template repository holding this variant
    pub fn branch(&self) -> &'static str {
        match self {
            Template::Default => "main",
            Template::Api => "api",
            Template::Minimal => "minimal",
            Template::Full => "full",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Template::Default => {
                "Full-featured web application with authentication, database, and views"
            }
            Template::Api => "RESTful API application optimized for building backend services",
            Template::Minimal => {
                "Minimal setup with core features only, perfect for quick prototypes"
            }
            Template::Full => {
                "Complete application with all features, admin panel, and frontend tools"
            }
        }
    }

    /// Parse a template name, falling back to [`Template::Default`] for unknown names
    ///
    /// The boolean is `true` when the fallback was taken.
    pub fn resolve(name: &str) -> (Template, bool) {
        match name.parse() {
            Ok(template) => (template, false),
            Err(_) => (Template::Default, true),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown template '{0}'")]
pub struct UnknownTemplate(pub String);

impl FromStr for Template {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}
