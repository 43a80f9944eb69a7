//! Project name validation
//!
//! A project name doubles as a directory name and a Python distribution name,
//! so it must start with a lowercase letter and contain only lowercase letters,
//! digits, hyphens and underscores.

use std::fmt;
use thiserror::Error;

/// Names that collide with conventional project directories
pub const RESERVED_NAMES: &[&str] = &["test", "tests", "lib", "src", "bin"];

/// Why a project name was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameRejection {
    #[error("Invalid project name '{0}'")]
    Pattern(String),

    #[error("'{0}' is a reserved name")]
    Reserved(String),
}

impl NameRejection {
    /// Lines explaining how to pick an acceptable name
    pub fn guidance(&self) -> Vec<String> {
        match self {
            NameRejection::Pattern(_) => vec![
                "Project name must:".to_string(),
                "  - Start with a lowercase letter".to_string(),
                "  - Contain only lowercase letters, numbers, hyphens, and underscores"
                    .to_string(),
                "Valid examples: my-project, blog_app, api2".to_string(),
            ],
            NameRejection::Reserved(_) => vec![format!(
                "Reserved names: {}",
                RESERVED_NAMES.join(", ")
            )],
        }
    }
}

/// A name that passed [`validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn matches_pattern(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => chars.all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
        }),
        _ => false,
    }
}

/// Check the pattern first, then the reserved list
pub fn validate(name: &str) -> Result<ProjectName, NameRejection> {
    if !matches_pattern(name) {
        return Err(NameRejection::Pattern(name.to_string()));
    }

    if RESERVED_NAMES.contains(&name) {
        return Err(NameRejection::Reserved(name.to_string()));
    }

    Ok(ProjectName(name.to_string()))
}
