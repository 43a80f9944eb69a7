//! Project creation request types

use crate::templates::Template;
use clap::ValueEnum;
use std::fmt;

/// Database backend written into the generated `.env`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Database {
    #[default]
    Sqlite,
    Postgresql,
    Mysql,
}

impl Database {
    /// Value used for `DB_CONNECTION=`
    pub fn connection_name(&self) -> &'static str {
        match self {
            Database::Sqlite => "sqlite",
            Database::Postgresql => "postgresql",
            Database::Mysql => "mysql",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.connection_name())
    }
}

/// Everything needed to scaffold one project
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    /// Requested project name, validated during creation
    pub name: String,

    /// Template variant to fetch
    pub template: Template,

    /// Python version the project targets
    pub python_version: String,

    /// Database backend to configure
    pub database: Database,

    /// Initialize a fresh git repository after scaffolding
    pub init_git: bool,

    /// Remove an existing directory with the same name
    pub force: bool,
}

impl ProjectRequest {
    /// Request with the installer's defaults for everything but the name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: Template::Default,
            python_version: "3.11".to_string(),
            database: Database::Sqlite,
            init_git: false,
            force: false,
        }
    }
}
