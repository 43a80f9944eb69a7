//! `.env` generation from the template's `.env.example`
//!
//! Substitutions match whole literal lines. A template whose defaults differ
//! from [`SQLITE_CONNECTION`] / [`SQLITE_DATABASE`] is copied unchanged.

use super::secret::Secret;
use crate::project::Database;
use std::io;
use std::path::Path;
use tokio::fs;

pub const ENV_EXAMPLE_FILE: &str = ".env.example";
pub const ENV_FILE: &str = ".env";

/// Default connection line shipped in `.env.example`
pub const SQLITE_CONNECTION: &str = "DB_CONNECTION=sqlite";

/// Default database line shipped in `.env.example`
pub const SQLITE_DATABASE: &str = "DB_DATABASE=storage/database.sqlite";

const APP_KEY_PREFIX: &str = "APP_KEY=";

/// Server connection settings written for non-sqlite backends
fn server_settings(database: Database) -> Option<(u16, &'static str)> {
    match database {
        Database::Sqlite => None,
        Database::Postgresql => Some((5432, "postgres")),
        Database::Mysql => Some((3306, "root")),
    }
}

/// Rewrite each line `f` returns replacements for, keeping CRLF endings intact
fn replace_lines<F>(content: &str, mut f: F) -> String
where
    F: FnMut(&str) -> Option<Vec<String>>,
{
    content
        .split('\n')
        .map(|raw| {
            let (line, cr) = match raw.strip_suffix('\r') {
                Some(line) => (line, "\r"),
                None => (raw, ""),
            };
            match f(line) {
                Some(lines) => format!("{}{}", lines.join(&format!("{}\n", cr)), cr),
                None => raw.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Swap the sqlite defaults for the chosen backend's settings
pub fn apply_database(content: &str, database: Database) -> String {
    let Some((port, username)) = server_settings(database) else {
        return content.to_string();
    };

    replace_lines(content, |line| {
        if line == SQLITE_CONNECTION {
            Some(vec![format!("DB_CONNECTION={}", database)])
        } else if line == SQLITE_DATABASE {
            Some(vec![
                "DB_DATABASE=larapy".to_string(),
                "DB_HOST=localhost".to_string(),
                format!("DB_PORT={}", port),
                format!("DB_USERNAME={}", username),
                "DB_PASSWORD=".to_string(),
            ])
        } else {
            None
        }
    })
}

/// Replace the first `APP_KEY=` line in place, or append one
pub fn set_app_key(content: &str, secret: &Secret) -> String {
    let key_line = format!("{}{}", APP_KEY_PREFIX, secret.expose());

    let has_key = content
        .split('\n')
        .any(|line| line.starts_with(APP_KEY_PREFIX));

    if has_key {
        let mut replaced = false;
        return replace_lines(content, |line| {
            if !replaced && line.starts_with(APP_KEY_PREFIX) {
                replaced = true;
                Some(vec![key_line.clone()])
            } else {
                None
            }
        });
    }

    let mut updated = content.to_string();
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&key_line);
    updated.push('\n');
    updated
}

/// Copy `example` to `target` and apply the database settings
///
/// Returns `false` without touching anything when `example` does not exist.
pub async fn configure(example: &Path, target: &Path, database: Database) -> io::Result<bool> {
    if !fs::try_exists(example).await? {
        return Ok(false);
    }

    fs::copy(example, target).await?;

    if database != Database::Sqlite {
        let content = fs::read_to_string(target).await?;
        fs::write(target, apply_database(&content, database)).await?;
    }

    Ok(true)
}

/// Write `secret` into the `.env` at `path`; returns `false` if there is no such file
pub async fn write_app_key(path: &Path, secret: &Secret) -> io::Result<bool> {
    if !fs::try_exists(path).await? {
        return Ok(false);
    }

    let content = fs::read_to_string(path).await?;
    fs::write(path, set_app_key(&content, secret)).await?;
    Ok(true)
}
