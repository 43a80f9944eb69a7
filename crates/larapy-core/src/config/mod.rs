//! Environment configuration for generated projects

pub mod env;
pub mod secret;

pub use env::{apply_database, configure, set_app_key, write_app_key, ENV_EXAMPLE_FILE, ENV_FILE};
pub use secret::Secret;
