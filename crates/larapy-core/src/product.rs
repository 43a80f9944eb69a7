//! Product configuration trait for the installer binary
//!
//! This trait defines the interface the installer implements to configure
//! where templates come from, which package index to query and what to tell
//! the user once a project exists.

/// Configuration trait for the installer product
///
/// The implementation defines:
/// - Product identity (name, display name)
/// - Template repository and package index URLs
/// - Environment variables that override those URLs
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default git remote holding the application templates (one branch per template)
    fn default_template_url(&self) -> &'static str;

    /// Environment variable name for overriding the template URL
    fn template_url_env(&self) -> &'static str;

    /// Default JSON endpoint listing published framework releases
    fn default_index_url(&self) -> &'static str;

    /// Environment variable name for overriding the package index URL
    fn index_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_name: &str) -> Vec<String>;

    /// Where the generated application serves once started
    fn dev_server_url(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
