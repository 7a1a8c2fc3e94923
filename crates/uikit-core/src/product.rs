//! Product configuration trait for CLI binaries
//!
//! This trait defines the identity a binary gives to the shared install logic:
//! what it is called, where its project configuration lives and which registry
//! it talks to by default.

/// Configuration trait for CLI products built on this library
///
/// Each binary implements this trait to define:
/// - Product identity (name, display name)
/// - Project configuration file name
/// - Default registry URL and its environment override
/// - Documentation links
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// File name of the persisted project configuration
    fn config_file_name(&self) -> &'static str;

    /// Default registry used by `list --remote`
    fn default_registry_url(&self) -> &'static str;

    /// Environment variable name for overriding the default registry
    fn registry_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }

    /// Default registry, honouring the environment override
    fn registry_url(&self) -> String {
        std::env::var(self.registry_url_env())
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.default_registry_url().to_string())
    }
}
