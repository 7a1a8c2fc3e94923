//! Component registries
//!
//! This module provides:
//! - The `Registry` trait shared by every component source
//! - Registry variants: embedded catalog, HTTP registry, local-path registry
//! - Registry document types for both schema generations
//! - Source selection from `--url` / `--repo` / `--registry` flags

pub mod bundle;
pub mod catalog;
pub mod document;
pub mod fetch;
pub mod local;
pub mod remote;
pub mod source;
pub(crate) mod stubs;

use async_trait::async_trait;
use indexmap::IndexMap;

pub use bundle::{extract_component_name, ArtifactBundle, ArtifactFile, Dependencies};
pub use catalog::{clear_catalog_cache, EmbeddedCatalog};
pub use document::{ComponentEntry, IndexDocument, RegistryDocument};
pub use fetch::{Fetch, HttpFetcher};
pub use local::LocalRegistry;
pub use remote::{fetch_direct, HttpRegistry};
pub use source::{GitHubRef, RegistryLocation, SourceSpec};

/// A named collection of installable components
///
/// Neither operation fails: an unreachable or malformed registry resolves to
/// `None` and lists as empty.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Where this registry lives, for diagnostics
    fn origin(&self) -> String;

    /// Resolve `name` into a bundle ready to install
    async fn resolve(&self, name: &str) -> Option<ArtifactBundle>;

    /// Available components, name to description
    async fn list(&self) -> IndexMap<String, String>;
}
