//! Catalog compiled into the binary
//!
//! The catalog document is parsed once per process and memoized;
//! `clear_catalog_cache` drops it so the next access parses again.

use super::bundle::ArtifactBundle;
use super::document::{ComponentEntry, IndexDocument, IndexEntry, RegistryDocument};
use super::stubs::{materialize, StubSource};
use super::Registry;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

const CATALOG_JSON: &str = include_str!("../../stubs/catalog.json");

/// Origin reported for catalog components
pub const CATALOG_ORIGIN: &str = "embedded catalog";

macro_rules! stub {
    ($name:literal) => {
        ($name, include_str!(concat!("../../stubs/", $name)))
    };
}

const STUBS: &[(&str, &str)] = &[
    stub!("accordion.blade.php.stub"),
    stub!("accordion.js.stub"),
    stub!("alert.blade.php.stub"),
    stub!("avatar.blade.php.stub"),
    stub!("avatar-group.blade.php.stub"),
    stub!("badge.blade.php.stub"),
    stub!("button.blade.php.stub"),
    stub!("date-picker.blade.php.stub"),
    stub!("date-picker.js.stub"),
    stub!("input.blade.php.stub"),
    stub!("modal.blade.php.stub"),
    stub!("modal.php.stub"),
    stub!("tabs.blade.php.stub"),
    stub!("tabs/content.blade.php.stub"),
    stub!("tabs/list.blade.php.stub"),
    stub!("tabs/trigger.blade.php.stub"),
    stub!("toast.blade.php.stub"),
    stub!("toast.php.stub"),
    stub!("toggle.blade.php.stub"),
];

static CATALOG: RwLock<Option<Arc<IndexDocument>>> = RwLock::new(None);

/// The parsed catalog, parsing it on first access
pub fn catalog() -> Arc<IndexDocument> {
    if let Some(cached) = CATALOG.read().ok().and_then(|guard| guard.clone()) {
        return cached;
    }

    let mut guard = CATALOG.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.get_or_insert_with(|| Arc::new(parse_catalog())).clone()
}

/// Forget the memoized catalog
pub fn clear_catalog_cache() {
    let mut guard = CATALOG.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = None;
}

fn parse_catalog() -> IndexDocument {
    match RegistryDocument::parse(CATALOG_JSON).and_then(RegistryDocument::into_index) {
        Some(index) => {
            tracing::debug!(components = index.components.len(), "Loaded embedded catalog");
            index
        }
        None => {
            tracing::error!("Embedded catalog is not a valid index document");
            IndexDocument::default()
        }
    }
}

fn embedded_stub(stub: &str) -> Option<&'static str> {
    STUBS
        .iter()
        .find(|(name, _)| *name == stub)
        .map(|(_, content)| *content)
}

/// Components shipped with the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl EmbeddedCatalog {
    /// Catalog entry for `name`; a description-only entry yields a default one
    pub fn entry(name: &str) -> Option<ComponentEntry> {
        match catalog().components.get(name)? {
            IndexEntry::Full(entry) => Some(entry.clone()),
            IndexEntry::Summary(description) => Some(ComponentEntry {
                description: Some(description.clone()),
                ..ComponentEntry::default()
            }),
        }
    }
}

#[async_trait]
impl Registry for EmbeddedCatalog {
    fn origin(&self) -> String {
        CATALOG_ORIGIN.to_string()
    }

    async fn resolve(&self, name: &str) -> Option<ArtifactBundle> {
        let entry = Self::entry(name)?;
        Some(materialize(name, entry, CATALOG_ORIGIN, &EmbeddedStubs).await)
    }

    async fn list(&self) -> IndexMap<String, String> {
        catalog().listing()
    }
}

struct EmbeddedStubs;

#[async_trait]
impl StubSource for EmbeddedStubs {
    async fn read_stub(&self, stub: &str) -> Option<String> {
        embedded_stub(stub).map(str::to_string)
    }

    fn probes_class_stub(&self) -> bool {
        true
    }
}
