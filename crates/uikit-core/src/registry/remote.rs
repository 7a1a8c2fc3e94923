//! HTTP-backed registries and direct stub URLs
//!
//! A registry base URL is probed with an ordered list of strategies, stopping
//! at the first that yields a component entry:
//!
//! 1. per-component descriptor at `<base>/registry/<name>.json`
//! 2. index at `<base>/registry.json` with the entry embedded
//! 3. legacy: `<base>` itself is an index document
//!
//! Stubs referenced by an entry are fetched from `<base>/stubs/` (for the
//! legacy layout, `stubs/` next to the document).

use super::bundle::{class_name, extract_component_name, ArtifactBundle, ArtifactFile};
use super::document::{ComponentEntry, IndexDocument, RegistryDocument};
use super::fetch::{build_url, file_name, parent_url, Fetch};
use super::stubs::{materialize, StubSource};
use super::Registry;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use url::Url;

/// File name assumed when a direct URL has no path
const FALLBACK_STUB_NAME: &str = "component.blade.php.stub";

/// Document layouts, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Descriptor,
    Index,
    Legacy,
}

const RESOLUTION_ORDER: [Strategy; 3] = [Strategy::Descriptor, Strategy::Index, Strategy::Legacy];

/// An entry found by one of the strategies
struct Located {
    entry: ComponentEntry,
    origin: Url,
    stubs_base: Url,
}

/// Registry served over HTTP
pub struct HttpRegistry {
    base: Url,
    fetch: Arc<dyn Fetch>,
}

impl HttpRegistry {
    pub fn new(base: Url, fetch: Arc<dyn Fetch>) -> Self {
        Self { base, fetch }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    async fn fetch_document(&self, url: &Url) -> Option<RegistryDocument> {
        let content = self.fetch.get_text(url).await?;
        let document = RegistryDocument::parse(&content);
        if document.is_none() {
            tracing::debug!(%url, "Response is not a registry document");
        }
        document
    }

    async fn fetch_index(&self, url: &Url) -> Option<IndexDocument> {
        self.fetch_document(url).await?.into_index()
    }

    async fn locate(&self, strategy: Strategy, name: &str) -> Option<Located> {
        tracing::debug!(?strategy, component = %name, base = %self.base, "Resolving component");
        match strategy {
            Strategy::Descriptor => {
                let url = build_url(&self.base, &format!("registry/{name}.json")).ok()?;
                let entry = self.fetch_document(&url).await?.into_component()?;
                Some(Located {
                    entry,
                    origin: url,
                    stubs_base: build_url(&self.base, "stubs").ok()?,
                })
            }
            Strategy::Index => {
                let url = build_url(&self.base, "registry.json").ok()?;
                let index = self.fetch_index(&url).await?;
                Some(Located {
                    entry: index.embedded(name)?.clone(),
                    origin: url,
                    stubs_base: build_url(&self.base, "stubs").ok()?,
                })
            }
            Strategy::Legacy => {
                let index = self.fetch_index(&self.base).await?;
                Some(Located {
                    entry: index.embedded(name)?.clone(),
                    origin: self.base.clone(),
                    stubs_base: build_url(&parent_url(&self.base).ok()?, "stubs").ok()?,
                })
            }
        }
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    fn origin(&self) -> String {
        self.base.to_string()
    }

    async fn resolve(&self, name: &str) -> Option<ArtifactBundle> {
        for strategy in RESOLUTION_ORDER {
            if let Some(found) = self.locate(strategy, name).await {
                let stubs = RemoteStubs {
                    fetch: self.fetch.as_ref(),
                    base: found.stubs_base,
                };
                return Some(materialize(name, found.entry, found.origin, &stubs).await);
            }
        }
        None
    }

    async fn list(&self) -> IndexMap<String, String> {
        let candidates = [build_url(&self.base, "registry.json").ok(), Some(self.base.clone())];
        for url in candidates.into_iter().flatten() {
            if let Some(index) = self.fetch_index(&url).await {
                return index.listing();
            }
        }
        IndexMap::new()
    }
}

struct RemoteStubs<'a> {
    fetch: &'a dyn Fetch,
    base: Url,
}

#[async_trait]
impl StubSource for RemoteStubs<'_> {
    async fn read_stub(&self, stub: &str) -> Option<String> {
        let url = build_url(&self.base, stub).ok()?;
        self.fetch.get_text(&url).await
    }
}

/// Fetch a single stub file and wrap it as a one-file bundle
///
/// The component name comes from the file name; the extension decides where
/// the file lands (script, class or view).
pub async fn fetch_direct(fetch: &dyn Fetch, url: &Url) -> Option<ArtifactBundle> {
    let content = fetch.get_text(url).await?;
    let filename = file_name(url).unwrap_or(FALLBACK_STUB_NAME);
    let name = extract_component_name(filename).to_string();

    let mut bundle = ArtifactBundle::new(name.clone(), url.as_str());
    if filename.ends_with(".js.stub") {
        bundle.script_files.insert(format!("{name}.js"), content);
    } else if filename.ends_with(".php.stub") && !filename.ends_with(".blade.php.stub") {
        bundle.class_file = Some(ArtifactFile::new(content, format!("{}.php", class_name(&name))));
    } else {
        bundle.files.insert(
            "blade".to_string(),
            ArtifactFile::new(content, format!("{}.blade.php", name.to_lowercase())),
        );
    }
    Some(bundle)
}
