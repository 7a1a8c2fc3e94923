//! Registries staged on the local filesystem
//!
//! A directory is read like a remote base (`registry/<name>.json`, then
//! `registry.json`); a JSON file is read as a legacy index. Stubs resolve
//! against the directory holding the registry.

use super::bundle::ArtifactBundle;
use super::document::{IndexDocument, RegistryDocument};
use super::stubs::{materialize, StubSource};
use super::Registry;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Registry read from disk
#[derive(Debug, Clone)]
pub struct LocalRegistry {
    root: PathBuf,
    /// Set when the source named a JSON file rather than a directory
    index_file: Option<PathBuf>,
}

impl LocalRegistry {
    /// Open a registry at `path`, which may carry a `file://` prefix
    pub fn open(path: &str) -> Self {
        let path = PathBuf::from(path.strip_prefix("file://").unwrap_or(path));
        if path.is_file() {
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Self {
                root,
                index_file: Some(path),
            }
        } else {
            Self {
                root: path,
                index_file: None,
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_document(path: &Path) -> Option<RegistryDocument> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Registry document not readable");
                return None;
            }
        };
        RegistryDocument::parse(&content)
    }

    fn index_path(&self) -> PathBuf {
        self.index_file
            .clone()
            .unwrap_or_else(|| self.root.join("registry.json"))
    }

    async fn read_index(&self) -> Option<IndexDocument> {
        Self::read_document(&self.index_path()).await?.into_index()
    }
}

#[async_trait]
impl Registry for LocalRegistry {
    fn origin(&self) -> String {
        self.index_file
            .as_deref()
            .unwrap_or(self.root.as_path())
            .display()
            .to_string()
    }

    async fn resolve(&self, name: &str) -> Option<ArtifactBundle> {
        let stubs = LocalStubs {
            root: self.root.clone(),
        };

        if self.index_file.is_none() {
            let descriptor = self.root.join("registry").join(format!("{name}.json"));
            if let Some(entry) = Self::read_document(&descriptor)
                .await
                .and_then(RegistryDocument::into_component)
            {
                let origin = descriptor.display().to_string();
                return Some(materialize(name, entry, origin, &stubs).await);
            }
        }

        let index = self.read_index().await?;
        let entry = index.embedded(name)?.clone();
        let origin = self.index_path().display().to_string();
        Some(materialize(name, entry, origin, &stubs).await)
    }

    async fn list(&self) -> IndexMap<String, String> {
        self.read_index()
            .await
            .map(|index| index.listing())
            .unwrap_or_default()
    }
}

struct LocalStubs {
    root: PathBuf,
}

#[async_trait]
impl StubSource for LocalStubs {
    async fn read_stub(&self, stub: &str) -> Option<String> {
        for candidate in [self.root.join("stubs").join(stub), self.root.join(stub)] {
            if let Ok(content) = fs::read_to_string(&candidate).await {
                return Some(content);
            }
        }
        None
    }

    fn probes_class_stub(&self) -> bool {
        true
    }
}
