//! Resolved, ready-to-install component bundles

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix every CSS custom property must carry
pub const CSS_VAR_PREFIX: &str = "--";

/// One file to write: transformed content plus a path relative to its
/// destination directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    pub content: String,
    pub target: String,
}

impl ArtifactFile {
    pub fn new(content: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            target: target.into(),
        }
    }
}

/// Declared third-party packages, per ecosystem
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    #[serde(default, deserialize_with = "crate::registry::document::map_or_empty_list")]
    pub composer: Vec<String>,

    #[serde(default, deserialize_with = "crate::registry::document::map_or_empty_list")]
    pub npm: Vec<String>,
}

impl Dependencies {
    pub fn is_empty(&self) -> bool {
        self.composer.is_empty() && self.npm.is_empty()
    }
}

/// Everything needed to install one component
///
/// Built fresh by every resolve call and not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactBundle {
    pub name: String,
    pub description: Option<String>,

    /// View files keyed by stub identifier, in declaration order
    pub files: IndexMap<String, ArtifactFile>,

    /// Optional component class, relative to the components directory
    pub class_file: Option<ArtifactFile>,

    /// Client-side scripts keyed by file name
    pub script_files: IndexMap<String, String>,

    pub dependencies: Dependencies,

    /// CSS custom properties, name to literal value
    pub css_vars: IndexMap<String, String>,

    /// Where the bundle came from, for diagnostics only
    pub source: String,

    /// Descriptor `type`, passed through untouched
    pub kind: Option<String>,

    /// Descriptor `registryDependencies`, passed through untouched
    pub registry_dependencies: Vec<String>,
}

impl ArtifactBundle {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    /// Total number of files the bundle would write
    pub fn file_count(&self) -> usize {
        self.files.len() + self.script_files.len() + usize::from(self.class_file.is_some())
    }

    /// Keep only CSS variables whose names carry the custom-property prefix
    pub(crate) fn set_css_vars(&mut self, vars: IndexMap<String, String>) {
        self.css_vars = vars
            .into_iter()
            .filter(|(name, _)| {
                let valid = name.starts_with(CSS_VAR_PREFIX);
                if !valid {
                    tracing::warn!(component = %self.name, variable = %name, "Ignoring CSS variable without '--' prefix");
                }
                valid
            })
            .collect();
    }
}

/// Strip known stub extensions from a file name
///
/// `my-component.blade.php.stub` becomes `my-component`, `widget.js.stub`
/// becomes `widget`. Names without a recognised suffix are returned unchanged.
pub fn extract_component_name(filename: &str) -> &str {
    [".blade.php.stub", ".php.stub", ".js.stub"]
        .iter()
        .find_map(|suffix| filename.strip_suffix(suffix))
        .unwrap_or(filename)
}

/// Upper-case the first letter of a component name
pub fn class_name(component: &str) -> String {
    let mut chars = component.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
