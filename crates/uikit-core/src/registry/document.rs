//! Registry document types and parsing
//!
//! Two document generations are in the wild:
//! - an index (`registry.json`) with a `components` mapping, whose entries are
//!   either a bare description or a full embedded component entry
//! - a per-component descriptor (`registry/<name>.json`) holding one entry
//!
//! Documents are written by PHP tooling, which serializes an empty mapping as
//! `[]`, so every mapping-valued field also accepts an empty list.

use super::bundle::Dependencies;
use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// A parsed registry document, discriminated by its keys
#[derive(Debug, Clone)]
pub enum RegistryDocument {
    Index(IndexDocument),
    Component(ComponentEntry),
}

impl RegistryDocument {
    /// Parse a document, returning `None` for anything that is not a JSON
    /// object of a known shape
    pub fn parse(content: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(content).ok()?;
        if !value.is_object() {
            return None;
        }

        if value.get("components").is_some() {
            serde_json::from_value(value).ok().map(Self::Index)
        } else {
            serde_json::from_value(value).ok().map(Self::Component)
        }
    }

    pub fn into_index(self) -> Option<IndexDocument> {
        match self {
            Self::Index(index) => Some(index),
            Self::Component(_) => None,
        }
    }

    pub fn into_component(self) -> Option<ComponentEntry> {
        match self {
            Self::Component(entry) => Some(entry),
            Self::Index(_) => None,
        }
    }
}

/// Registry index (`registry.json`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexDocument {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default, rename = "baseUrl")]
    pub base_url: Option<String>,

    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub components: IndexMap<String, IndexEntry>,
}

impl IndexDocument {
    /// Component names with their descriptions, defaulting to the name itself
    pub fn listing(&self) -> IndexMap<String, String> {
        self.components
            .iter()
            .map(|(name, entry)| {
                let description = entry
                    .description()
                    .filter(|d| !d.is_empty())
                    .unwrap_or(name.as_str())
                    .to_string();
                (name.clone(), description)
            })
            .collect()
    }

    /// The embedded entry for `name`, when the index carries one
    pub fn embedded(&self, name: &str) -> Option<&ComponentEntry> {
        match self.components.get(name)? {
            IndexEntry::Full(entry) if entry.embeds_artifacts() => Some(entry),
            _ => None,
        }
    }
}

/// One `components` value in an index
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IndexEntry {
    /// Lightweight index: description only
    Summary(String),
    /// Index format: full component entry embedded
    Full(ComponentEntry),
}

impl IndexEntry {
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Summary(description) => Some(description),
            Self::Full(entry) => entry.description.as_deref(),
        }
    }
}

/// A component entry, shared by index entries, descriptors and the embedded
/// catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentEntry {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub dependencies: Dependencies,

    #[serde(default, deserialize_with = "css_var_values")]
    pub css_vars: IndexMap<String, String>,

    /// Stub identifier to view file
    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub files: IndexMap<String, FileSpec>,

    #[serde(default, rename = "class")]
    pub class_file: Option<ClassSpec>,

    #[serde(default, deserialize_with = "map_or_empty_list")]
    pub js_stubs: ScriptSpec,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default, rename = "registryDependencies", deserialize_with = "map_or_empty_list")]
    pub registry_dependencies: Vec<String>,
}

impl ComponentEntry {
    /// Whether the entry carries anything installable beyond a description
    pub fn embeds_artifacts(&self) -> bool {
        !self.files.is_empty()
            || self.class_file.is_some()
            || !self.js_stubs.is_empty()
            || !self.dependencies.is_empty()
            || !self.css_vars.is_empty()
    }
}

/// Value of a `files` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FileSpec {
    /// Target path; content lives in the stub named by the key
    Target(String),
    /// Content provided inline
    Inline { content: String, target: String },
}

/// Value of a `class` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClassSpec {
    /// Stub file name
    Stub(String),
    Inline {
        content: String,
        #[serde(default)]
        target: Option<String>,
    },
}

/// Value of `js_stubs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScriptSpec {
    /// Script names; content lives in `<name>.stub`
    Names(Vec<String>),
    /// Script name to inline content
    Inline(IndexMap<String, String>),
}

impl Default for ScriptSpec {
    fn default() -> Self {
        Self::Names(Vec::new())
    }
}

impl ScriptSpec {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Names(names) => names.is_empty(),
            Self::Inline(scripts) => scripts.is_empty(),
        }
    }
}

/// Accept the value itself, `null`, or an empty JSON list
pub(crate) fn map_or_empty_list<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(T::default()),
        Value::Array(items) if items.is_empty() => Ok(T::default()),
        other => serde_json::from_value(other).map_err(serde::de::Error::custom),
    }
}

/// CSS variables with string or numeric values; anything else is dropped
fn css_var_values<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: IndexMap<String, Value> = map_or_empty_list(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::String(value) => Some((name, value)),
            Value::Number(value) => Some((name, value.to_string())),
            other => {
                tracing::warn!(variable = %name, value = %other, "Ignoring CSS variable without a scalar value");
                None
            }
        })
        .collect())
}
