//! Project configuration and detection
//!
//! The project configuration is a small JSON document written once by `init`
//! and read at the start of every `add`.

pub mod detector;

use crate::error::{ScaffoldError, ScaffoldResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub use detector::ProjectDetector;

/// Default destination for component classes, relative to the project root
pub const DEFAULT_COMPONENTS_PATH: &str = "app/Livewire/UI";

/// Default destination for component views, relative to the project root
pub const DEFAULT_VIEWS_PATH: &str = "resources/views/components/ui";

/// Fixed destination for client-side scripts, relative to the project root
pub const SCRIPTS_PATH: &str = "resources/js/ui";

/// Fixed stylesheet receiving theme variables, relative to the project root
pub const STYLESHEET_PATH: &str = "resources/css/app.css";

/// Tailwind generation used by the host project
///
/// Only v4 stylesheets have an `@theme` block that variables can be merged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailwindMode {
    #[default]
    V3,
    V4,
}

impl TailwindMode {
    pub fn supports_theme_block(&self) -> bool {
        matches!(self, TailwindMode::V4)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TailwindMode::V3 => "v3",
            TailwindMode::V4 => "v4",
        }
    }
}

impl fmt::Display for TailwindMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base (neutral) palettes offered by `init`
pub const BASE_COLORS: [&str; 5] = ["slate", "zinc", "gray", "neutral", "stone"];

/// Accent palettes offered by `init`
pub const ACCENT_COLORS: [&str; 6] = ["blue", "indigo", "violet", "rose", "orange", "emerald"];

/// Colors chosen during `init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub base: String,
    pub accent: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: BASE_COLORS[0].to_string(),
            accent: ACCENT_COLORS[0].to_string(),
        }
    }
}

impl Theme {
    /// Variables written into a v4 stylesheet by `init`
    pub fn css_vars(&self) -> IndexMap<String, String> {
        IndexMap::from([
            (
                "--primary".to_string(),
                format!("var(--color-{}-600)", self.accent),
            ),
            ("--primary-foreground".to_string(), "#ffffff".to_string()),
            ("--base".to_string(), format!("var(--color-{}-950)", self.base)),
        ])
    }
}

/// Destination directories, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPaths {
    pub components: String,
    pub views: String,
}

impl Default for ProjectPaths {
    fn default() -> Self {
        Self {
            components: DEFAULT_COMPONENTS_PATH.to_string(),
            views: DEFAULT_VIEWS_PATH.to_string(),
        }
    }
}

/// Persisted project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub tailwind: TailwindMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    pub paths: ProjectPaths,

    /// Namespace used in generated class headers
    pub namespace: String,
}

impl ProjectConfig {
    /// Build the configuration `init` writes for a freshly detected project
    pub fn new(root_namespace: &str, tailwind: TailwindMode, theme: Option<Theme>) -> Self {
        Self {
            tailwind,
            theme,
            paths: ProjectPaths::default(),
            namespace: format!("{}Livewire\\UI", root_namespace),
        }
    }

    /// Read the configuration file from the project root
    pub fn load(root: &Path, file_name: &str) -> ScaffoldResult<Self> {
        let path = root.join(file_name);
        if !path.is_file() {
            return Err(ScaffoldError::ConfigMissing {
                root: root.to_path_buf(),
                file: file_name.to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| ScaffoldError::ConfigInvalid {
            path,
            reason: e.to_string(),
        })
    }

    /// Write the configuration file to the project root, returning its path
    pub fn save(&self, root: &Path, file_name: &str) -> anyhow::Result<PathBuf> {
        use anyhow::Context;

        let path = root.join(file_name);
        let mut content =
            serde_json::to_string_pretty(self).context("Failed to serialize configuration")?;
        content.push('\n');
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
