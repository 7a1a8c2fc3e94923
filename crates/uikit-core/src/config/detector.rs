//! Host project detection: root directory, PSR-4 namespace, Tailwind generation

use super::{TailwindMode, STYLESHEET_PATH};
use semver::VersionReq;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Namespace assumed when `composer.json` declares none
pub const DEFAULT_NAMESPACE: &str = "App\\";

/// Inspects a Laravel project on disk
#[derive(Debug, Clone)]
pub struct ProjectDetector {
    root: PathBuf,
}

impl ProjectDetector {
    /// Locate the project root by walking up from `start` to the first
    /// directory holding a `composer.json`; falls back to `start`
    pub fn discover(start: &Path) -> Self {
        let root = start
            .ancestors()
            .find(|dir| dir.join("composer.json").is_file())
            .unwrap_or(start)
            .to_path_buf();
        Self { root }
    }

    /// Use `root` as-is
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First PSR-4 namespace declared in `composer.json`
    pub fn root_namespace(&self) -> String {
        read_json(&self.root.join("composer.json"))
            .and_then(|composer| {
                composer
                    .get("autoload")?
                    .get("psr-4")?
                    .as_object()?
                    .keys()
                    .next()
                    .cloned()
            })
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
    }

    /// Guess the Tailwind generation from `package.json`, then the stylesheet
    pub fn detect_tailwind(&self) -> TailwindMode {
        if let Some(package) = read_json(&self.root.join("package.json")) {
            let declared = ["dependencies", "devDependencies"]
                .iter()
                .filter_map(|section| package.get(section)?.get("tailwindcss")?.as_str())
                .next();

            if let Some(requirement) = declared {
                return if targets_major_four(requirement) {
                    TailwindMode::V4
                } else {
                    TailwindMode::V3
                };
            }
        }

        match std::fs::read_to_string(self.root.join(STYLESHEET_PATH)) {
            Ok(css) if css.contains("@theme") => TailwindMode::V4,
            Ok(_) => TailwindMode::V3,
            Err(_) => TailwindMode::V4,
        }
    }
}

fn read_json(path: &Path) -> Option<Value> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

fn targets_major_four(requirement: &str) -> bool {
    match VersionReq::parse(requirement) {
        Ok(req) => req
            .comparators
            .first()
            .map(|c| c.major == 4)
            .unwrap_or(false),
        Err(_) => requirement.trim_start().starts_with("^4"),
    }
}
