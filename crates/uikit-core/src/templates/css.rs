//! Merging CSS custom properties into the stylesheet's `@theme` block

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Opening marker of the themed block
pub const THEME_MARKER: &str = "@theme {";

/// Return `css` with every variable not yet mentioned declared in the
/// `@theme` block, appending an empty block first when there is none
///
/// A variable counts as present when its name occurs anywhere in the
/// stylesheet; an existing declaration keeps its value.
pub fn inject(css: &str, vars: &IndexMap<String, String>) -> String {
    let mut out = css.to_string();
    if !out.contains(THEME_MARKER) {
        out.push_str("\n@theme {\n}\n");
    }

    let Some(marker) = out.find(THEME_MARKER) else {
        return out;
    };
    let mut cursor = marker + THEME_MARKER.len();

    for (name, value) in vars {
        if out.contains(name.as_str()) {
            continue;
        }
        let declaration = format!("\n  {name}: {value};");
        out.insert_str(cursor, &declaration);
        cursor += declaration.len();
    }
    out
}

/// Stylesheet receiving theme variables
#[derive(Debug, Clone)]
pub struct StylesheetInjector {
    path: PathBuf,
}

impl StylesheetInjector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Merge `vars` into the stylesheet
    ///
    /// Returns `true` when the stylesheet now declares every variable, `false`
    /// when it is missing or could not be read or written.
    pub async fn merge(&self, vars: &IndexMap<String, String>) -> bool {
        let current = match tokio::fs::read_to_string(&self.path).await {
            Ok(css) => css,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Stylesheet not readable");
                return false;
            }
        };

        let updated = inject(&current, vars);
        if updated == current {
            return true;
        }

        let path = self.path.clone();
        match tokio::task::spawn_blocking(move || write_atomic(&path, &updated)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                tracing::warn!(path = %self.path.display(), error = %format!("{e:#}"), "Failed to update stylesheet");
                false
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Stylesheet write task failed");
                false
            }
        }
    }
}

/// Replace `path` with `content` through a temporary file in the same
/// directory, keeping the original permissions
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .context("Failed to write temporary stylesheet")?;
    tmp.as_file().sync_all()?;

    if let Ok(metadata) = std::fs::metadata(path) {
        std::fs::set_permissions(tmp.path(), metadata.permissions())?;
    }

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_inserts_after_marker_in_order() {
        let css = "@import 'tailwindcss';\n\n@theme {\n  --font-sans: Inter;\n}\n";
        let out = inject(css, &vars(&[("--ui-primary", "#000"), ("--ui-primary-foreground", "#fff")]));
        assert_eq!(
            out,
            "@import 'tailwindcss';\n\n@theme {\n  --ui-primary: #000;\n  --ui-primary-foreground: #fff;\n  --font-sans: Inter;\n}\n"
        );
    }

    #[test]
    fn test_appends_block_when_missing() {
        let out = inject("@import 'tailwindcss';\n", &vars(&[("--ui-radius", "0.5rem")]));
        assert_eq!(out, "@import 'tailwindcss';\n\n@theme {\n  --ui-radius: 0.5rem;\n}\n");
    }

    #[test]
    fn test_idempotent() {
        let v = vars(&[("--ui-primary", "#000"), ("--ui-accent", "#f00")]);
        for css in ["", "@theme {\n}\n", "body {}\n@theme {\n  --ui-accent: blue;\n}\n"] {
            let once = inject(css, &v);
            assert_eq!(inject(&once, &v), once);
        }
    }

    #[test]
    fn test_existing_value_is_not_updated() {
        let css = "@theme {\n  --ui-primary: #111;\n}\n";
        assert_eq!(inject(css, &vars(&[("--ui-primary", "#222")])), css);
    }

    #[tokio::test]
    async fn test_merge_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.css");
        let injector = StylesheetInjector::new(&path);

        assert!(!injector.merge(&vars(&[("--ui-primary", "#000")])).await);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_merge_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.css");
        std::fs::write(&path, "@import 'tailwindcss';\n@theme {\n}\n").unwrap();

        let injector = StylesheetInjector::new(&path);
        assert!(injector.merge(&vars(&[("--ui-primary", "#000")])).await);
        assert!(injector.merge(&vars(&[("--ui-primary", "#000")])).await);

        let css = std::fs::read_to_string(&path).unwrap();
        assert_eq!(css.matches("--ui-primary").count(), 1);
        assert_eq!(
            std::fs::read_dir(dir.path()).unwrap().count(),
            1,
            "no temporary files left behind"
        );
    }
}
