//! Writing generated files under the overwrite policy

use crate::prompt::Confirm;
use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file existed and the user declined to overwrite it
    Skipped,
    Failed(String),
}

/// Writes files, asking before replacing existing ones unless forced
pub struct FileWriter<'a> {
    confirm: &'a dyn Confirm,
    force: bool,
}

impl<'a> FileWriter<'a> {
    pub fn new(confirm: &'a dyn Confirm, force: bool) -> Self {
        Self { confirm, force }
    }

    pub async fn write(&self, path: &Path, content: &str) -> WriteOutcome {
        if !self.force && fs::try_exists(path).await.unwrap_or(false) {
            let message = format!("File [{}] already exists. Overwrite?", path.display());
            if !self.confirm.confirm(&message, false) {
                tracing::debug!(path = %path.display(), "Overwrite declined");
                return WriteOutcome::Skipped;
            }
        }

        match write_file(path, content).await {
            Ok(()) => WriteOutcome::Written,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to write file");
                WriteOutcome::Failed(format!("{e:#}"))
            }
        }
    }
}

async fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Join a registry-supplied relative path onto `base`
///
/// Returns `None` unless `relative` is non-empty and made only of normal
/// components, so the result always stays below `base`.
pub fn safe_join(base: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);
    let mut components = relative.components().peekable();
    components.peek()?;

    if components.all(|c| matches!(c, Component::Normal(_))) {
        Some(base.join(relative))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::FixedAnswer;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resources/views/components/ui/tabs/list.blade.php");

        let writer = FileWriter::new(&FixedAnswer(false), false);
        assert_eq!(writer.write(&path, "<div/>").await, WriteOutcome::Written);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<div/>");
    }

    #[tokio::test]
    async fn test_declined_overwrite_leaves_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("button.blade.php");
        std::fs::write(&path, "original").unwrap();

        let writer = FileWriter::new(&FixedAnswer(false), false);
        assert_eq!(writer.write(&path, "new").await, WriteOutcome::Skipped);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");

        let accepting = FileWriter::new(&FixedAnswer(true), false);
        assert_eq!(accepting.write(&path, "new").await, WriteOutcome::Written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_force_never_asks() {
        struct Panicking;
        impl Confirm for Panicking {
            fn confirm(&self, message: &str, _default: bool) -> bool {
                panic!("unexpected prompt: {message}")
            }
        }

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alert.blade.php");
        std::fs::write(&path, "old").unwrap();

        let writer = FileWriter::new(&Panicking, true);
        assert_eq!(writer.write(&path, "forced").await, WriteOutcome::Written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "forced");
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let writer = FileWriter::new(&FixedAnswer(true), true);
        let outcome = writer.write(&blocker.join("card.blade.php"), "x").await;
        assert!(matches!(outcome, WriteOutcome::Failed(_)));
    }

    #[test]
    fn test_safe_join() {
        let base = Path::new("/project/views");
        assert_eq!(
            safe_join(base, "tabs/list.blade.php"),
            Some(PathBuf::from("/project/views/tabs/list.blade.php"))
        );
        assert_eq!(safe_join(base, "../../etc/passwd"), None);
        assert_eq!(safe_join(base, "/etc/passwd"), None);
        assert_eq!(safe_join(base, "tabs/../../x"), None);
        assert_eq!(safe_join(base, ""), None);
    }
}
