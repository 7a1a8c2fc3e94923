//! Turning a component entry into a bundle by reading its stubs

use super::bundle::{class_name, ArtifactBundle, ArtifactFile};
use super::document::{ClassSpec, ComponentEntry, FileSpec, ScriptSpec};
use async_trait::async_trait;

/// Where a registry keeps its stub files
#[async_trait]
pub(crate) trait StubSource: Send + Sync {
    /// Read the stub at `stub` (relative, `/`-separated), `None` if missing
    async fn read_stub(&self, stub: &str) -> Option<String>;

    /// Whether an entry without a `class` should look for `<name>.php.stub`
    fn probes_class_stub(&self) -> bool {
        false
    }
}

/// Default view stub for entries that declare no files
pub(crate) fn default_view_stub(name: &str) -> (String, String) {
    (format!("{name}.blade.php.stub"), format!("{name}.blade.php"))
}

/// Build a bundle from `entry`, reading every referenced stub from `stubs`
///
/// Stubs that cannot be read are skipped; the bundle is returned with
/// whatever could be resolved.
pub(crate) async fn materialize(
    name: &str,
    entry: ComponentEntry,
    origin: impl Into<String>,
    stubs: &dyn StubSource,
) -> ArtifactBundle {
    let mut bundle = ArtifactBundle::new(name, origin);
    bundle.description = entry.description.filter(|d| !d.is_empty());
    bundle.dependencies = entry.dependencies;
    bundle.kind = entry.kind;
    bundle.registry_dependencies = entry.registry_dependencies;
    bundle.set_css_vars(entry.css_vars);

    let mut files = entry.files;
    if files.is_empty() {
        let (stub, target) = default_view_stub(name);
        files.insert(stub, FileSpec::Target(target));
    }

    for (key, spec) in files {
        match spec {
            FileSpec::Inline { content, target } => {
                bundle.files.insert(key, ArtifactFile::new(content, target));
            }
            FileSpec::Target(target) => match stubs.read_stub(&key).await {
                Some(content) => {
                    bundle.files.insert(key, ArtifactFile::new(content, target));
                }
                None => {
                    tracing::warn!(component = %name, stub = %key, "Stub not found, skipping");
                }
            },
        }
    }

    let default_class_target = format!("{}.php", class_name(name));
    bundle.class_file = match entry.class_file {
        Some(ClassSpec::Inline { content, target }) => Some(ArtifactFile::new(
            content,
            target.unwrap_or(default_class_target),
        )),
        Some(ClassSpec::Stub(stub)) => match stubs.read_stub(&stub).await {
            Some(content) => Some(ArtifactFile::new(content, default_class_target)),
            None => {
                tracing::warn!(component = %name, %stub, "Class stub not found, skipping");
                None
            }
        },
        None if stubs.probes_class_stub() => stubs
            .read_stub(&format!("{name}.php.stub"))
            .await
            .map(|content| ArtifactFile::new(content, default_class_target)),
        None => None,
    };

    match entry.js_stubs {
        ScriptSpec::Inline(scripts) => bundle.script_files = scripts,
        ScriptSpec::Names(names) => {
            for script in names {
                match stubs.read_stub(&format!("{script}.stub")).await {
                    Some(content) => {
                        bundle.script_files.insert(script, content);
                    }
                    None => {
                        tracing::warn!(component = %name, %script, "Script stub not found, skipping");
                    }
                }
            }
        }
    }

    bundle
}
