//! Component installation, from source selection to summary
//!
//! An install walks a fixed sequence of phases:
//!
//! ```text
//! ResolveSource -> FetchBundle -> InstallDeps -> WriteFiles -> InjectCss -> Summarize
//! ```
//!
//! Only an unresolvable component and an install that wrote nothing end in an
//! error. Declined overwrites, failed writes, failed package installs and an
//! unwritable stylesheet are recorded in the report and the install goes on.

use crate::config::{ProjectConfig, SCRIPTS_PATH, STYLESHEET_PATH};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::prompt::Confirm;
use crate::registry::{fetch_direct, ArtifactBundle, Fetch, SourceSpec};
use crate::runtime::{DependencyInstaller, Ecosystem, PackageInstaller};
use crate::templates::{safe_join, FileWriter, StylesheetInjector, Substitutions, WriteOutcome};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments of `add`
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub repo: Option<String>,
    pub registry: Option<String>,
    pub force: bool,
}

impl AddRequest {
    pub fn source(&self) -> ScaffoldResult<SourceSpec> {
        SourceSpec::select(
            self.url.as_deref(),
            self.repo.as_deref(),
            self.registry.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    ResolveSource,
    FetchBundle,
    InstallDeps,
    WriteFiles,
    InjectCss,
    Summarize,
}

impl InstallPhase {
    pub fn describe(&self) -> &'static str {
        match self {
            InstallPhase::ResolveSource => "Resolving source",
            InstallPhase::FetchBundle => "Fetching component",
            InstallPhase::InstallDeps => "Checking dependencies",
            InstallPhase::WriteFiles => "Writing files",
            InstallPhase::InjectCss => "Updating stylesheet",
            InstallPhase::Summarize => "Finishing",
        }
    }
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// What happened to the bundle's CSS variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssStatus {
    NotRequired,
    Injected,
    /// The user has to add these by hand
    Manual(IndexMap<String, String>),
}

/// Outcome of a successful install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub component: String,
    pub source: String,
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    /// Target and reason for every file that could not be written
    pub failed: Vec<(String, String)>,
    pub css: CssStatus,
    /// Import lines to add to the application's entry script
    pub script_imports: Vec<String>,
}

impl InstallReport {
    fn new(bundle: &ArtifactBundle) -> Self {
        Self {
            component: bundle.name.clone(),
            source: bundle.source.clone(),
            created: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            css: CssStatus::NotRequired,
            script_imports: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    View,
    Class,
    Script,
}

/// Observer notified as an install moves from phase to phase
pub type PhaseObserver<'a> = &'a (dyn Fn(InstallPhase) + Send + Sync);

/// Installs components into one project
pub struct Installer<'a> {
    root: &'a Path,
    config: Cow<'a, ProjectConfig>,
    confirm: &'a dyn Confirm,
    packages: &'a dyn PackageInstaller,
    fetch: Arc<dyn Fetch>,
    observer: Option<PhaseObserver<'a>>,
}

impl<'a> Installer<'a> {
    pub fn new(
        root: &'a Path,
        config: &'a ProjectConfig,
        confirm: &'a dyn Confirm,
        packages: &'a dyn PackageInstaller,
        fetch: Arc<dyn Fetch>,
    ) -> Self {
        Self {
            root,
            config: Cow::Borrowed(config),
            confirm,
            packages,
            fetch,
            observer: None,
        }
    }

    /// Load `config_file` from `root` and build an installer for it
    ///
    /// Fails with [`ScaffoldError::ConfigMissing`] before any registry is
    /// contacted.
    pub fn open(
        root: &'a Path,
        config_file: &str,
        confirm: &'a dyn Confirm,
        packages: &'a dyn PackageInstaller,
        fetch: Arc<dyn Fetch>,
    ) -> ScaffoldResult<Self> {
        let config = ProjectConfig::load(root, config_file)?;
        Ok(Self {
            root,
            config: Cow::Owned(config),
            confirm,
            packages,
            fetch,
            observer: None,
        })
    }

    pub fn with_observer(mut self, observer: PhaseObserver<'a>) -> Self {
        self.observer = Some(observer);
        self
    }

    fn enter(&self, phase: InstallPhase) {
        tracing::debug!(?phase, "Install phase");
        if let Some(observer) = self.observer {
            observer(phase);
        }
    }

    /// Run a complete `add`
    pub async fn add(&self, request: &AddRequest) -> ScaffoldResult<InstallReport> {
        self.enter(InstallPhase::ResolveSource);
        let source = request.source()?;

        self.enter(InstallPhase::FetchBundle);
        let bundle = self.fetch_bundle(&source, request.name.as_deref()).await?;

        self.install_bundle(bundle, request.force).await
    }

    /// Resolve the bundle for `name` from `source`
    pub async fn fetch_bundle(
        &self,
        source: &SourceSpec,
        name: Option<&str>,
    ) -> ScaffoldResult<ArtifactBundle> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());

        if let SourceSpec::Direct(url) = source {
            return fetch_direct(self.fetch.as_ref(), url)
                .await
                .ok_or_else(|| ScaffoldError::NotFound {
                    name: name.unwrap_or_else(|| url.as_str()).to_string(),
                    origin: url.to_string(),
                });
        }

        let name = name.ok_or(ScaffoldError::NameRequired(
            source.name_flag().unwrap_or("the component catalog"),
        ))?;

        let Some(registry) = source.registry(self.fetch.clone()) else {
            return Err(ScaffoldError::NotFound {
                name: name.to_string(),
                origin: format!("{source:?}"),
            });
        };

        registry
            .resolve(name)
            .await
            .ok_or_else(|| ScaffoldError::NotFound {
                name: name.to_string(),
                origin: registry.origin(),
            })
    }

    /// Install an already resolved bundle
    pub async fn install_bundle(
        &self,
        bundle: ArtifactBundle,
        force: bool,
    ) -> ScaffoldResult<InstallReport> {
        self.enter(InstallPhase::InstallDeps);
        let dependencies = DependencyInstaller::new(self.root, self.confirm, self.packages);
        dependencies
            .ensure(&bundle.dependencies.composer, Ecosystem::Composer, force)
            .await;
        dependencies
            .ensure(&bundle.dependencies.npm, Ecosystem::Npm, force)
            .await;

        self.enter(InstallPhase::WriteFiles);
        let mut report = InstallReport::new(&bundle);
        self.write_files(&bundle, force, &mut report).await;

        self.enter(InstallPhase::InjectCss);
        report.css = self.inject_css(&bundle.css_vars).await;

        self.enter(InstallPhase::Summarize);
        if report.created.is_empty() {
            return Err(ScaffoldError::NothingWritten(bundle.name));
        }
        tracing::info!(
            component = %report.component,
            created = report.created.len(),
            skipped = report.skipped.len(),
            "Component installed"
        );
        Ok(report)
    }

    async fn write_files(&self, bundle: &ArtifactBundle, force: bool, report: &mut InstallReport) {
        let views_dir = self.root.join(&self.config.paths.views);
        let components_dir = self.root.join(&self.config.paths.components);
        let scripts_dir = self.root.join(SCRIPTS_PATH);

        let substitutions = Substitutions::new(&bundle.name, &self.config);
        let writer = FileWriter::new(self.confirm, force);

        let views = bundle
            .files
            .values()
            .map(|file| (FileKind::View, file.target.as_str(), file.content.as_str()));
        let class = bundle
            .class_file
            .iter()
            .map(|file| (FileKind::Class, file.target.as_str(), file.content.as_str()));
        let scripts = bundle
            .script_files
            .iter()
            .map(|(name, content)| (FileKind::Script, name.as_str(), content.as_str()));

        for (kind, target, content) in views.chain(class).chain(scripts) {
            let dir = match kind {
                FileKind::View => &views_dir,
                FileKind::Class => &components_dir,
                FileKind::Script => &scripts_dir,
            };

            let Some(path) = safe_join(dir, target) else {
                tracing::warn!(component = %bundle.name, %target, "Refusing to write outside the destination directory");
                report
                    .failed
                    .push((target.to_string(), "unsafe target path".to_string()));
                continue;
            };

            match writer.write(&path, &substitutions.apply(content)).await {
                WriteOutcome::Written => {
                    if kind == FileKind::Script {
                        let module = target.strip_suffix(".js").unwrap_or(target);
                        report.script_imports.push(format!("import './ui/{module}';"));
                    }
                    report.created.push(path);
                }
                WriteOutcome::Skipped => report.skipped.push(path),
                WriteOutcome::Failed(reason) => {
                    report.failed.push((path.display().to_string(), reason))
                }
            }
        }
    }

    async fn inject_css(&self, vars: &IndexMap<String, String>) -> CssStatus {
        if vars.is_empty() {
            return CssStatus::NotRequired;
        }
        if !self.config.tailwind.supports_theme_block() {
            return CssStatus::Manual(vars.clone());
        }

        let injector = StylesheetInjector::new(self.root.join(STYLESHEET_PATH));
        if injector.merge(vars).await {
            CssStatus::Injected
        } else {
            CssStatus::Manual(vars.clone())
        }
    }
}
