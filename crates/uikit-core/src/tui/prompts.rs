//! Charm-style CLI prompts using cliclack

use crate::config::{
    ProjectConfig, ProjectDetector, TailwindMode, Theme, ACCENT_COLORS, BASE_COLORS,
    SCRIPTS_PATH, STYLESHEET_PATH,
};
use crate::error::ScaffoldError;
use crate::install::{AddRequest, CssStatus, InstallPhase, InstallReport, Installer};
use crate::product::ProductConfig;
use crate::prompt::Confirm;
use crate::registry::{Fetch, HttpFetcher, Registry, SourceSpec};
use crate::runtime::ShellInstaller;
use crate::templates::StylesheetInjector;
use anyhow::{Context, Result};
use colored::Colorize;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Accept detected values and defaults without prompting
    pub yes: bool,
}

/// CLI arguments for the add command
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    pub name: Option<String>,
    pub url: Option<String>,
    pub registry: Option<String>,
    pub repo: Option<String>,
    pub force: bool,
}

impl From<AddArgs> for AddRequest {
    fn from(args: AddArgs) -> Self {
        AddRequest {
            name: args.name,
            url: args.url,
            repo: args.repo,
            registry: args.registry,
            force: args.force,
        }
    }
}

/// CLI arguments for the list command
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub registry: Option<String>,
    pub repo: Option<String>,
    /// List the product's default registry
    pub remote: bool,
}

/// Confirmation through an inline cliclack prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackConfirm;

impl Confirm for CliclackConfirm {
    fn confirm(&self, message: &str, default: bool) -> bool {
        answer_or_decline(cliclack::confirm(message).initial_value(default).interact())
    }
}

/// A cancelled or failed prompt counts as "no"
fn answer_or_decline(answer: std::io::Result<bool>) -> bool {
    match answer {
        Ok(answer) => answer,
        Err(e) => {
            tracing::debug!(error = %e, "Prompt cancelled");
            false
        }
    }
}

fn current_project() -> ProjectDetector {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    ProjectDetector::discover(&current_dir)
}

fn relative<'a>(path: &'a Path, root: &Path) -> std::path::Display<'a> {
    path.strip_prefix(root).unwrap_or(path).display()
}

/// Write the project configuration, asking for Tailwind version and colors
pub async fn run_init<C: ProductConfig>(config: &C, args: InitArgs) -> Result<()> {
    cliclack::intro(format!("{} init", config.display_name()))?;

    let detector = current_project();
    let root = detector.root();
    let config_path = root.join(config.config_file_name());

    if config_path.exists() && !args.yes {
        let overwrite: bool = cliclack::confirm(format!(
            "{} already exists. Overwrite?",
            config.config_file_name()
        ))
        .initial_value(false)
        .interact()?;

        if !overwrite {
            cliclack::outro_cancel("Setup cancelled.")?;
            return Ok(());
        }
    }

    let namespace = detector.root_namespace();
    let detected = detector.detect_tailwind();
    cliclack::log::info(format!(
        "Project root: {} (namespace {}, Tailwind {} detected)",
        root.display(),
        namespace,
        detected
    ))?;

    let (tailwind, theme) = if args.yes {
        (detected, Theme::default())
    } else {
        let tailwind: TailwindMode = cliclack::select("Which Tailwind CSS version are you using?")
            .item(TailwindMode::V4, "Tailwind v4", "@theme block")
            .item(TailwindMode::V3, "Tailwind v3", "tailwind.config.js")
            .initial_value(detected)
            .interact()?;

        let mut base_select = cliclack::select("Base color");
        for color in BASE_COLORS {
            base_select = base_select.item(color, color, "");
        }
        let base: &str = base_select.interact()?;

        let mut accent_select = cliclack::select("Accent color");
        for color in ACCENT_COLORS {
            accent_select = accent_select.item(color, color, "");
        }
        let accent: &str = accent_select.interact()?;

        (
            tailwind,
            Theme {
                base: base.to_string(),
                accent: accent.to_string(),
            },
        )
    };

    let project = ProjectConfig::new(&namespace, tailwind, Some(theme.clone()));
    let written = project.save(root, config.config_file_name())?;
    cliclack::log::success(format!("Wrote {}", relative(&written, root)))?;

    if tailwind.supports_theme_block() {
        let injector = StylesheetInjector::new(root.join(STYLESHEET_PATH));
        if injector.path().exists() && injector.merge(&theme.css_vars()).await {
            cliclack::log::success(format!("Theme variables added to {}", STYLESHEET_PATH))?;
        } else {
            cliclack::log::warning(format!(
                "Could not update {}; add the theme variables manually",
                STYLESHEET_PATH
            ))?;
        }
    }

    cliclack::outro(format!(
        "Run `{} add <component>` to add your first component. Docs: {}",
        config.name(),
        config.docs_url()
    ))?;
    Ok(())
}

/// Install a component into the current project
pub async fn run_add<C: ProductConfig>(config: &C, args: AddArgs) -> Result<()> {
    cliclack::intro(format!("{} add", config.display_name()))?;

    let detector = current_project();
    let root = detector.root().to_path_buf();

    let observer = |phase: InstallPhase| {
        let _ = cliclack::log::step(phase.describe());
    };
    let fetch: Arc<dyn Fetch> = Arc::new(HttpFetcher::new(config.user_agent())?);
    let installer = Installer::open(
        &root,
        config.config_file_name(),
        &CliclackConfirm,
        &ShellInstaller,
        fetch.clone(),
    )?
    .with_observer(&observer);

    let mut request = AddRequest::from(args);
    let source = request.source()?;

    if request.name.is_none() {
        request.name = pick_component(&source, fetch).await?;
    }

    let report = installer.add(&request).await?;
    print_report(&report, &root)?;

    cliclack::outro(format!("{} is ready", report.component.bold()))?;
    Ok(())
}

/// Ask for a component when `add` was run without a name
///
/// Returns `None` for a direct URL, where the name comes from the file.
async fn pick_component(source: &SourceSpec, fetch: Arc<dyn Fetch>) -> Result<Option<String>> {
    if let SourceSpec::Repository(_) = source {
        return Err(ScaffoldError::NameRequired("--repo").into());
    }
    let Some(registry) = source.registry(fetch) else {
        return Ok(None);
    };

    let components = load_listing(registry.as_ref()).await?;

    let mut select = cliclack::select("Which component would you like to add?");
    for (name, description) in &components {
        select = select.item(name.clone(), name, description);
    }
    let name: String = select.interact()?;
    Ok(Some(name))
}

async fn load_listing(registry: &dyn Registry) -> Result<IndexMap<String, String>> {
    let spinner = cliclack::spinner();
    spinner.start("Loading components...");

    let components = registry.list().await;
    if components.is_empty() {
        spinner.stop("No components found");
        anyhow::bail!("No components found in {}", registry.origin());
    }

    spinner.stop(format!("{} components available", components.len()));
    Ok(components)
}

fn print_report(report: &InstallReport, root: &Path) -> Result<()> {
    for path in &report.created {
        cliclack::log::success(format!("Created {}", relative(path, root)))?;
    }
    for path in &report.skipped {
        cliclack::log::info(format!("Skipped {}", relative(path, root)))?;
    }
    for (target, reason) in &report.failed {
        cliclack::log::warning(format!("Could not write {}: {}", target, reason))?;
    }

    match &report.css {
        CssStatus::NotRequired => {}
        CssStatus::Injected => {
            cliclack::log::success(format!("CSS variables added to {}", STYLESHEET_PATH))?;
        }
        CssStatus::Manual(vars) => {
            let lines: Vec<String> = vars
                .iter()
                .map(|(name, value)| format!("{}: {};", name, value))
                .collect();
            cliclack::note(
                format!("Add these variables to {}", STYLESHEET_PATH),
                lines.join("\n"),
            )?;
        }
    }

    if !report.script_imports.is_empty() {
        cliclack::note(
            format!(
                "Import the scripts from {} in resources/js/app.js",
                SCRIPTS_PATH
            ),
            report.script_imports.join("\n"),
        )?;
    }

    Ok(())
}

/// Print the components offered by the catalog or a registry
pub async fn run_list<C: ProductConfig>(config: &C, args: ListArgs) -> Result<()> {
    let default_registry = args.remote.then(|| config.registry_url());
    let registry_flag = args.registry.as_deref().or(default_registry.as_deref());
    let source = SourceSpec::select(None, args.repo.as_deref(), registry_flag)?;

    let fetch: Arc<dyn Fetch> = Arc::new(HttpFetcher::new(config.user_agent())?);
    let registry = source
        .registry(fetch)
        .context("Listing requires a registry or repository")?;

    let components = if matches!(source, SourceSpec::Catalog) {
        registry.list().await
    } else {
        cliclack::intro(format!("{} list", config.display_name()))?;
        load_listing(registry.as_ref()).await?
    };

    let width = components.keys().map(|name| name.len()).max().unwrap_or(0);

    println!();
    println!("  {}", format!("Components ({})", registry.origin()).cyan().bold());
    println!();
    for (name, description) in &components {
        println!(
            "  {}  {}",
            format!("{:width$}", name, width = width).green(),
            description.dimmed()
        );
    }
    println!();
    println!(
        "  {} {} add <component>",
        "Install with".dimmed(),
        config.name()
    );

    Ok(())
}
