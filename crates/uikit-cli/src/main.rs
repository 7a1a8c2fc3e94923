//! php-ui CLI - Blade/Livewire UI components for Laravel projects

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uikit_core::tui::{AddArgs, InitArgs, ListArgs};
use uikit_core::ProductConfig;

/// php-ui product configuration
#[derive(Clone)]
pub struct PhpUiConfig;

impl ProductConfig for PhpUiConfig {
    fn name(&self) -> &'static str {
        "php-ui"
    }

    fn display_name(&self) -> &'static str {
        "PHP-UI"
    }

    fn config_file_name(&self) -> &'static str {
        "php-ui.json"
    }

    fn default_registry_url(&self) -> &'static str {
        "https://raw.githubusercontent.com/jiordiviera/php-ui/main"
    }

    fn registry_url_env(&self) -> &'static str {
        "PHP_UI_REGISTRY"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/jiordiviera/php-ui"
    }
}

#[derive(Parser, Debug)]
#[command(name = "php-ui")]
#[command(about = "Add Blade/Livewire UI components to Laravel projects")]
#[command(version)]
pub struct Args {
    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(long = "log-level", global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configure the current project for php-ui
    Init(CliInitArgs),
    /// Add a component to the current project
    Add(CliAddArgs),
    /// List available components
    List(CliListArgs),
}

#[derive(Parser, Debug)]
pub struct CliInitArgs {
    /// Accept detected values and defaults without prompting
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct CliAddArgs {
    /// Component name (prompted for when omitted)
    pub name: Option<String>,

    /// Overwrite existing files and install dependencies without asking
    #[arg(short, long)]
    pub force: bool,

    /// Install a single stub file from this URL
    #[arg(long)]
    pub url: Option<String>,

    /// Registry base URL or local path
    #[arg(long)]
    pub registry: Option<String>,

    /// GitHub repository as owner/repo or owner/repo@branch
    #[arg(long)]
    pub repo: Option<String>,
}

impl From<CliAddArgs> for AddArgs {
    fn from(args: CliAddArgs) -> Self {
        AddArgs {
            name: args.name,
            url: args.url,
            registry: args.registry,
            repo: args.repo,
            force: args.force,
        }
    }
}

#[derive(Parser, Debug)]
pub struct CliListArgs {
    /// Registry base URL or local path
    #[arg(long, conflicts_with = "remote")]
    pub registry: Option<String>,

    /// GitHub repository as owner/repo or owner/repo@branch
    #[arg(long, conflicts_with = "remote")]
    pub repo: Option<String>,

    /// List the default remote registry (override with PHP_UI_REGISTRY)
    #[arg(long)]
    pub remote: bool,
}

impl From<CliListArgs> for ListArgs {
    fn from(args: CliListArgs) -> Self {
        ListArgs {
            registry: args.registry,
            repo: args.repo,
            remote: args.remote,
        }
    }
}

/// Diagnostics go to stderr; RUST_LOG wins over --log-level
fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    initialize_tracing(&args.log_level);
    let config = PhpUiConfig;

    let result = match args.command {
        Command::Init(init_args) => {
            uikit_core::run_init(&config, InitArgs { yes: init_args.yes }).await
        }
        Command::Add(add_args) => uikit_core::run_add(&config, add_args.into()).await,
        Command::List(list_args) => uikit_core::run_list(&config, list_args.into()).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
