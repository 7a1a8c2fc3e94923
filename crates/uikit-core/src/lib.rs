//! UI Kit Core - component scaffolding for Laravel/Livewire projects
//!
//! This library resolves UI components from a registry, turns their stubs into
//! project files and wires up what they need (packages, theme variables). It
//! backs the `php-ui` binary but holds no product identity of its own.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Registry variants and documents, stub
//!   transformation, file writing, stylesheet injection, package installation
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the
//!   `Installer` that drives an `add` from source selection to summary
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use std::sync::Arc;
//! use uikit_core::{AddRequest, FixedAnswer, HttpFetcher, Installer, ShellInstaller};
//!
//! let fetch = Arc::new(HttpFetcher::new("php-ui")?);
//! let installer = Installer::open(&root, "php-ui.json", &FixedAnswer(false), &ShellInstaller, fetch)?;
//!
//! let request = AddRequest {
//!     name: Some("button".into()),
//!     repo: Some("acme/ui-kit@main".into()),
//!     ..AddRequest::default()
//! };
//! let report = installer.add(&request).await?;
//! ```

pub mod config;
pub mod error;
pub mod install;
pub mod product;
pub mod prompt;
pub mod registry;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{ProjectConfig, ProjectDetector, TailwindMode};
pub use error::{ScaffoldError, ScaffoldResult};
pub use install::{AddRequest, CssStatus, InstallPhase, InstallReport, Installer};
pub use product::ProductConfig;
pub use prompt::{Confirm, FixedAnswer};
pub use registry::{
    ArtifactBundle, EmbeddedCatalog, Fetch, HttpFetcher, HttpRegistry, LocalRegistry, Registry,
    SourceSpec,
};
pub use runtime::{DependencyInstaller, Ecosystem, PackageInstaller, ShellInstaller};
pub use templates::transform;

#[cfg(feature = "tui")]
pub use tui::{run_add, run_init, run_list};
