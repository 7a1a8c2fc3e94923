//! Third-party package installation
//!
//! Packages are checked against the project's manifest and missing ones are
//! installed through the ecosystem's package manager. Failures are logged and
//! otherwise ignored; an install never stops because a package did not land.

use crate::prompt::Confirm;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for a single package install
const INSTALL_TIMEOUT: Duration = Duration::from_secs(300);

/// Package ecosystems a component can depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
    Composer,
    Npm,
}

impl Ecosystem {
    pub fn manifest_file(&self) -> &'static str {
        match self {
            Ecosystem::Composer => "composer.json",
            Ecosystem::Npm => "package.json",
        }
    }

    /// Manifest sections that declare packages
    fn sections(&self) -> [&'static str; 2] {
        match self {
            Ecosystem::Composer => ["require", "require-dev"],
            Ecosystem::Npm => ["dependencies", "devDependencies"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ecosystem::Composer => "Composer",
            Ecosystem::Npm => "NPM",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Packages declared in the project's manifest, `None` when there is none
pub fn declared_packages(root: &Path, ecosystem: Ecosystem) -> Option<HashSet<String>> {
    let content = std::fs::read_to_string(root.join(ecosystem.manifest_file())).ok()?;
    let manifest: Value = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!(manifest = ecosystem.manifest_file(), error = %e, "Manifest is not valid JSON");
            return None;
        }
    };

    Some(
        ecosystem
            .sections()
            .iter()
            .filter_map(|section| manifest.get(section)?.as_object())
            .flat_map(|packages| packages.keys().cloned())
            .collect(),
    )
}

/// Program and arguments that install one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl InstallCommand {
    /// Choose the command for `package`, probing lockfiles to pick the
    /// JavaScript package manager
    pub fn for_package(ecosystem: Ecosystem, package: &str, root: &Path) -> Self {
        let (program, verb) = match ecosystem {
            Ecosystem::Composer => ("composer", "require"),
            Ecosystem::Npm => {
                if root.join("bun.lockb").exists() || root.join("bun.lock").exists() {
                    ("bun", "add")
                } else if root.join("pnpm-lock.yaml").exists() {
                    ("pnpm", "add")
                } else if root.join("yarn.lock").exists() {
                    ("yarn", "add")
                } else {
                    ("npm", "install")
                }
            }
        };
        Self {
            program,
            args: vec![verb.to_string(), package.to_string()],
        }
    }
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// Runs a package manager for one package
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Install `package` into the project at `root`, returning the exit code
    /// (`None` when the process could not be run to completion)
    async fn run_install(&self, ecosystem: Ecosystem, package: &str, root: &Path) -> Option<i32>;
}

/// Invokes the real package manager
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellInstaller;

#[async_trait]
impl PackageInstaller for ShellInstaller {
    async fn run_install(&self, ecosystem: Ecosystem, package: &str, root: &Path) -> Option<i32> {
        let command = InstallCommand::for_package(ecosystem, package, root);
        tracing::info!(%command, root = %root.display(), "Installing package");

        let mut child = match TokioCommand::new(command.program)
            .args(&command.args)
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(%command, error = %e, "Failed to start package manager");
                return None;
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let run = async {
            // Package managers chat on both streams; keep it for --log-level debug
            let drain = async {
                if let (Some(stdout), Some(stderr)) = (stdout, stderr) {
                    let mut stdout_lines = BufReader::new(stdout).lines();
                    let mut stderr_lines = BufReader::new(stderr).lines();
                    let (mut out_open, mut err_open) = (true, true);
                    while out_open || err_open {
                        tokio::select! {
                            line = stdout_lines.next_line(), if out_open => match line {
                                Ok(Some(line)) => tracing::debug!(target: "php_ui::install", "{line}"),
                                _ => out_open = false,
                            },
                            line = stderr_lines.next_line(), if err_open => match line {
                                Ok(Some(line)) => tracing::debug!(target: "php_ui::install", "{line}"),
                                _ => err_open = false,
                            },
                        }
                    }
                }
            };
            drain.await;
            child.wait().await
        };

        match timeout(INSTALL_TIMEOUT, run).await {
            Ok(Ok(status)) => {
                if !status.success() {
                    tracing::warn!(%command, code = ?status.code(), "Package install failed");
                }
                status.code()
            }
            Ok(Err(e)) => {
                tracing::warn!(%command, error = %e, "Failed to wait for package manager");
                None
            }
            Err(_) => {
                tracing::warn!(%command, seconds = INSTALL_TIMEOUT.as_secs(), "Package install timed out");
                None
            }
        }
    }
}

/// Installs a component's declared packages that the project lacks
pub struct DependencyInstaller<'a> {
    root: &'a Path,
    confirm: &'a dyn Confirm,
    runner: &'a dyn PackageInstaller,
}

impl<'a> DependencyInstaller<'a> {
    pub fn new(root: &'a Path, confirm: &'a dyn Confirm, runner: &'a dyn PackageInstaller) -> Self {
        Self {
            root,
            confirm,
            runner,
        }
    }

    /// Install every package in `packages` not yet declared in the manifest
    ///
    /// Without `force` each install is confirmed first. A project without a
    /// manifest for `ecosystem` is left alone.
    pub async fn ensure(&self, packages: &[String], ecosystem: Ecosystem, force: bool) {
        if packages.is_empty() {
            return;
        }
        let Some(declared) = declared_packages(self.root, ecosystem) else {
            tracing::debug!(manifest = ecosystem.manifest_file(), "No manifest, skipping dependencies");
            return;
        };

        for package in packages.iter().filter(|p| !declared.contains(p.as_str())) {
            if !force {
                let message = format!("The component requires {ecosystem} package {package}. Install it?");
                if !self.confirm.confirm(&message, true) {
                    tracing::debug!(%package, "Package install declined");
                    continue;
                }
            }

            match self.runner.run_install(ecosystem, package, self.root).await {
                Some(0) => tracing::debug!(%package, "Package installed"),
                code => tracing::warn!(%package, ?code, "Package may not have been installed"),
            }
        }
    }
}
