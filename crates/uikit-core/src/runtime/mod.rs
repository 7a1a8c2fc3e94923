//! Package manager integration
//!
//! This module provides:
//! - Manifest inspection for Composer and NPM projects
//! - Lockfile-based package manager selection
//! - The `PackageInstaller` boundary and its process-backed implementation

pub mod installer;

pub use installer::{
    declared_packages, DependencyInstaller, Ecosystem, InstallCommand, PackageInstaller,
    ShellInstaller,
};
