//! Turning stubs into project files
//!
//! This module provides:
//! - Placeholder substitution for stub content
//! - File writing with the overwrite-confirmation policy
//! - CSS variable injection into the stylesheet's `@theme` block

pub mod css;
pub mod transformer;
pub mod writer;

pub use css::{inject, StylesheetInjector, THEME_MARKER};
pub use transformer::{transform, Substitutions, Token};
pub use writer::{safe_join, FileWriter, WriteOutcome};
