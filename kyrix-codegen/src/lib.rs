//! Content generators for the Kyrix project scaffolder.
//!
//! This crate turns a [`Choice`](create_kyrix_core::Choice) into the files and
//! package.json additions that adapt the Kyrix template to it.
//!
//! # Module Organization
//!
//! - [`files`] - One [`GeneratedFile`](create_kyrix_core::GeneratedFile) per generated source file
//! - [`TemplateRegistry`] - Generators keyed by template kind and database
//! - [`Plan`] - The ordered set of files for a choice
//! - [`additions_for`] - Dependencies and scripts for a choice

mod dependencies;
mod error;
pub mod files;
mod plan;
mod templates;

pub use dependencies::{Versions, additions_for};
pub use error::{Error, Result};
pub use plan::{Plan, required_kinds};
pub use templates::{TemplateKind, TemplateRegistry};
