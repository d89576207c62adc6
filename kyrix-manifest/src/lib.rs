//! package.json handling for the Kyrix project scaffolder.
//!
//! The template ships a package.json; scaffolding reads it once, merges the
//! dependencies and scripts the chosen stack needs, and writes it back.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod additions;
mod error;
mod package_json;

pub use additions::{Additions, Section};
pub use error::{Error, Result};
pub use package_json::{FILE_NAME, PackageJson, merge_manifest};
