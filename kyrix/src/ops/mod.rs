//! Core operations.
//!
//! This module contains the business logic behind the commands,
//! separated from argument parsing, prompting and output rendering.

pub mod scaffold;

pub use scaffold::{ScaffoldOptions, preview, scaffold};
