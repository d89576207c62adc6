//! Core types for the Kyrix project scaffolder.
//!
//! This crate holds the user's choices and the primitive for writing
//! generated files, shared by the generators and the CLI.

mod choice;
mod file;

// User choices
pub use choice::{Choice, Database, DatabaseEngine, Orm, PackageManager, SqlEngine, Target};
// File operations
pub use file::{FileEntry, GeneratedFile, WriteError, WriteStats, write_all};
