//! Report data structures for commands.
//!
//! Operations build reports, then render them to an [`Output`] target.

mod output;
mod preview;
mod scaffold;

pub use output::{Output, Report, TerminalOutput};
pub use preview::PreviewReport;
pub use scaffold::ScaffoldReport;

#[cfg(test)]
pub use output::RecordingOutput;
