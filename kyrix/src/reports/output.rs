//! Where reports end up.
//!
//! Reports only call the semantic methods of [`Output`]. The terminal
//! implementation prints to stdout, with warnings on stderr.

/// Sink for the lines of a scaffold or dry-run report.
pub trait Output {
    /// Headline of the report, underlined on a terminal.
    fn title(&mut self, text: &str);

    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    /// A package.json entry or any other plain listing.
    fn list_item(&mut self, text: &str);

    /// A file that was (or would be) generated.
    fn added_item(&mut self, text: &str);

    /// A shell command from the next steps.
    fn command(&mut self, text: &str);

    fn warning(&mut self, msg: &str);

    /// Header above a file body in the dry-run listing.
    fn divider(&mut self, label: &str);

    /// Verbatim text, such as generated file content.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// Something that knows how to print itself through an [`Output`].
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain terminal rendering, no colors.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        let underline = "=".repeat(text.chars().count());
        println!("{text}\n{underline}");
    }

    fn section(&mut self, name: &str) {
        println!("{name}:");
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{key}: {value}");
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {text}");
    }

    fn command(&mut self, text: &str) {
        println!("  $ {text}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn divider(&mut self, label: &str) {
        println!("── {label} ──");
    }

    fn preformatted(&mut self, text: &str) {
        println!("{text}");
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Collects rendered lines for assertions.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl RecordingOutput {
    pub fn contains(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn title(&mut self, text: &str) {
        self.lines.push(format!("# {text}"));
    }

    fn section(&mut self, name: &str) {
        self.lines.push(format!("{name}:"));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{key}: {value}"));
    }

    fn list_item(&mut self, text: &str) {
        self.lines.push(format!("- {text}"));
    }

    fn added_item(&mut self, text: &str) {
        self.lines.push(format!("+ {text}"));
    }

    fn command(&mut self, text: &str) {
        self.lines.push(format!("$ {text}"));
    }

    fn warning(&mut self, msg: &str) {
        self.lines.push(format!("warning: {msg}"));
    }

    fn divider(&mut self, label: &str) {
        self.lines.push(format!("── {label} ──"));
    }

    fn preformatted(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }
}
