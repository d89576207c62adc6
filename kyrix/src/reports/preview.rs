//! Report of a dry run.

use create_kyrix_core::{FileEntry, Target};
use create_kyrix_manifest::{Additions, Section};

use super::output::{Output, Report};

/// Files and package.json additions a run would produce.
#[derive(Debug)]
pub struct PreviewReport {
    pub target: Target,
    pub files: Vec<FileEntry>,
    pub additions: Additions,
}

impl Report for PreviewReport {
    fn render(&self, out: &mut dyn Output) {
        for file in &self.files {
            out.divider(&file.path().display().to_string());
            out.preformatted(file.content().trim_end());
        }

        if !self.additions.is_empty() {
            out.divider("package.json");
            for section in Section::ALL {
                let entries = self.additions.section(section);
                if entries.is_empty() {
                    continue;
                }
                out.section(section.key());
                for (name, value) in entries {
                    out.list_item(&format!("{name}: {value}"));
                }
            }
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} files would be generated in {}",
            self.files.len(),
            self.target.path().display()
        ));
        out.warning("dry run, nothing was written");
    }
}
