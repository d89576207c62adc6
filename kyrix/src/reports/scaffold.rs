//! Report of a completed scaffold run.

use std::path::PathBuf;

use create_kyrix_core::{Database, PackageManager, Target};

use super::output::{Output, Report};

/// What a scaffold run produced.
#[derive(Debug)]
pub struct ScaffoldReport {
    /// Where the project was created.
    pub target: Target,
    /// Database setup that was generated.
    pub database: Database,
    /// Package manager the project is set up for.
    pub package_manager: PackageManager,
    /// Generated files, relative to the project root.
    pub files_written: Vec<PathBuf>,
    /// The package.json that received the dependency additions.
    pub manifest: PathBuf,
    /// Commands to run next, in order.
    pub next_steps: Vec<String>,
}

impl ScaffoldReport {
    /// Commands that take the user from a fresh scaffold to a running server.
    pub fn next_steps(target: &Target, package_manager: PackageManager, docker: bool) -> Vec<String> {
        let mut steps = Vec::new();
        if let Target::NewDir(path) = target {
            steps.push(format!("cd {}", path.display()));
        }
        steps.push(package_manager.install_command().to_string());
        if docker {
            steps.push("docker compose -f src/docker/docker-compose.yml up -d".to_string());
        }
        steps.push(package_manager.run_command("dev"));
        steps
    }
}

impl Report for ScaffoldReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!(
            "Created Kyrix app in {}",
            self.target.path().display()
        ));
        out.key_value("Database", &self.database.to_string());
        out.key_value("Package manager", self.package_manager.as_str());

        if !self.files_written.is_empty() {
            out.newline();
            out.section(&format!("Generated files ({})", self.files_written.len()));
            for path in &self.files_written {
                out.added_item(&path.display().to_string());
            }
        }

        out.newline();
        out.key_value("Updated", &self.manifest.display().to_string());

        out.newline();
        out.section("Next steps");
        for step in &self.next_steps {
            out.command(step);
        }
    }
}
