use std::{fs, io, path::Path, process::Command};

use log::{debug, warn};

use crate::error::ScaffoldError;

/// Repository cloned as the starting point of every project.
pub const DEFAULT_TEMPLATE: &str = "https://github.com/evolvedev-inc/kyrix.git";

/// Places the base Kyrix project at a destination directory.
pub trait TemplateSource {
    fn fetch(&self, url: &str, destination: &Path) -> Result<(), ScaffoldError>;
}

/// Shallow `git clone` of the template, without its history.
#[derive(Debug, Default)]
pub struct GitTemplate;

impl TemplateSource for GitTemplate {
    fn fetch(&self, url: &str, destination: &Path) -> Result<(), ScaffoldError> {
        debug!("cloning {url} into {}", destination.display());

        let output = Command::new("git")
            .args(["clone", "--depth", "1", "--quiet", url])
            .arg(destination)
            .output()
            .map_err(|err| ScaffoldError::TemplateFetch {
                url: url.to_string(),
                reason: format!("could not run git: {err}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScaffoldError::TemplateFetch {
                url: url.to_string(),
                reason: match stderr.trim() {
                    "" => format!("git exited with {}", output.status),
                    message => message.to_string(),
                },
            });
        }

        // The generated project starts without the template's history.
        let git_dir = destination.join(".git");
        match fs::remove_dir_all(&git_dir) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => warn!("failed to remove {}: {err}", git_dir.display()),
        }

        Ok(())
    }
}
