//! Dependency and script entries to merge into a package.json.

use indexmap::IndexMap;
use serde::Serialize;

/// One of the package.json maps that receive additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dependencies,
    DevDependencies,
    Scripts,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::Dependencies,
        Section::DevDependencies,
        Section::Scripts,
    ];

    /// The top-level package.json key.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Dependencies => "dependencies",
            Section::DevDependencies => "devDependencies",
            Section::Scripts => "scripts",
        }
    }
}

/// Entries to merge into package.json, keyed by package or script name.
///
/// Values are version ranges for dependencies and commands for scripts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Additions {
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
    pub scripts: IndexMap<String, String>,
}

impl Additions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), version.into());
        self
    }

    pub fn with_dev_dependency(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.dev_dependencies.insert(name.into(), version.into());
        self
    }

    pub fn with_script(mut self, name: impl Into<String>, command: impl Into<String>) -> Self {
        self.scripts.insert(name.into(), command.into());
        self
    }

    /// Merge `other` into `self`; entries from `other` win.
    pub fn extend(&mut self, other: Additions) {
        self.dependencies.extend(other.dependencies);
        self.dev_dependencies.extend(other.dev_dependencies);
        self.scripts.extend(other.scripts);
    }

    pub fn section(&self, section: Section) -> &IndexMap<String, String> {
        match section {
            Section::Dependencies => &self.dependencies,
            Section::DevDependencies => &self.dev_dependencies,
            Section::Scripts => &self.scripts,
        }
    }

    pub fn is_empty(&self) -> bool {
        Section::ALL.iter().all(|s| self.section(*s).is_empty())
    }
}
