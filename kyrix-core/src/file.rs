use std::path::{Path, PathBuf};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the project root
    fn path(&self) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Materialize into a path/content pair
    fn entry(&self) -> FileEntry {
        FileEntry::new(self.path(), self.render())
    }

    /// Write the file below `root`
    fn write(&self, root: &Path) -> Result<PathBuf, WriteError> {
        self.entry().write(root)
    }
}

/// A file write that the filesystem refused.
#[derive(Debug, thiserror::Error)]
#[error("failed to write '{}'", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// A generated file: a path relative to the project root and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    content: String,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the relative file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the full path below `root`
    pub fn full_path(&self, root: &Path) -> PathBuf {
        root.join(&self.path)
    }

    /// Write the file below `root`, creating missing parent directories and
    /// truncating any existing file. Returns the full path written.
    pub fn write(&self, root: &Path) -> Result<PathBuf, WriteError> {
        let path = self.full_path(root);
        write_file(&path, &self.content).map_err(|source| WriteError {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Statistics from a write operation.
#[derive(Debug, Default)]
pub struct WriteStats {
    /// Relative paths of written files, in write order.
    pub written_paths: Vec<PathBuf>,
}

impl WriteStats {
    pub fn written(&self) -> usize {
        self.written_paths.len()
    }
}

/// Write every entry below `root`, in order.
///
/// Stops at the first failure. Files written before it are left in place.
pub fn write_all<'a>(
    root: &Path,
    entries: impl IntoIterator<Item = &'a FileEntry>,
) -> Result<WriteStats, WriteError> {
    let mut stats = WriteStats::default();
    for entry in entries {
        entry.write(root)?;
        stats.written_paths.push(entry.path.clone());
    }
    Ok(stats)
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}
