use std::path::{Path, PathBuf};

use miette::{NamedSource, SourceSpan};
use serde_json::{Map, Value};

use crate::{Additions, Error, Result, Section};

pub const FILE_NAME: &str = "package.json";

/// A package.json file read from disk.
///
/// Only the `dependencies`, `devDependencies` and `scripts` maps are ever
/// modified; every other field is carried through untouched and in order.
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: PathBuf,
    root: Map<String, Value>,
}

impl PackageJson {
    /// Open and parse the package.json in `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(FILE_NAME);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Box::new(Error::Missing { path: path.clone() })
            } else {
                Box::new(Error::Io {
                    path: path.clone(),
                    source: e,
                })
            }
        })?;
        let filename = path.display().to_string();
        Self::from_str_with_filename(&content, &filename, path)
    }

    /// Parse package.json content; `path` is where [`save`](Self::save) writes.
    pub fn from_str_with_filename(
        content: &str,
        filename: &str,
        path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| Error::parse(e, content, filename))?;

        let Value::Object(root) = value else {
            return Err(Box::new(Error::NotAnObject {
                src: NamedSource::new(filename, content.to_string()),
            }));
        };

        for section in Section::ALL {
            match root.get(section.key()) {
                None | Some(Value::Object(_)) => {}
                Some(other) => {
                    return Err(Box::new(Error::InvalidSection {
                        src: NamedSource::new(filename, content.to_string()),
                        span: find_key_span(content, section.key()),
                        section: section.key().to_string(),
                        found: type_name(other),
                    }));
                }
            }
        }

        Ok(Self {
            path: path.into(),
            root,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a top-level field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Get an entry of one of the mergeable sections.
    pub fn entry(&self, section: Section, key: &str) -> Option<&str> {
        self.root
            .get(section.key())
            .and_then(|s| s.get(key))
            .and_then(Value::as_str)
    }

    /// Overwrite-union each section with `additions`; additions win on
    /// conflicting keys and missing sections are created.
    pub fn merge(&mut self, additions: &Additions) {
        for section in Section::ALL {
            let entries = additions.section(section);
            if entries.is_empty() {
                continue;
            }
            let target = self
                .root
                .entry(section.key())
                .or_insert_with(|| Value::Object(Map::new()));
            // Sections were checked to be objects when parsed.
            if let Value::Object(map) = target {
                for (key, value) in entries {
                    map.insert(key.clone(), Value::String(value.clone()));
                }
            }
        }
    }

    /// Render as pretty JSON with two-space indentation and a final newline.
    pub fn render(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.root)
            .map_err(|source| Box::new(Error::Serialize { source }))?;
        out.push('\n');
        Ok(out)
    }

    /// Save the current content to disk.
    pub fn save(&self) -> Result<()> {
        let content = self.render()?;
        std::fs::write(&self.path, content).map_err(|e| {
            Box::new(Error::Io {
                path: self.path.clone(),
                source: e,
            })
        })?;
        Ok(())
    }
}

/// Read the package.json in `dir`, merge `additions` into it and write it back.
pub fn merge_manifest(dir: impl AsRef<Path>, additions: &Additions) -> Result<PathBuf> {
    let mut package = PackageJson::open(dir)?;
    package.merge(additions);
    package.save()?;
    Ok(package.path)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", key);
    src.find(&quoted)
        .map(|offset| SourceSpan::from((offset, quoted.len())))
}
