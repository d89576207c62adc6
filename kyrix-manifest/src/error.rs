use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("no package.json found at '{}'", path.display())]
    #[diagnostic(
        code(kyrix::manifest_missing),
        help("the template is expected to ship a package.json at its root")
    )]
    Missing { path: PathBuf },

    #[error("failed to access '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse package.json")]
    #[diagnostic(code(kyrix::manifest_parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid JSON here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("package.json must contain a JSON object at the top level")]
    #[diagnostic(code(kyrix::manifest_not_object))]
    NotAnObject {
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("'{section}' in package.json must be an object, found {found}")]
    #[diagnostic(code(kyrix::manifest_section))]
    InvalidSection {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected an object")]
        span: Option<SourceSpan>,
        section: String,
        found: &'static str,
    },

    #[error("failed to serialize package.json")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a parse error from a serde_json error with source context
    pub fn parse(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = offset_of(src, source.line(), source.column()).map(|offset| {
            let len = usize::from(offset < src.len());
            SourceSpan::from((offset, len))
        });
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Whether the template's manifest is absent or malformed, as opposed to
    /// a filesystem or serialization failure.
    pub fn is_manifest_error(&self) -> bool {
        matches!(
            self,
            Error::Missing { .. }
                | Error::Parse { .. }
                | Error::NotAnObject { .. }
                | Error::InvalidSection { .. }
        )
    }
}

/// Byte offset of a one-based line/column position, as reported by serde_json.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len()))
}
