use std::{error::Error as StdError, fmt, io, path::PathBuf};

use create_kyrix_core::{PackageManager, WriteError};
use thiserror::Error;

/// Exit status for a run the user interrupted.
pub const EXIT_CANCELLED: i32 = 130;

/// Why a scaffold run stopped.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("directory '{}' already exists, choose another name or remove it", path.display())]
    TargetExists { path: PathBuf },

    #[error(transparent)]
    UnsupportedVariant(#[from] create_kyrix_codegen::Error),

    #[error(transparent)]
    ManifestParse(#[from] Box<create_kyrix_manifest::Error>),

    #[error(transparent)]
    FileWrite(#[from] WriteError),

    #[error("scaffolding cancelled")]
    CancelledByUser,

    #[error("failed to fetch template from {url}: {reason}")]
    TemplateFetch { url: String, reason: String },

    #[error("package manager '{0}' is not installed")]
    UnavailablePackageManager(PackageManager),

    #[error("prompt failed")]
    Prompt(#[source] dialoguer::Error),
}

impl From<dialoguer::Error> for ScaffoldError {
    /// Ctrl-C inside a prompt reaches dialoguer as an interrupted read.
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
                ScaffoldError::CancelledByUser
            }
            other => ScaffoldError::Prompt(other),
        }
    }
}

/// Coarse classification of a [`ScaffoldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TargetExists,
    UnsupportedVariant,
    ManifestParse,
    FileWrite,
    CancelledByUser,
    TemplateFetch,
    UnavailablePackageManager,
    Prompt,
}

impl ScaffoldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScaffoldError::TargetExists { .. } => ErrorKind::TargetExists,
            ScaffoldError::UnsupportedVariant(_) => ErrorKind::UnsupportedVariant,
            // Reading or saving package.json can also fail at the filesystem level.
            ScaffoldError::ManifestParse(e) if e.is_manifest_error() => ErrorKind::ManifestParse,
            ScaffoldError::ManifestParse(_) => ErrorKind::FileWrite,
            ScaffoldError::FileWrite(_) => ErrorKind::FileWrite,
            ScaffoldError::CancelledByUser => ErrorKind::CancelledByUser,
            ScaffoldError::TemplateFetch { .. } => ErrorKind::TemplateFetch,
            ScaffoldError::UnavailablePackageManager(_) => ErrorKind::UnavailablePackageManager,
            ScaffoldError::Prompt(_) => ErrorKind::Prompt,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::CancelledByUser => EXIT_CANCELLED,
            _ => 1,
        }
    }

    /// The error followed by its sources, on one line.
    pub fn chain(&self) -> Chain<'_> {
        Chain(self)
    }
}

pub struct Chain<'a>(&'a ScaffoldError);

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = StdError::source(self.0);
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }
        Ok(())
    }
}
