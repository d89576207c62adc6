use create_kyrix_core::Database;
use thiserror::Error;

use crate::TemplateKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A template was requested for a database it does not apply to.
    #[error("no {kind} template exists for database '{database}'")]
    UnsupportedVariant {
        kind: TemplateKind,
        database: Database,
    },

    /// The registry cannot satisfy every generation plan.
    #[error("template registry is incomplete, missing: {}", format_missing(.missing))]
    MissingTemplates {
        missing: Vec<(TemplateKind, Database)>,
    },
}

fn format_missing(missing: &[(TemplateKind, Database)]) -> String {
    missing
        .iter()
        .map(|(kind, database)| format!("{kind} for {database}"))
        .collect::<Vec<_>>()
        .join(", ")
}
