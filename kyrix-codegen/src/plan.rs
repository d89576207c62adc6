//! Which files a choice produces.

use create_kyrix_core::{Choice, Database, FileEntry, Orm};

use crate::{Result, TemplateKind, TemplateRegistry, files};

/// Template kinds needed for a database, in generation order.
pub fn required_kinds(database: Database, docker: bool) -> Vec<TemplateKind> {
    use TemplateKind::*;

    let mut kinds = match database {
        Database::None => vec![],
        Database::Sql {
            orm: Orm::Prisma, ..
        } => vec![Schema, DbConnector, TrpcContext, ServerBootstrap],
        Database::Sql {
            orm: Orm::Drizzle, ..
        } => vec![OrmConfig, Schema, DbConnector, TrpcContext, ServerBootstrap],
        Database::Sql { orm: Orm::None, .. } => vec![DbConnector],
        Database::MongoDb => vec![DbConnector, ServerBootstrap],
    };
    if docker && !database.is_none() {
        kinds.push(DockerCompose);
    }
    kinds
}

/// The generation plan for one scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    database: Database,
    kinds: Vec<TemplateKind>,
    tailwind: bool,
}

impl Plan {
    pub fn for_choice(choice: &Choice) -> Self {
        Self {
            database: choice.database,
            kinds: required_kinds(choice.database, choice.wants_docker()),
            tailwind: choice.use_tailwind,
        }
    }

    pub fn database(&self) -> Database {
        self.database
    }

    pub fn kinds(&self) -> &[TemplateKind] {
        &self.kinds
    }

    pub fn includes_tailwind(&self) -> bool {
        self.tailwind
    }

    /// Render every planned file.
    pub fn render(&self, registry: &TemplateRegistry) -> Result<Vec<FileEntry>> {
        let mut entries = self
            .kinds
            .iter()
            .map(|kind| registry.entry(*kind, self.database))
            .collect::<Result<Vec<_>>>()?;

        if self.tailwind {
            entries.extend(files::tailwind_files().iter().map(|file| file.entry()));
        }

        Ok(entries)
    }
}
