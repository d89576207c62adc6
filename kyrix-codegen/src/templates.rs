//! Template registry mapping a (kind, database) pair to its generator.
//!
//! Every supported cell is registered up front by [`TemplateRegistry::builtin`];
//! asking for any other pair is an [`Error::UnsupportedVariant`]. The registry
//! can check itself against every generation plan with
//! [`TemplateRegistry::validate`], which the CLI does before writing anything.

use std::fmt;

use create_kyrix_core::{Database, FileEntry, GeneratedFile, Orm};
use indexmap::IndexMap;

use crate::{
    Error, Result,
    files::{
        ConnectDb, Connector, ContextDb, DockerCompose, DrizzleConfig, DrizzleSchema, MainTs,
        PrismaSchema, ServerDb, Service, TrpcTs,
    },
    plan::required_kinds,
};

/// The kinds of file a database setup can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateKind {
    /// ORM tool configuration (drizzle.config.ts)
    OrmConfig,
    /// Data model (schema.prisma or Drizzle tables)
    Schema,
    /// Database connection module
    DbConnector,
    /// tRPC context typed with the database client
    TrpcContext,
    /// HTTP server entry point
    ServerBootstrap,
    /// Docker Compose file for the database
    DockerCompose,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 6] = [
        TemplateKind::OrmConfig,
        TemplateKind::Schema,
        TemplateKind::DbConnector,
        TemplateKind::TrpcContext,
        TemplateKind::ServerBootstrap,
        TemplateKind::DockerCompose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::OrmConfig => "orm config",
            TemplateKind::Schema => "schema",
            TemplateKind::DbConnector => "db connector",
            TemplateKind::TrpcContext => "trpc context",
            TemplateKind::ServerBootstrap => "server bootstrap",
            TemplateKind::DockerCompose => "docker compose",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds the file of one kind for a database, if that pair is supported.
type Template = fn(Database) -> Option<Box<dyn GeneratedFile>>;

const BUILTIN: [(TemplateKind, Template); 6] = [
    (TemplateKind::OrmConfig, orm_config),
    (TemplateKind::Schema, schema),
    (TemplateKind::DbConnector, db_connector),
    (TemplateKind::TrpcContext, trpc_context),
    (TemplateKind::ServerBootstrap, server_bootstrap),
    (TemplateKind::DockerCompose, docker_compose),
];

/// Registry of generators keyed by template kind and database.
#[derive(Default)]
pub struct TemplateRegistry {
    templates: IndexMap<(TemplateKind, Database), Box<dyn GeneratedFile>>,
}

impl TemplateRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in template.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (kind, template) in BUILTIN {
            for database in Database::ALL {
                if let Some(file) = template(database) {
                    registry.templates.insert((kind, database), file);
                }
            }
        }
        registry
    }

    /// Register a generator, replacing any previous one for the same pair.
    pub fn register(
        &mut self,
        kind: TemplateKind,
        database: Database,
        file: impl GeneratedFile + 'static,
    ) {
        self.templates.insert((kind, database), Box::new(file));
    }

    /// Check whether a pair is supported.
    pub fn contains(&self, kind: TemplateKind, database: Database) -> bool {
        self.templates.contains_key(&(kind, database))
    }

    /// Get the number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Look up the generator for a pair.
    pub fn get(&self, kind: TemplateKind, database: Database) -> Result<&dyn GeneratedFile> {
        self.templates
            .get(&(kind, database))
            .map(|file| file.as_ref())
            .ok_or(Error::UnsupportedVariant { kind, database })
    }

    /// Render the text of one file.
    pub fn generate(&self, kind: TemplateKind, database: Database) -> Result<String> {
        Ok(self.get(kind, database)?.render())
    }

    /// Render one file together with its path.
    pub fn entry(&self, kind: TemplateKind, database: Database) -> Result<FileEntry> {
        Ok(self.get(kind, database)?.entry())
    }

    /// Verify that every kind any plan can ask for is registered.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<_> = Database::ALL
            .into_iter()
            .flat_map(|database| {
                required_kinds(database, true)
                    .into_iter()
                    .map(move |kind| (kind, database))
            })
            .filter(|(kind, database)| !self.contains(*kind, *database))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingTemplates { missing })
        }
    }
}

fn orm_config(database: Database) -> Option<Box<dyn GeneratedFile>> {
    match database {
        Database::Sql {
            engine,
            orm: Orm::Drizzle,
        } => Some(Box::new(DrizzleConfig::new(engine))),
        Database::Sql {
            orm: Orm::Prisma | Orm::None,
            ..
        }
        | Database::None
        | Database::MongoDb => None,
    }
}

fn schema(database: Database) -> Option<Box<dyn GeneratedFile>> {
    match database {
        Database::Sql {
            engine,
            orm: Orm::Prisma,
        } => Some(Box::new(PrismaSchema::new(engine))),
        Database::Sql {
            engine,
            orm: Orm::Drizzle,
        } => Some(Box::new(DrizzleSchema::new(engine))),
        Database::Sql { orm: Orm::None, .. } | Database::None | Database::MongoDb => None,
    }
}

fn db_connector(database: Database) -> Option<Box<dyn GeneratedFile>> {
    let connector = match database {
        Database::Sql {
            orm: Orm::Prisma, ..
        } => Connector::Prisma,
        Database::Sql {
            engine,
            orm: Orm::Drizzle,
        } => Connector::Drizzle(engine),
        Database::Sql {
            engine,
            orm: Orm::None,
        } => Connector::Driver(engine),
        Database::MongoDb => Connector::Mongoose,
        Database::None => return None,
    };
    Some(Box::new(ConnectDb::new(connector)))
}

fn trpc_context(database: Database) -> Option<Box<dyn GeneratedFile>> {
    match database {
        Database::Sql {
            orm: Orm::Prisma, ..
        } => Some(Box::new(TrpcTs::new(ContextDb::Prisma))),
        Database::Sql {
            engine,
            orm: Orm::Drizzle,
        } => Some(Box::new(TrpcTs::new(ContextDb::Drizzle(engine)))),
        Database::Sql { orm: Orm::None, .. } | Database::None | Database::MongoDb => None,
    }
}

fn server_bootstrap(database: Database) -> Option<Box<dyn GeneratedFile>> {
    let db = match database {
        Database::Sql {
            orm: Orm::Prisma, ..
        } => ServerDb::Prisma,
        Database::Sql {
            orm: Orm::Drizzle, ..
        } => ServerDb::Drizzle,
        Database::MongoDb => ServerDb::Mongoose,
        Database::Sql { orm: Orm::None, .. } | Database::None => return None,
    };
    Some(Box::new(MainTs::new(db)))
}

fn docker_compose(database: Database) -> Option<Box<dyn GeneratedFile>> {
    let service = match database {
        Database::Sql { engine, .. } => Service::Sql(engine),
        Database::MongoDb => Service::Mongo,
        Database::None => return None,
    };
    Some(Box::new(DockerCompose::new(service)))
}
