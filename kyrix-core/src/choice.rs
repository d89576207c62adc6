//! The choices a user makes while scaffolding a project.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Database engine as answered at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseEngine {
    None,
    PostgreSql,
    MySql,
    MongoDb,
}

impl DatabaseEngine {
    pub const ALL: [DatabaseEngine; 4] = [
        DatabaseEngine::None,
        DatabaseEngine::PostgreSql,
        DatabaseEngine::MySql,
        DatabaseEngine::MongoDb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseEngine::None => "none",
            DatabaseEngine::PostgreSql => "postgresql",
            DatabaseEngine::MySql => "mysql",
            DatabaseEngine::MongoDb => "mongodb",
        }
    }

    /// Human readable label used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            DatabaseEngine::None => "None",
            DatabaseEngine::PostgreSql => "PostgreSQL",
            DatabaseEngine::MySql => "MySQL",
            DatabaseEngine::MongoDb => "MongoDB (Mongoose)",
        }
    }

    /// Whether an ORM can be chosen for this engine.
    pub fn supports_orm(&self) -> bool {
        matches!(self, DatabaseEngine::PostgreSql | DatabaseEngine::MySql)
    }
}

impl fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatabaseEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(DatabaseEngine::None),
            "postgresql" | "postgres" | "pg" => Ok(DatabaseEngine::PostgreSql),
            "mysql" => Ok(DatabaseEngine::MySql),
            "mongodb" | "mongo" => Ok(DatabaseEngine::MongoDb),
            _ => Err(format!(
                "unknown database '{}', expected one of: none, postgresql, mysql, mongodb",
                s
            )),
        }
    }
}

/// Object-relational mapper for SQL engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orm {
    None,
    Prisma,
    Drizzle,
}

impl Orm {
    pub const ALL: [Orm; 3] = [Orm::None, Orm::Prisma, Orm::Drizzle];

    pub fn as_str(&self) -> &'static str {
        match self {
            Orm::None => "none",
            Orm::Prisma => "prisma",
            Orm::Drizzle => "drizzle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Orm::None => "None (plain driver)",
            Orm::Prisma => "Prisma",
            Orm::Drizzle => "Drizzle",
        }
    }
}

impl fmt::Display for Orm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Orm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Orm::None),
            "prisma" => Ok(Orm::Prisma),
            "drizzle" => Ok(Orm::Drizzle),
            _ => Err(format!(
                "unknown orm '{}', expected one of: none, prisma, drizzle",
                s
            )),
        }
    }
}

/// SQL engines, the only ones an ORM applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlEngine {
    Postgres,
    MySql,
}

impl SqlEngine {
    /// Provider name shared by Prisma datasources and Drizzle dialects.
    pub fn provider(&self) -> &'static str {
        match self {
            SqlEngine::Postgres => "postgresql",
            SqlEngine::MySql => "mysql",
        }
    }
}

/// The database setup of a project, normalized so that an ORM only exists
/// alongside a SQL engine.
///
/// This is the variant every content generator is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Database {
    None,
    Sql { engine: SqlEngine, orm: Orm },
    MongoDb,
}

impl Database {
    /// Every representable variant.
    pub const ALL: [Database; 8] = [
        Database::None,
        Database::Sql {
            engine: SqlEngine::Postgres,
            orm: Orm::None,
        },
        Database::Sql {
            engine: SqlEngine::Postgres,
            orm: Orm::Prisma,
        },
        Database::Sql {
            engine: SqlEngine::Postgres,
            orm: Orm::Drizzle,
        },
        Database::Sql {
            engine: SqlEngine::MySql,
            orm: Orm::None,
        },
        Database::Sql {
            engine: SqlEngine::MySql,
            orm: Orm::Prisma,
        },
        Database::Sql {
            engine: SqlEngine::MySql,
            orm: Orm::Drizzle,
        },
        Database::MongoDb,
    ];

    /// Build from flat prompt answers. The ORM is dropped for engines that
    /// cannot use one.
    pub fn from_parts(engine: DatabaseEngine, orm: Orm) -> Self {
        match engine {
            DatabaseEngine::None => Database::None,
            DatabaseEngine::PostgreSql => Database::Sql {
                engine: SqlEngine::Postgres,
                orm,
            },
            DatabaseEngine::MySql => Database::Sql {
                engine: SqlEngine::MySql,
                orm,
            },
            DatabaseEngine::MongoDb => Database::MongoDb,
        }
    }

    pub fn engine(&self) -> DatabaseEngine {
        match self {
            Database::None => DatabaseEngine::None,
            Database::Sql {
                engine: SqlEngine::Postgres,
                ..
            } => DatabaseEngine::PostgreSql,
            Database::Sql {
                engine: SqlEngine::MySql,
                ..
            } => DatabaseEngine::MySql,
            Database::MongoDb => DatabaseEngine::MongoDb,
        }
    }

    pub fn orm(&self) -> Orm {
        match self {
            Database::Sql { orm, .. } => *orm,
            Database::None | Database::MongoDb => Orm::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Database::None)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Database::Sql {
                orm: Orm::Prisma | Orm::Drizzle,
                ..
            } => write!(f, "{}+{}", self.engine(), self.orm()),
            _ => write!(f, "{}", self.engine()),
        }
    }
}

/// JavaScript package manager used to install the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Probe order when looking for installed managers.
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Pnpm,
        PackageManager::Npm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Command that installs the project's dependencies.
    pub fn install_command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm install",
            PackageManager::Pnpm => "pnpm install",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun install",
        }
    }

    /// Command that runs a package.json script.
    pub fn run_command(&self, script: &str) -> String {
        format!("{} run {}", self.as_str(), script)
    }

    /// pnpm and bun link local packages through the `workspace:` protocol.
    pub fn uses_workspace_protocol(&self) -> bool {
        matches!(self, PackageManager::Pnpm | PackageManager::Bun)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            _ => Err(format!(
                "unknown package manager '{}', expected one of: npm, pnpm, yarn, bun",
                s
            )),
        }
    }
}

/// Where the project is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The current working directory (`.` or `./`). Never deleted on cleanup.
    CurrentDir(PathBuf),
    /// A new directory that must not exist yet.
    NewDir(PathBuf),
}

impl Target {
    /// Resolve a project name relative to `cwd`.
    pub fn resolve(name: &str, cwd: &Path) -> Self {
        match name {
            "." | "./" => Target::CurrentDir(cwd.to_path_buf()),
            _ => Target::NewDir(cwd.join(name)),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Target::CurrentDir(path) | Target::NewDir(path) => path,
        }
    }

    pub fn is_current_dir(&self) -> bool {
        matches!(self, Target::CurrentDir(_))
    }
}

/// Every decision needed to scaffold one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub target: Target,
    pub database: Database,
    pub use_docker: bool,
    pub use_tailwind: bool,
    pub package_manager: PackageManager,
}

impl Choice {
    /// Docker Compose is only generated when there is a database to run.
    pub fn wants_docker(&self) -> bool {
        self.use_docker && !self.database.is_none()
    }
}
