//! Dependency and script entries each choice adds to package.json.

use create_kyrix_core::{Choice, Database, Orm, PackageManager, SqlEngine};
use create_kyrix_manifest::Additions;
use serde::Deserialize;

const PRISMA: &str = "^5.19.1";
const DRIZZLE_ORM: &str = "^0.33.0";
const DRIZZLE_KIT: &str = "^0.24.2";
const PG: &str = "^8.11.5";
const PG_TYPES: &str = "^8.11.6";
const POSTGRES_JS: &str = "^3.4.4";
const MYSQL2: &str = "^3.11.2";
const MONGOOSE: &str = "^7.0.0";

const TAILWINDCSS: &str = "^3.4.11";
const POSTCSS: &str = "^8.4.45";
const AUTOPREFIXER: &str = "^10.4.20";

/// Version ranges of the Kyrix packages for registry-based managers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Versions {
    pub kyrix_react: String,
    pub kyrix_server: String,
}

impl Default for Versions {
    fn default() -> Self {
        Self {
            kyrix_react: "latest".to_string(),
            kyrix_server: "latest".to_string(),
        }
    }
}

/// Everything the choice adds to the template's package.json.
pub fn additions_for(choice: &Choice, versions: &Versions) -> Additions {
    let mut additions = database(choice.database);
    if choice.use_tailwind {
        additions.extend(tailwind());
    }
    additions.extend(kyrix(choice.package_manager, versions));
    additions
}

fn database(database: Database) -> Additions {
    match database {
        Database::None => Additions::new(),
        Database::Sql {
            orm: Orm::Prisma, ..
        } => Additions::new()
            .with_dependency("@prisma/client", PRISMA)
            .with_dev_dependency("prisma", PRISMA)
            .with_script("db:migrate", "prisma migrate dev")
            .with_script("db:push", "prisma db push")
            .with_script("db:studio", "prisma studio"),
        Database::Sql {
            engine,
            orm: Orm::Drizzle,
        } => {
            let additions = Additions::new().with_dependency("drizzle-orm", DRIZZLE_ORM);
            let additions = match engine {
                SqlEngine::Postgres => additions.with_dependency("postgres", POSTGRES_JS),
                SqlEngine::MySql => additions.with_dependency("mysql2", MYSQL2),
            };
            additions
                .with_dev_dependency("drizzle-kit", DRIZZLE_KIT)
                .with_script(
                    "db:generate",
                    "drizzle-kit generate --config=drizzle.config.ts",
                )
                .with_script("db:push", "drizzle-kit push --config=drizzle.config.ts")
                .with_script("db:studio", "drizzle-kit studio")
        }
        Database::Sql {
            engine: SqlEngine::Postgres,
            orm: Orm::None,
        } => Additions::new()
            .with_dependency("pg", PG)
            .with_dev_dependency("@types/pg", PG_TYPES),
        Database::Sql {
            engine: SqlEngine::MySql,
            orm: Orm::None,
        } => Additions::new().with_dependency("mysql2", MYSQL2),
        Database::MongoDb => Additions::new().with_dependency("mongoose", MONGOOSE),
    }
}

fn tailwind() -> Additions {
    Additions::new()
        .with_dev_dependency("tailwindcss", TAILWINDCSS)
        .with_dev_dependency("postcss", POSTCSS)
        .with_dev_dependency("autoprefixer", AUTOPREFIXER)
}

fn kyrix(package_manager: PackageManager, versions: &Versions) -> Additions {
    if package_manager.uses_workspace_protocol() {
        Additions::new()
            .with_dependency("@kyrix/react", "workspace:*")
            .with_dependency("@kyrix/server", "workspace:*")
    } else {
        Additions::new()
            .with_dependency("@kyrix/react", versions.kyrix_react.as_str())
            .with_dependency("@kyrix/server", versions.kyrix_server.as_str())
    }
}
