//! Drizzle ORM files: drizzle.config.ts and the table schema.

use std::path::PathBuf;

use create_kyrix_core::{GeneratedFile, SqlEngine};

/// Path of the Drizzle schema, relative to the project root.
pub const SCHEMA_PATH: &str = "src/server/db/schema.ts";

/// drizzle.config.ts, read by drizzle-kit.
pub struct DrizzleConfig {
    engine: SqlEngine,
}

impl DrizzleConfig {
    pub fn new(engine: SqlEngine) -> Self {
        Self { engine }
    }

    fn default_port(&self) -> u16 {
        match self.engine {
            SqlEngine::Postgres => 5432,
            SqlEngine::MySql => 3306,
        }
    }
}

impl GeneratedFile for DrizzleConfig {
    fn path(&self) -> PathBuf {
        PathBuf::from("drizzle.config.ts")
    }

    fn render(&self) -> String {
        format!(
            r#"import {{ defineConfig }} from 'drizzle-kit';

export default defineConfig({{
  schema: './{schema}',
  out: './migrations',
  dialect: '{dialect}',
  dbCredentials: {{
    host: process.env.DB_HOST!,
    port: Number(process.env.DB_PORT ?? {port}),
    user: process.env.DB_USER!,
    password: process.env.DB_PASSWORD!,
    database: process.env.DB_NAME!,
  }},
  verbose: true,
  strict: true,
}});
"#,
            schema = SCHEMA_PATH,
            dialect = self.engine.provider(),
            port = self.default_port(),
        )
    }
}

/// src/server/db/schema.ts with a sample `products` table.
pub struct DrizzleSchema {
    engine: SqlEngine,
}

impl DrizzleSchema {
    pub fn new(engine: SqlEngine) -> Self {
        Self { engine }
    }
}

impl GeneratedFile for DrizzleSchema {
    fn path(&self) -> PathBuf {
        PathBuf::from(SCHEMA_PATH)
    }

    fn render(&self) -> String {
        match self.engine {
            SqlEngine::Postgres => r#"import { pgTable, serial, text, timestamp, varchar } from 'drizzle-orm/pg-core';

export const products = pgTable('products', {
  id: serial('id').primaryKey(),
  createdAt: timestamp('created_at').defaultNow(),
  title: varchar('title', { length: 255 }).notNull(),
  description: text('description').notNull(),
});
"#
            .to_string(),
            SqlEngine::MySql => r#"import { int, mysqlTable, text, timestamp, varchar } from 'drizzle-orm/mysql-core';

export const products = mysqlTable('products', {
  id: int('id').autoincrement().primaryKey(),
  createdAt: timestamp('created_at').defaultNow(),
  title: varchar('title', { length: 255 }).notNull(),
  description: text('description').notNull(),
});
"#
            .to_string(),
        }
    }
}
