//! src/server/trpc/trpc.ts generator.

use std::path::PathBuf;

use create_kyrix_core::{GeneratedFile, SqlEngine};

/// Database client type carried by the tRPC context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextDb {
    Prisma,
    Drizzle(SqlEngine),
}

/// tRPC initialisation and request context.
pub struct TrpcTs {
    db: ContextDb,
}

impl TrpcTs {
    pub fn new(db: ContextDb) -> Self {
        Self { db }
    }

    fn db_imports(&self) -> &'static str {
        match self.db {
            ContextDb::Prisma => "import type { PrismaClientSingleton } from '../connect.db';",
            ContextDb::Drizzle(SqlEngine::Postgres) => {
                "import type { PostgresJsDatabase } from 'drizzle-orm/postgres-js';\nimport * as schema from '../db/schema';"
            }
            ContextDb::Drizzle(SqlEngine::MySql) => {
                "import type { MySql2Database } from 'drizzle-orm/mysql2';\nimport * as schema from '../db/schema';"
            }
        }
    }

    fn db_type(&self) -> &'static str {
        match self.db {
            ContextDb::Prisma => "PrismaClientSingleton",
            ContextDb::Drizzle(SqlEngine::Postgres) => "PostgresJsDatabase<typeof schema>",
            ContextDb::Drizzle(SqlEngine::MySql) => "MySql2Database<typeof schema>",
        }
    }
}

impl GeneratedFile for TrpcTs {
    fn path(&self) -> PathBuf {
        PathBuf::from("src")
            .join("server")
            .join("trpc")
            .join("trpc.ts")
    }

    fn render(&self) -> String {
        format!(
            r#"import {{ initTRPC }} from '@trpc/server';
import type {{ CreateHTTPContextOptions }} from '@trpc/server/adapters/standalone';
import {{ serverEnv as env, type ServerEnv }} from '../env';
import {{ z }} from 'zod';
import superJSON from 'superjson';
{db_imports}

export const createTRPCContext = async ({{
  req,
  res,
  serverEnv: env,
  db,
}}: CreateHTTPContextOptions & {{
  serverEnv: ServerEnv;
  db: {db_type};
}}) => {{
  return {{ req, res, env, db }};
}};

const t = initTRPC.context<TRPCContext>().create({{
  errorFormatter: ({{ shape, error }}) => {{
    return {{
      ...shape,
      data: {{
        ...shape.data,
        // Stack traces are stripped in production.
        stack: env.NODE_ENV !== 'production' ? shape.data.stack : undefined,
        zodError: error.cause instanceof z.ZodError ? error.cause.flatten() : null,
      }},
    }};
  }},
  isDev: env.NODE_ENV !== 'production',
  transformer: superJSON,
}});

export const router = t.router;
export const publicProcedure = t.procedure;

export type TRPCContext = Awaited<ReturnType<typeof createTRPCContext>>;
"#,
            db_imports = self.db_imports(),
            db_type = self.db_type(),
        )
    }
}
