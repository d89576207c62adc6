//! prisma/schema.prisma generator.

use std::path::PathBuf;

use create_kyrix_core::{GeneratedFile, SqlEngine};

/// The Prisma schema with its datasource and a sample model.
pub struct PrismaSchema {
    engine: SqlEngine,
}

impl PrismaSchema {
    pub fn new(engine: SqlEngine) -> Self {
        Self { engine }
    }
}

impl GeneratedFile for PrismaSchema {
    fn path(&self) -> PathBuf {
        PathBuf::from("prisma").join("schema.prisma")
    }

    fn render(&self) -> String {
        format!(
            r#"datasource db {{
  provider = "{}"
  url      = env("DATABASE_URL")
}}

generator client {{
  provider = "prisma-client-js"
}}

model Product {{
  id        String   @id @default(cuid())
  createdAt DateTime @default(now())
  title     String
  desc      String
}}
"#,
            self.engine.provider()
        )
    }
}
