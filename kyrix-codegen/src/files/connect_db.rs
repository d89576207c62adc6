//! src/server/connect.db.ts generator.

use std::path::PathBuf;

use create_kyrix_core::{GeneratedFile, SqlEngine};

/// How the server reaches its database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// Prisma client kept as a singleton across hot reloads.
    Prisma,
    /// Drizzle on top of postgres-js or mysql2.
    Drizzle(SqlEngine),
    /// A bare driver pool, no ORM.
    Driver(SqlEngine),
    /// Mongoose connection.
    Mongoose,
}

/// The database connection module.
pub struct ConnectDb {
    connector: Connector,
}

impl ConnectDb {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }
}

impl GeneratedFile for ConnectDb {
    fn path(&self) -> PathBuf {
        PathBuf::from("src").join("server").join("connect.db.ts")
    }

    fn render(&self) -> String {
        let content = match self.connector {
            Connector::Prisma => PRISMA,
            Connector::Drizzle(SqlEngine::Postgres) => DRIZZLE_POSTGRES,
            Connector::Drizzle(SqlEngine::MySql) => DRIZZLE_MYSQL,
            Connector::Driver(SqlEngine::Postgres) => DRIVER_POSTGRES,
            Connector::Driver(SqlEngine::MySql) => DRIVER_MYSQL,
            Connector::Mongoose => MONGOOSE,
        };
        content.to_string()
    }
}

const PRISMA: &str = r#"import { PrismaClient } from '@prisma/client';

const prismaClientSingleton = () => {
  return new PrismaClient();
};

export type PrismaClientSingleton = ReturnType<typeof prismaClientSingleton>;

const globalForPrisma = globalThis as unknown as {
  prisma: PrismaClientSingleton | undefined;
};

const prisma = globalForPrisma.prisma ?? prismaClientSingleton();

export default prisma;

if (process.env.NODE_ENV !== 'production') globalForPrisma.prisma = prisma;
"#;

const DRIZZLE_POSTGRES: &str = r#"import { drizzle } from 'drizzle-orm/postgres-js';
import postgres from 'postgres';
import * as schema from './db/schema';

const client = postgres({
  host: process.env.DB_HOST,
  port: Number(process.env.DB_PORT ?? 5432),
  username: process.env.DB_USER,
  password: process.env.DB_PASSWORD,
  database: process.env.DB_NAME,
});

export const db = drizzle(client, { schema });
"#;

const DRIZZLE_MYSQL: &str = r#"import { drizzle } from 'drizzle-orm/mysql2';
import mysql from 'mysql2/promise';
import * as schema from './db/schema';

const connection = await mysql.createConnection({
  host: process.env.DB_HOST,
  port: Number(process.env.DB_PORT ?? 3306),
  user: process.env.DB_USER,
  password: process.env.DB_PASSWORD,
  database: process.env.DB_NAME,
});

export const db = drizzle(connection, { schema, mode: 'default' });
"#;

const DRIVER_POSTGRES: &str = r#"import pg from 'pg';

const pool = new pg.Pool({
  connectionString: process.env.DATABASE_URL,
});

export default pool;
"#;

const DRIVER_MYSQL: &str = r#"import mysql from 'mysql2/promise';

const pool = mysql.createPool({
  uri: process.env.DATABASE_URL,
});

export default pool;
"#;

const MONGOOSE: &str = r#"import mongoose from 'mongoose';

const connectDB = async () => {
  try {
    const conn = await mongoose.connect(process.env.MONGO_URI || '');
    console.log('MongoDB connected:', conn.connection.host);
  } catch (error) {
    console.error('MongoDB connection error:', error);
    process.exit(1);
  }
};

export default connectDB;
"#;
