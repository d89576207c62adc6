//! Generated project files.

mod connect_db;
mod docker_compose;
mod drizzle;
mod main_ts;
mod prisma_schema;
mod tailwind;
mod trpc_ts;

pub use connect_db::{ConnectDb, Connector};
pub use docker_compose::{DockerCompose, Service};
pub use drizzle::{DrizzleConfig, DrizzleSchema};
pub use main_ts::{MainTs, ServerDb};
pub use prisma_schema::PrismaSchema;
pub use tailwind::{GlobalsCss, PostcssConfig, TailwindConfig, TsConfigNode, ViteConfig};
pub use trpc_ts::{ContextDb, TrpcTs};

/// Files of the optional Tailwind CSS setup.
pub fn tailwind_files() -> Vec<Box<dyn create_kyrix_core::GeneratedFile>> {
    tailwind::files()
}
