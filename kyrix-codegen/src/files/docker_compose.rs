//! src/docker/docker-compose.yml generator.

use std::path::PathBuf;

use create_kyrix_core::{GeneratedFile, SqlEngine};

/// Database container to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Sql(SqlEngine),
    Mongo,
}

/// An environment entry whose value Compose interpolates from the host
/// environment, falling back to `default`.
struct EnvVar {
    name: &'static str,
    default: &'static str,
}

const fn var(name: &'static str, default: &'static str) -> EnvVar {
    EnvVar { name, default }
}

struct ServiceSpec {
    image: &'static str,
    container_name: &'static str,
    environment: &'static [EnvVar],
    port: u16,
    data_dir: &'static str,
}

static POSTGRES: ServiceSpec = ServiceSpec {
    image: "postgres:latest",
    container_name: "postgres",
    environment: &[
        var("POSTGRES_USER", "user"),
        var("POSTGRES_PASSWORD", "password"),
        var("POSTGRES_DB", "mydb"),
    ],
    port: 5432,
    data_dir: "/var/lib/postgresql/data",
};

static MYSQL: ServiceSpec = ServiceSpec {
    image: "mysql:latest",
    container_name: "mysql",
    environment: &[
        var("MYSQL_ROOT_PASSWORD", "password"),
        var("MYSQL_DATABASE", "mydb"),
        var("MYSQL_USER", "user"),
        var("MYSQL_PASSWORD", "password"),
    ],
    port: 3306,
    data_dir: "/var/lib/mysql",
};

static MONGO: ServiceSpec = ServiceSpec {
    image: "mongo:latest",
    container_name: "mongo",
    environment: &[
        var("MONGO_INITDB_ROOT_USERNAME", "root"),
        var("MONGO_INITDB_ROOT_PASSWORD", "password"),
    ],
    port: 27017,
    data_dir: "/data/db",
};

/// Docker Compose file running the database on the `kyrix-network` bridge.
pub struct DockerCompose {
    service: Service,
}

impl DockerCompose {
    pub fn new(service: Service) -> Self {
        Self { service }
    }

    fn spec(&self) -> &'static ServiceSpec {
        match self.service {
            Service::Sql(SqlEngine::Postgres) => &POSTGRES,
            Service::Sql(SqlEngine::MySql) => &MYSQL,
            Service::Mongo => &MONGO,
        }
    }
}

impl GeneratedFile for DockerCompose {
    fn path(&self) -> PathBuf {
        PathBuf::from("src")
            .join("docker")
            .join("docker-compose.yml")
    }

    fn render(&self) -> String {
        let spec = self.spec();
        let environment: String = spec
            .environment
            .iter()
            .map(|v| format!("      {}: ${{{}:-{}}}\n", v.name, v.name, v.default))
            .collect();

        format!(
            r#"services:
  db:
    image: {image}
    container_name: {container}
    restart: unless-stopped
    environment:
{environment}    ports:
      - "{port}:{port}"
    volumes:
      - db-data:{data_dir}
    networks:
      - kyrix-network

volumes:
  db-data:

networks:
  kyrix-network:
    driver: bridge
"#,
            image = spec.image,
            container = spec.container_name,
            port = spec.port,
            data_dir = spec.data_dir,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_interpolates_with_defaults() {
        let content = DockerCompose::new(Service::Mongo).render();
        assert!(content.contains("      MONGO_INITDB_ROOT_USERNAME: ${MONGO_INITDB_ROOT_USERNAME:-root}\n"));
        assert!(content.contains("\"27017:27017\""));
    }

    #[test]
    fn test_environment_block_indentation() {
        let content = DockerCompose::new(Service::Sql(SqlEngine::MySql)).render();
        assert!(content.contains(
            "    environment:\n      MYSQL_ROOT_PASSWORD: ${MYSQL_ROOT_PASSWORD:-password}\n"
        ));
        assert!(content.contains("      MYSQL_PASSWORD: ${MYSQL_PASSWORD:-password}\n    ports:\n"));
    }
}
