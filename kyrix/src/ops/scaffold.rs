//! Scaffold operation - fetch the template and adapt it to a choice.

use create_kyrix_codegen::{Plan, TemplateRegistry, Versions, additions_for};
use create_kyrix_core::{Choice, Target, write_all};
use create_kyrix_manifest::merge_manifest;
use log::debug;

use crate::{
    cleanup::{ArmedTarget, CleanupGuard},
    error::ScaffoldError,
    fetch::TemplateSource,
    reports::{PreviewReport, ScaffoldReport},
};

/// Options for the scaffold operation.
pub struct ScaffoldOptions<'a> {
    /// Git URL of the base template.
    pub template_url: &'a str,
    /// Versions of the Kyrix packages.
    pub versions: &'a Versions,
    /// Slot shared with the interrupt handler.
    pub armed: &'a ArmedTarget,
}

/// Execute the scaffold operation.
///
/// Nothing is touched when the target directory already exists. Once the
/// template has been fetched, any failure removes the new directory again;
/// the current directory is never removed.
pub fn scaffold(
    choice: &Choice,
    opts: &ScaffoldOptions,
    source: &dyn TemplateSource,
    registry: &TemplateRegistry,
) -> Result<ScaffoldReport, ScaffoldError> {
    ensure_target_free(&choice.target)?;

    let plan = Plan::for_choice(choice);
    let entries = plan.render(registry)?;
    let additions = additions_for(choice, opts.versions);

    let root = choice.target.path();
    let guard = CleanupGuard::arm(choice.target.clone(), opts.armed);

    source.fetch(opts.template_url, root)?;

    let stats = write_all(root, &entries)?;
    for path in &stats.written_paths {
        debug!("wrote {}", path.display());
    }

    let manifest = merge_manifest(root, &additions)?;
    debug!("merged dependencies into {}", manifest.display());

    guard.disarm();

    Ok(ScaffoldReport {
        next_steps: ScaffoldReport::next_steps(
            &choice.target,
            choice.package_manager,
            choice.wants_docker(),
        ),
        target: choice.target.clone(),
        database: choice.database,
        package_manager: choice.package_manager,
        files_written: stats.written_paths,
        manifest,
    })
}

/// Render what [`scaffold`] would produce without touching the filesystem.
pub fn preview(
    choice: &Choice,
    versions: &Versions,
    registry: &TemplateRegistry,
) -> Result<PreviewReport, ScaffoldError> {
    let files = Plan::for_choice(choice).render(registry)?;
    Ok(PreviewReport {
        target: choice.target.clone(),
        files,
        additions: additions_for(choice, versions),
    })
}

/// Fail with [`ScaffoldError::TargetExists`] if a new directory is taken.
pub fn ensure_target_free(target: &Target) -> Result<(), ScaffoldError> {
    match target {
        Target::NewDir(path) if path.exists() => Err(ScaffoldError::TargetExists {
            path: path.clone(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, fs, path::Path};

    use create_kyrix_core::{Database, DatabaseEngine, Orm, PackageManager};
    use serde_json::Value;
    use tempfile::TempDir;

    use super::*;
    use crate::error::ErrorKind;

    const TEMPLATE_PACKAGE_JSON: &str = r#"{
  "name": "kyrix",
  "private": true,
  "scripts": {
    "dev": "tsx src/server/main.ts"
  },
  "dependencies": {
    "react": "^18.3.1"
  }
}
"#;

    /// Lays down a minimal template, counting how often it was asked to.
    struct FakeTemplate {
        package_json: &'static str,
        fetched: Cell<usize>,
    }

    impl FakeTemplate {
        fn new(package_json: &'static str) -> Self {
            Self {
                package_json,
                fetched: Cell::new(0),
            }
        }
    }

    impl TemplateSource for FakeTemplate {
        fn fetch(&self, _url: &str, destination: &Path) -> Result<(), ScaffoldError> {
            self.fetched.set(self.fetched.get() + 1);
            fs::create_dir_all(destination.join("src/server")).unwrap();
            fs::write(destination.join("package.json"), self.package_json).unwrap();
            fs::write(destination.join("index.html"), "<div id=\"root\"></div>\n").unwrap();
            Ok(())
        }
    }

    /// Starts a clone, then fails.
    struct BrokenTemplate;

    impl TemplateSource for BrokenTemplate {
        fn fetch(&self, url: &str, destination: &Path) -> Result<(), ScaffoldError> {
            fs::create_dir_all(destination.join(".git")).unwrap();
            Err(ScaffoldError::TemplateFetch {
                url: url.to_string(),
                reason: "connection reset".to_string(),
            })
        }
    }

    fn choice(target: Target, engine: DatabaseEngine, orm: Orm, docker: bool) -> Choice {
        Choice {
            target,
            database: Database::from_parts(engine, orm),
            use_docker: docker,
            use_tailwind: false,
            package_manager: PackageManager::Npm,
        }
    }

    fn run(choice: &Choice, source: &dyn TemplateSource) -> Result<ScaffoldReport, ScaffoldError> {
        let versions = Versions::default();
        let armed = ArmedTarget::new();
        let opts = ScaffoldOptions {
            template_url: "https://example.com/kyrix.git",
            versions: &versions,
            armed: &armed,
        };
        let result = scaffold(choice, &opts, source, &TemplateRegistry::builtin());
        assert!(!armed.is_armed());
        result
    }

    fn package_json(dir: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(dir.join("package.json")).unwrap()).unwrap()
    }

    #[test]
    fn test_postgres_prisma_with_docker() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("kyrix-app");
        let choice = choice(
            Target::NewDir(dir.clone()),
            DatabaseEngine::PostgreSql,
            Orm::Prisma,
            true,
        );

        let report = run(&choice, &FakeTemplate::new(TEMPLATE_PACKAGE_JSON)).unwrap();

        let schema = fs::read_to_string(dir.join("prisma/schema.prisma")).unwrap();
        assert!(schema.contains("provider = \"postgresql\""));
        let compose = fs::read_to_string(dir.join("src/docker/docker-compose.yml")).unwrap();
        assert!(compose.contains("image: postgres:latest"));
        assert!(dir.join("src/server/connect.db.ts").is_file());
        assert!(dir.join("src/server/trpc/trpc.ts").is_file());
        assert!(dir.join("src/server/main.ts").is_file());
        assert!(!dir.join("drizzle.config.ts").exists());

        let manifest = package_json(&dir);
        assert_eq!(manifest["dependencies"]["@prisma/client"], "^5.19.1");
        assert_eq!(manifest["devDependencies"]["prisma"], "^5.19.1");
        assert_eq!(manifest["scripts"]["db:migrate"], "prisma migrate dev");
        assert_eq!(manifest["scripts"]["dev"], "tsx src/server/main.ts");
        assert_eq!(manifest["dependencies"]["react"], "^18.3.1");
        assert_eq!(manifest["name"], "kyrix");

        assert_eq!(report.files_written.len(), 5);
        assert_eq!(report.manifest, dir.join("package.json"));
        assert_eq!(
            report.next_steps.last().map(String::as_str),
            Some("npm run dev")
        );
    }

    #[test]
    fn test_mongodb() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("kyrix-app");
        let choice = choice(
            Target::NewDir(dir.clone()),
            DatabaseEngine::MongoDb,
            Orm::None,
            false,
        );

        run(&choice, &FakeTemplate::new(TEMPLATE_PACKAGE_JSON)).unwrap();

        let connector = fs::read_to_string(dir.join("src/server/connect.db.ts")).unwrap();
        assert!(connector.contains("mongoose.connect"));
        let main = fs::read_to_string(dir.join("src/server/main.ts")).unwrap();
        assert!(main.contains("connectDB();"));
        assert!(!dir.join("prisma").exists());
        assert!(!dir.join("src/docker").exists());
        assert_eq!(package_json(&dir)["dependencies"]["mongoose"], "^7.0.0");
    }

    #[test]
    fn test_existing_target_is_left_untouched() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("kyrix-app");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("notes.txt"), "keep me").unwrap();
        let source = FakeTemplate::new(TEMPLATE_PACKAGE_JSON);
        let choice = choice(
            Target::NewDir(dir.clone()),
            DatabaseEngine::PostgreSql,
            Orm::Drizzle,
            true,
        );

        let err = run(&choice, &source).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TargetExists);
        assert_eq!(source.fetched.get(), 0);
        assert_eq!(fs::read_to_string(dir.join("notes.txt")).unwrap(), "keep me");
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    }

    #[test]
    fn test_malformed_manifest_removes_new_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("kyrix-app");
        let choice = choice(
            Target::NewDir(dir.clone()),
            DatabaseEngine::MySql,
            Orm::Drizzle,
            false,
        );

        let err = run(&choice, &FakeTemplate::new("{ \"name\": ")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ManifestParse);
        assert!(!dir.exists());
    }

    #[test]
    fn test_failed_fetch_removes_new_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("kyrix-app");
        let choice = choice(
            Target::NewDir(dir.clone()),
            DatabaseEngine::None,
            Orm::None,
            false,
        );

        let err = run(&choice, &BrokenTemplate).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TemplateFetch);
        assert!(!dir.exists());
    }

    #[test]
    fn test_failure_never_removes_current_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "mine").unwrap();
        let choice = choice(
            Target::CurrentDir(temp.path().to_path_buf()),
            DatabaseEngine::PostgreSql,
            Orm::None,
            false,
        );

        let err = run(&choice, &FakeTemplate::new("[1, 2, 3]")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ManifestParse);
        assert!(temp.path().exists());
        assert_eq!(fs::read_to_string(temp.path().join("README.md")).unwrap(), "mine");
    }

    #[test]
    fn test_current_dir_scaffold() {
        let temp = TempDir::new().unwrap();
        let choice = choice(
            Target::CurrentDir(temp.path().to_path_buf()),
            DatabaseEngine::PostgreSql,
            Orm::None,
            false,
        );

        let report = run(&choice, &FakeTemplate::new(TEMPLATE_PACKAGE_JSON)).unwrap();

        assert_eq!(report.files_written.len(), 1);
        assert_eq!(report.next_steps, vec!["npm install", "npm run dev"]);
        let manifest = package_json(temp.path());
        assert_eq!(manifest["dependencies"]["pg"], "^8.11.5");
        assert_eq!(manifest["devDependencies"]["@types/pg"], "^8.11.6");
    }

    #[test]
    fn test_unsupported_variant_fails_before_fetch() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("kyrix-app");
        let source = FakeTemplate::new(TEMPLATE_PACKAGE_JSON);
        let choice = choice(
            Target::NewDir(dir.clone()),
            DatabaseEngine::MongoDb,
            Orm::None,
            false,
        );
        let versions = Versions::default();
        let armed = ArmedTarget::new();
        let opts = ScaffoldOptions {
            template_url: "https://example.com/kyrix.git",
            versions: &versions,
            armed: &armed,
        };

        let err = scaffold(&choice, &opts, &source, &TemplateRegistry::new()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnsupportedVariant);
        assert_eq!(source.fetched.get(), 0);
        assert!(!dir.exists());
    }

    #[test]
    fn test_preview_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("kyrix-app");
        let mut choice = choice(
            Target::NewDir(dir.clone()),
            DatabaseEngine::MySql,
            Orm::Drizzle,
            true,
        );
        choice.use_tailwind = true;

        let report = preview(&choice, &Versions::default(), &TemplateRegistry::builtin()).unwrap();

        assert!(!dir.exists());
        assert_eq!(report.files.len(), 11);
        assert_eq!(report.additions.dependencies["mysql2"], "^3.11.2");
        assert_eq!(report.additions.dev_dependencies["tailwindcss"], "^3.4.11");
    }
}
