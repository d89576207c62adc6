//! Interactive questions, and how flags and defaults pre-empt them.

use create_kyrix_core::{Choice, Database, DatabaseEngine, Orm, PackageManager, Target};
use dialoguer::{Confirm, Select, theme::ColorfulTheme};
use log::{debug, warn};

use crate::error::ScaffoldError;

/// Source of answers for questions not settled on the command line.
///
/// Every method returns [`ScaffoldError::CancelledByUser`] when the user
/// backs out of the question.
pub trait Prompter {
    fn select_database(&self) -> Result<DatabaseEngine, ScaffoldError>;
    fn select_orm(&self) -> Result<Orm, ScaffoldError>;
    fn confirm_docker(&self) -> Result<bool, ScaffoldError>;
    fn confirm_tailwind(&self) -> Result<bool, ScaffoldError>;
    fn select_package_manager(
        &self,
        available: &[PackageManager],
    ) -> Result<PackageManager, ScaffoldError>;
}

/// Terminal prompts.
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&self, prompt: &str, items: &[&str]) -> Result<usize, ScaffoldError> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?
            .ok_or(ScaffoldError::CancelledByUser)
    }

    fn confirm(&self, prompt: &str) -> Result<bool, ScaffoldError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact_opt()?
            .ok_or(ScaffoldError::CancelledByUser)
    }
}

impl Prompter for DialoguerPrompter {
    fn select_database(&self) -> Result<DatabaseEngine, ScaffoldError> {
        let labels: Vec<_> = DatabaseEngine::ALL.iter().map(|e| e.label()).collect();
        let index = self.select("Which database do you want to use?", &labels)?;
        Ok(DatabaseEngine::ALL[index])
    }

    fn select_orm(&self) -> Result<Orm, ScaffoldError> {
        let labels: Vec<_> = Orm::ALL.iter().map(|o| o.label()).collect();
        let index = self.select("Which ORM do you want to use?", &labels)?;
        Ok(Orm::ALL[index])
    }

    fn confirm_docker(&self) -> Result<bool, ScaffoldError> {
        self.confirm("Run the database with Docker?")
    }

    fn confirm_tailwind(&self) -> Result<bool, ScaffoldError> {
        self.confirm("Add Tailwind CSS?")
    }

    fn select_package_manager(
        &self,
        available: &[PackageManager],
    ) -> Result<PackageManager, ScaffoldError> {
        let labels: Vec<_> = available.iter().map(|pm| pm.as_str()).collect();
        let index = self.select("Which package manager do you want to use?", &labels)?;
        Ok(available[index])
    }
}

/// Answers known before any prompt: command-line flags and config.
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub database: Option<DatabaseEngine>,
    pub orm: Option<Orm>,
    pub docker: Option<bool>,
    pub tailwind: Option<bool>,
    pub package_manager: Option<PackageManager>,
    /// Manager used when prompts are skipped, if installed.
    pub preferred_manager: Option<PackageManager>,
    /// Answer every open question with its default instead of prompting.
    pub assume_defaults: bool,
}

impl Answers {
    fn ask<T>(
        &self,
        known: Option<T>,
        default: T,
        prompt: impl FnOnce() -> Result<T, ScaffoldError>,
    ) -> Result<T, ScaffoldError> {
        match known {
            Some(value) => Ok(value),
            None if self.assume_defaults => Ok(default),
            None => prompt(),
        }
    }
}

/// Settle every decision, asking only what `answers` leaves open.
///
/// `available` lists the installed package managers. An explicitly requested
/// manager must be among them.
pub fn complete_choice(
    target: Target,
    answers: &Answers,
    prompter: &dyn Prompter,
    available: &[PackageManager],
) -> Result<Choice, ScaffoldError> {
    let engine = answers.ask(answers.database, DatabaseEngine::None, || {
        prompter.select_database()
    })?;

    let orm = if engine.supports_orm() {
        answers.ask(answers.orm, Orm::None, || prompter.select_orm())?
    } else {
        if let Some(orm) = answers.orm.filter(|orm| *orm != Orm::None) {
            debug!("ignoring --orm {orm} for database {engine}");
        }
        Orm::None
    };

    let use_docker = if engine == DatabaseEngine::None {
        false
    } else {
        answers.ask(answers.docker, false, || prompter.confirm_docker())?
    };

    let use_tailwind = answers.ask(answers.tailwind, false, || prompter.confirm_tailwind())?;

    let package_manager = package_manager(answers, prompter, available)?;

    Ok(Choice {
        target,
        database: Database::from_parts(engine, orm),
        use_docker,
        use_tailwind,
        package_manager,
    })
}

fn package_manager(
    answers: &Answers,
    prompter: &dyn Prompter,
    available: &[PackageManager],
) -> Result<PackageManager, ScaffoldError> {
    if let Some(pm) = answers.package_manager {
        return if available.contains(&pm) {
            Ok(pm)
        } else {
            Err(ScaffoldError::UnavailablePackageManager(pm))
        };
    }

    match available {
        [] => {
            warn!("no package manager found, assuming npm");
            Ok(PackageManager::Npm)
        }
        [only] => Ok(*only),
        [first, ..] if answers.assume_defaults => Ok(answers
            .preferred_manager
            .filter(|pm| available.contains(pm))
            .unwrap_or(*first)),
        _ => prompter.select_package_manager(available),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use create_kyrix_core::SqlEngine;

    use super::*;

    /// Replays fixed answers and records which questions were asked.
    #[derive(Default)]
    struct Scripted {
        database: Option<DatabaseEngine>,
        orm: Option<Orm>,
        docker: bool,
        tailwind: bool,
        package_manager: Option<PackageManager>,
        asked: RefCell<Vec<&'static str>>,
    }

    impl Scripted {
        fn asked(&self) -> Vec<&'static str> {
            self.asked.borrow().clone()
        }
    }

    impl Prompter for Scripted {
        fn select_database(&self) -> Result<DatabaseEngine, ScaffoldError> {
            self.asked.borrow_mut().push("database");
            self.database.ok_or(ScaffoldError::CancelledByUser)
        }

        fn select_orm(&self) -> Result<Orm, ScaffoldError> {
            self.asked.borrow_mut().push("orm");
            self.orm.ok_or(ScaffoldError::CancelledByUser)
        }

        fn confirm_docker(&self) -> Result<bool, ScaffoldError> {
            self.asked.borrow_mut().push("docker");
            Ok(self.docker)
        }

        fn confirm_tailwind(&self) -> Result<bool, ScaffoldError> {
            self.asked.borrow_mut().push("tailwind");
            Ok(self.tailwind)
        }

        fn select_package_manager(
            &self,
            _available: &[PackageManager],
        ) -> Result<PackageManager, ScaffoldError> {
            self.asked.borrow_mut().push("package manager");
            self.package_manager.ok_or(ScaffoldError::CancelledByUser)
        }
    }

    const ALL_MANAGERS: &[PackageManager] = &PackageManager::ALL;

    fn target() -> Target {
        Target::NewDir("kyrix-app".into())
    }

    #[test]
    fn test_every_question_asked_in_order() {
        let prompter = Scripted {
            database: Some(DatabaseEngine::PostgreSql),
            orm: Some(Orm::Prisma),
            docker: true,
            tailwind: true,
            package_manager: Some(PackageManager::Bun),
            ..Default::default()
        };

        let choice =
            complete_choice(target(), &Answers::default(), &prompter, ALL_MANAGERS).unwrap();

        assert_eq!(
            prompter.asked(),
            vec!["database", "orm", "docker", "tailwind", "package manager"]
        );
        assert_eq!(
            choice.database,
            Database::Sql {
                engine: SqlEngine::Postgres,
                orm: Orm::Prisma
            }
        );
        assert!(choice.use_docker);
        assert!(choice.use_tailwind);
        assert_eq!(choice.package_manager, PackageManager::Bun);
    }

    #[test]
    fn test_mongodb_skips_orm_question() {
        let prompter = Scripted {
            database: Some(DatabaseEngine::MongoDb),
            package_manager: Some(PackageManager::Npm),
            ..Default::default()
        };

        let choice =
            complete_choice(target(), &Answers::default(), &prompter, ALL_MANAGERS).unwrap();

        assert_eq!(
            prompter.asked(),
            vec!["database", "docker", "tailwind", "package manager"]
        );
        assert_eq!(choice.database, Database::MongoDb);
    }

    #[test]
    fn test_no_database_skips_orm_and_docker() {
        let prompter = Scripted {
            database: Some(DatabaseEngine::None),
            docker: true,
            package_manager: Some(PackageManager::Npm),
            ..Default::default()
        };

        let choice =
            complete_choice(target(), &Answers::default(), &prompter, ALL_MANAGERS).unwrap();

        assert_eq!(prompter.asked(), vec!["database", "tailwind", "package manager"]);
        assert!(!choice.use_docker);
    }

    #[test]
    fn test_flags_pre_empt_prompts() {
        let prompter = Scripted::default();
        let answers = Answers {
            database: Some(DatabaseEngine::MySql),
            orm: Some(Orm::Drizzle),
            docker: Some(false),
            tailwind: Some(true),
            package_manager: Some(PackageManager::Pnpm),
            ..Default::default()
        };

        let choice = complete_choice(target(), &answers, &prompter, ALL_MANAGERS).unwrap();

        assert!(prompter.asked().is_empty());
        assert_eq!(
            choice.database,
            Database::Sql {
                engine: SqlEngine::MySql,
                orm: Orm::Drizzle
            }
        );
        assert!(choice.use_tailwind);
    }

    #[test]
    fn test_orm_flag_ignored_for_mongodb() {
        let answers = Answers {
            database: Some(DatabaseEngine::MongoDb),
            orm: Some(Orm::Prisma),
            assume_defaults: true,
            ..Default::default()
        };

        let choice =
            complete_choice(target(), &answers, &Scripted::default(), ALL_MANAGERS).unwrap();

        assert_eq!(choice.database, Database::MongoDb);
    }

    #[test]
    fn test_assume_defaults_never_prompts() {
        let prompter = Scripted::default();
        let answers = Answers {
            assume_defaults: true,
            preferred_manager: Some(PackageManager::Yarn),
            ..Default::default()
        };

        let choice = complete_choice(target(), &answers, &prompter, ALL_MANAGERS).unwrap();

        assert!(prompter.asked().is_empty());
        assert_eq!(choice.database, Database::None);
        assert!(!choice.use_docker);
        assert!(!choice.use_tailwind);
        assert_eq!(choice.package_manager, PackageManager::Yarn);
    }

    #[test]
    fn test_assume_defaults_falls_back_to_first_installed_manager() {
        let answers = Answers {
            assume_defaults: true,
            preferred_manager: Some(PackageManager::Bun),
            ..Default::default()
        };

        let choice = complete_choice(
            target(),
            &answers,
            &Scripted::default(),
            &[PackageManager::Npm, PackageManager::Yarn],
        )
        .unwrap();

        assert_eq!(choice.package_manager, PackageManager::Npm);
    }

    #[test]
    fn test_single_installed_manager_is_not_asked() {
        let prompter = Scripted {
            database: Some(DatabaseEngine::None),
            ..Default::default()
        };

        let choice = complete_choice(
            target(),
            &Answers::default(),
            &prompter,
            &[PackageManager::Pnpm],
        )
        .unwrap();

        assert!(!prompter.asked().contains(&"package manager"));
        assert_eq!(choice.package_manager, PackageManager::Pnpm);
    }

    #[test]
    fn test_requested_manager_must_be_installed() {
        let answers = Answers {
            package_manager: Some(PackageManager::Bun),
            assume_defaults: true,
            ..Default::default()
        };

        let err = complete_choice(
            target(),
            &answers,
            &Scripted::default(),
            &[PackageManager::Npm],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ScaffoldError::UnavailablePackageManager(PackageManager::Bun)
        ));
    }

    #[test]
    fn test_no_installed_manager_assumes_npm() {
        let answers = Answers {
            assume_defaults: true,
            ..Default::default()
        };

        let choice = complete_choice(target(), &answers, &Scripted::default(), &[]).unwrap();

        assert_eq!(choice.package_manager, PackageManager::Npm);
    }

    #[test]
    fn test_cancelled_prompt_stops_questions() {
        let prompter = Scripted::default();

        let err = complete_choice(target(), &Answers::default(), &prompter, ALL_MANAGERS)
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::CancelledByUser));
        assert_eq!(prompter.asked(), vec!["database"]);
    }
}
