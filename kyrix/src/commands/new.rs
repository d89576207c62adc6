use std::path::PathBuf;

use clap::Args;
use create_kyrix_codegen::TemplateRegistry;
use create_kyrix_core::{DatabaseEngine, Orm, PackageManager, Target};
use eyre::{Context, Result};
use log::debug;

use crate::{
    cleanup::{self, ArmedTarget},
    config::Config,
    error::ScaffoldError,
    fetch::{GitTemplate, TemplateSource},
    ops::{self, ScaffoldOptions, scaffold::ensure_target_free},
    probe,
    prompt::{self, Answers, DialoguerPrompter, Prompter},
    reports::{Output, Report, TerminalOutput},
};

#[derive(Args)]
pub struct NewCommand {
    /// Project directory, or `.` for the current directory
    #[arg(default_value = "kyrix-app")]
    pub name: String,

    /// Database engine (none, postgresql, mysql, mongodb)
    #[arg(short, long)]
    pub database: Option<DatabaseEngine>,

    /// ORM for SQL databases (none, prisma, drizzle)
    #[arg(long)]
    pub orm: Option<Orm>,

    /// Generate a Docker Compose file for the database
    #[arg(long, overrides_with = "no_docker")]
    pub docker: bool,

    /// Skip the Docker Compose file
    #[arg(long, overrides_with = "docker")]
    pub no_docker: bool,

    /// Set up Tailwind CSS
    #[arg(long, overrides_with = "no_tailwind")]
    pub tailwind: bool,

    /// Skip Tailwind CSS
    #[arg(long, overrides_with = "tailwind")]
    pub no_tailwind: bool,

    /// Package manager the project is set up for (npm, pnpm, yarn, bun)
    #[arg(short, long)]
    pub package_manager: Option<PackageManager>,

    /// Git URL of the template to clone
    #[arg(long)]
    pub template: Option<String>,

    /// Answer every remaining question with its default
    #[arg(short, long)]
    pub yes: bool,

    /// Preview generated files without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl NewCommand {
    pub fn run(&self) -> Result<()> {
        let config =
            Config::load(self.config.as_deref()).wrap_err("Failed to load configuration")?;
        let cwd = std::env::current_dir().wrap_err("Failed to get current directory")?;
        let target = Target::resolve(&self.name, &cwd);

        let registry = TemplateRegistry::builtin();
        registry
            .validate()
            .wrap_err("Template registry is incomplete")?;

        let armed = ArmedTarget::new();
        cleanup::install_interrupt_handler(armed.clone())
            .wrap_err("Failed to install Ctrl-C handler")?;

        let available = probe::available_managers();
        debug!("available package managers: {available:?}");

        let prompter = DialoguerPrompter::new();
        let session = Session {
            config: &config,
            registry: &registry,
            armed: &armed,
            available: &available,
            prompter: &prompter,
            source: &GitTemplate,
        };
        let mut out = TerminalOutput::new();
        match self.execute(target, &session, &mut out) {
            Ok(()) => Ok(()),
            Err(err) => exit_with(err),
        }
    }

    fn execute(
        &self,
        target: Target,
        session: &Session<'_>,
        out: &mut dyn Output,
    ) -> std::result::Result<(), ScaffoldError> {
        // Checked before prompting so no questions are wasted on a taken name.
        if !self.dry_run {
            ensure_target_free(&target)?;
        }

        let choice = prompt::complete_choice(
            target,
            &self.answers(session.config),
            session.prompter,
            session.available,
        )?;
        debug!("scaffolding {choice:?}");

        let config = session.config;
        if self.dry_run {
            ops::preview(&choice, &config.versions, session.registry)?.render(out);
            return Ok(());
        }

        let template_url = self.template.as_deref().unwrap_or(&config.template);
        let opts = ScaffoldOptions {
            template_url,
            versions: &config.versions,
            armed: session.armed,
        };
        ops::scaffold(&choice, &opts, session.source, session.registry)?.render(out);
        Ok(())
    }

    fn answers(&self, config: &Config) -> Answers {
        Answers {
            database: self.database,
            orm: self.orm,
            docker: flag(self.docker, self.no_docker),
            tailwind: flag(self.tailwind, self.no_tailwind),
            package_manager: self.package_manager,
            preferred_manager: config.package_manager,
            assume_defaults: self.yes,
        }
    }
}

/// Everything a `new` run talks to besides the command-line flags.
struct Session<'a> {
    config: &'a Config,
    registry: &'a TemplateRegistry,
    armed: &'a ArmedTarget,
    /// Installed package managers, in probe order.
    available: &'a [PackageManager],
    prompter: &'a dyn Prompter,
    source: &'a dyn TemplateSource,
}

/// Collapse a `--x` / `--no-x` pair; neither given means ask.
fn flag(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Print a scaffold failure and exit with its status code.
fn exit_with(err: ScaffoldError) -> ! {
    let code = err.exit_code();
    match err {
        ScaffoldError::ManifestParse(e) => eprintln!("{:?}", miette::Report::new(*e)),
        ScaffoldError::CancelledByUser => eprintln!("Cancelled."),
        other => eprintln!("error: {}", other.chain()),
    }
    std::process::exit(code);
}
