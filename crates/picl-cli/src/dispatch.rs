//! Command dispatcher.
//!
//! One run walks ParsingArgs → ReadingConfig → Resolving → Validating →
//! Dispatching and ends in Done or Failed. Each step is sequential; the only
//! resource held is the config file handle, which is closed before
//! Resolving begins.

use std::ffi::OsString;
use std::fmt;

use clap::Parser;
use picl_core::config::{ConfigSource, load_config, resolve};
use picl_core::ops::artifact_url;
use picl_core::{InstallOutcome, Installer, Remover, Reporter};
use picl_schema::PackageSpec;

use crate::{Cli, Commands, DispatchError};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ParsingArgs,
    ReadingConfig,
    Resolving,
    Validating,
    Dispatching,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ParsingArgs => "parsing arguments",
            Self::ReadingConfig => "reading config",
            Self::Resolving => "resolving config",
            Self::Validating => "validating",
            Self::Dispatching => "dispatching",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Runs one picl command against the given collaborators.
#[derive(Debug)]
pub struct Dispatcher<I, R, P> {
    installer: I,
    remover: R,
    reporter: P,
    stage: Stage,
    failed_at: Option<Stage>,
}

impl<I, R, P> Dispatcher<I, R, P>
where
    I: Installer,
    R: Remover,
    P: Reporter,
{
    pub fn new(installer: I, remover: R, reporter: P) -> Self {
        Self {
            installer,
            remover,
            reporter,
            stage: Stage::ParsingArgs,
            failed_at: None,
        }
    }

    /// Current stage. After [`run`](Self::run) returns this is `Done` or `Failed`.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The stage that was active when the run failed.
    pub fn failed_at(&self) -> Option<Stage> {
        self.failed_at
    }

    /// Parse `args` (including the program name) and run the command.
    pub async fn run<A, T>(&mut self, args: A) -> Result<(), DispatchError>
    where
        A: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.failed_at = None;
        let result = self.run_stages(args).await;
        match &result {
            Ok(()) => self.enter(Stage::Done),
            Err(e) => {
                tracing::debug!("Failed while {}: {e}", self.stage);
                self.failed_at = Some(self.stage);
                self.stage = Stage::Failed;
            }
        }
        result
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!("{} -> {}", self.stage, stage);
        self.stage = stage;
    }

    async fn run_stages<A, T>(&mut self, args: A) -> Result<(), DispatchError>
    where
        A: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.enter(Stage::ParsingArgs);
        let cli = Cli::try_parse_from(args)?;

        self.enter(Stage::ReadingConfig);
        let source = ConfigSource::from_arg(cli.config.as_deref());
        let raw = load_config(&source)?;
        for line in raw.ignored() {
            self.reporter.warning(&format!(
                "Ignoring malformed line in {} ({line})",
                source.path.display()
            ));
        }

        self.enter(Stage::Resolving);
        let resolution = resolve(&raw, &cli.command.overrides());
        for warning in &resolution.warnings {
            self.reporter.warning(&warning.to_string());
        }
        let config = resolution.config;

        self.enter(Stage::Validating);
        match &cli.command {
            Commands::Install { package, .. } => {
                let target = config.for_install()?;
                let pkg = PackageSpec::parse(package)?;

                self.enter(Stage::Dispatching);
                if cli.dry_run {
                    let url = artifact_url(target.remote_url, &pkg)?;
                    self.reporter.info(&format!(
                        "Would install {pkg} from {url} into {}",
                        target.output_folder.display()
                    ));
                    return Ok(());
                }

                self.reporter.installing(&pkg);
                let outcome = self
                    .installer
                    .install(&pkg, target.output_folder, target.remote_url)
                    .await?;
                let detail = match outcome {
                    InstallOutcome::Installed {
                        path,
                        bytes,
                        sha256,
                    } => format!("{} ({bytes} bytes, sha256 {sha256})", path.display()),
                    InstallOutcome::AlreadyPresent { path } => {
                        format!("already installed at {}", path.display())
                    }
                };
                self.reporter.done(&pkg, &detail);
            }
            Commands::Remove { package, .. } => {
                let output_folder = config.for_remove()?;
                let pkg = PackageSpec::parse(package)?;

                self.enter(Stage::Dispatching);
                if cli.dry_run {
                    self.reporter.info(&format!(
                        "Would remove {pkg} from {}",
                        output_folder.display()
                    ));
                    return Ok(());
                }

                self.reporter.removing(&pkg);
                let path = self.remover.remove(&pkg, output_folder).await?;
                self.reporter
                    .done(&pkg, &format!("removed {}", path.display()));
            }
        }

        Ok(())
    }
}
