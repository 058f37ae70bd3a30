//! picl - Maybe the dumbest package manager ever
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Installs or removes a single `name@version` package per invocation.
//!
//! # Configuration
//!
//! Settings come from `./picl.conf` (or the file given with `--config`),
//! one `key: value` pair per line:
//!
//! ```text
//! # where libraries are stored
//! output_folder: ./libs
//! # where libraries are downloaded from
//! url: https://example.com/picl
//! ```
//!
//! `--output` and `--url` override the file.

pub mod dispatch;
pub mod error;
pub mod ui;

pub use dispatch::{Dispatcher, Stage};
pub use error::DispatchError;

use clap::{Parser, Subcommand};
use picl_core::{CliOverrides, Url};
use std::path::PathBuf;

const PACKAGE_NAME_HELP: &str = "\
Package Name:
  The library name including the version you want to deal with, in the format

      my-library@3.5.1

  There must be a name and there must be a version. The version is the string
  behind the \"@\" and is not parsed. It just has to exist on the server; the
  format \"x.y.z\" (e.g. 3.5.1) is only recommended.";

#[derive(Debug, Parser)]
#[command(name = "picl")]
#[command(author, version, about = "picl - Maybe the dumbest package manager ever")]
#[command(after_help = PACKAGE_NAME_HELP, disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Version,
        value_parser = clap::value_parser!(bool)
    )]
    version: (),

    /// Configuration file to use [default: ./picl.conf]
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show what would happen without making changes
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install the given library
    Install {
        /// Library to install: name@version
        package: String,
        /// Output folder where all libraries are stored
        #[arg(short, long, value_name = "FOLDER")]
        output: Option<PathBuf>,
        /// Base url picl downloads files from
        #[arg(short, long, value_name = "URL")]
        url: Option<Url>,
    },
    /// Uninstall/remove the given library
    Remove {
        /// Library to remove: name@version
        package: String,
        /// Output folder where all libraries are stored
        #[arg(short, long, value_name = "FOLDER")]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// The raw `name@version` argument.
    pub fn package(&self) -> &str {
        match self {
            Self::Install { package, .. } | Self::Remove { package, .. } => package,
        }
    }

    /// Flags that override values from the config file.
    pub fn overrides(&self) -> CliOverrides {
        match self {
            Self::Install { output, url, .. } => CliOverrides {
                output_folder: output.clone(),
                url: url.clone(),
            },
            Self::Remove { output, .. } => CliOverrides {
                output_folder: output.clone(),
                url: None,
            },
        }
    }
}
