//! Core library for picl.
//!
//! Reads the line-oriented `picl.conf`, merges it with command-line overrides
//! into an [`EffectiveConfig`](config::EffectiveConfig), and provides the
//! [`Installer`](ops::Installer) / [`Remover`](ops::Remover) collaborators
//! the CLI dispatches to.

pub mod config;
pub mod ops;
pub mod paths;
pub mod reporter;

pub use config::{
    CliOverrides, ConfigError, ConfigSource, ConfigValueError, EffectiveConfig, InstallTarget,
    RawConfig, Resolution, ValidationError,
};
pub use ops::{FsRemover, HttpInstaller, InstallOutcome, Installer, OperationError, Remover};
pub use paths::*;
pub use reporter::{NullReporter, Reporter};

/// Re-exported so callers can name URLs without depending on `url` directly.
pub use reqwest::Url;

/// User Agent string sent with every download
pub const USER_AGENT: &str = concat!("picl/", env!("CARGO_PKG_VERSION"));
