//! Configuration: the `picl.conf` reader and the file/CLI merge.
//!
//! The file is read once into a [`RawConfig`], then [`resolve`] folds in the
//! command-line overrides to produce the [`EffectiveConfig`] a command runs
//! with. Which fields are required depends on the command, so validation
//! lives on [`EffectiveConfig`] and is invoked by the dispatcher.

mod reader;
mod resolve;

pub use reader::{ConfigSource, IgnoredLine, RawConfig, load_config, read_config};
pub use resolve::{
    CliOverrides, ConfigValueError, EffectiveConfig, InstallTarget, Resolution, ValidationError,
    resolve,
};

use std::path::PathBuf;
use thiserror::Error;

/// Key holding the remote base URL.
pub const KEY_URL: &str = "url";

/// Key holding the local output folder.
pub const KEY_OUTPUT_FOLDER: &str = "output_folder";

/// Errors raised while loading the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be opened.
    #[error("Failed to open config file {}: {source}", path.display())]
    Open {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Scanning lines failed part-way through.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
}
