//! Errors that end a `picl` run

use picl_core::{ConfigError, OperationError, ValidationError};
use picl_schema::SpecError;
use thiserror::Error;

/// Everything that can stop a command. Each variant exits with status 1,
/// except `--help` / `--version`, which clap reports as errors too.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Malformed command line.
    #[error(transparent)]
    ArgParse(#[from] clap::Error),

    /// The config file could not be opened or read.
    #[error(transparent)]
    ConfigRead(#[from] ConfigError),

    /// A field required by the command is not set.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The package argument is not `name@version`.
    #[error(transparent)]
    Specifier(#[from] SpecError),

    /// Failure reported by the installer or remover.
    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl DispatchError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ArgParse(e) if !e.use_stderr() => 0,
            _ => 1,
        }
    }
}
