//! Well-known file locations.

use std::path::{Path, PathBuf};

use picl_schema::{PackageSpec, SpecError};

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./picl.conf";

/// Name of the lock file held inside an output folder during an operation.
pub const LOCK_FILE_NAME: &str = ".picl.lock";

/// Default config path: ./picl.conf
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

/// Where a package's artifact lives: `<output_folder>/<name>-<version>.zip`
///
/// # Errors
///
/// Returns [`SpecError::PathComponent`] if the name or version would place
/// the file outside `output_folder`.
pub fn artifact_path(output_folder: &Path, pkg: &PackageSpec) -> Result<PathBuf, SpecError> {
    pkg.check_file_safe()?;
    Ok(output_folder.join(pkg.artifact_file_name()))
}

/// Lock file path for an output folder: `<output_folder>/.picl.lock`
pub fn lock_path(output_folder: &Path) -> PathBuf {
    output_folder.join(LOCK_FILE_NAME)
}
