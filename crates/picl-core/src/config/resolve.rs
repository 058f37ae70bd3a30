//! File + CLI merge into the effective configuration.

use std::path::{Path, PathBuf};

use reqwest::Url;
use thiserror::Error;

use super::{KEY_OUTPUT_FOLDER, KEY_URL, RawConfig};

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--output` / `-o`
    pub output_folder: Option<PathBuf>,
    /// `--url` / `-u`
    pub url: Option<Url>,
}

/// A recognized config key whose value could not be used.
///
/// Not fatal: the field is left unset and resolution continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid value for '{key}' in config ({value:?}): {reason}")]
pub struct ConfigValueError {
    /// Config key.
    pub key: &'static str,
    /// Raw value from the file.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

/// A field required by the requested command is missing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither the file nor `--output` provided an output folder.
    #[error("Output folder not set")]
    OutputFolderNotSet,

    /// Neither the file nor `--url` provided a remote URL.
    #[error("Remote url not set")]
    RemoteUrlNotSet,
}

/// The merged configuration an operation runs with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveConfig {
    output_folder: Option<PathBuf>,
    remote_url: Option<Url>,
}

/// Everything `install` needs, borrowed from a validated [`EffectiveConfig`].
#[derive(Debug, Clone, Copy)]
pub struct InstallTarget<'a> {
    /// Folder packages are stored in.
    pub output_folder: &'a Path,
    /// Base URL packages are fetched from.
    pub remote_url: &'a Url,
}

impl EffectiveConfig {
    /// Output folder, if one was configured.
    pub fn output_folder(&self) -> Option<&Path> {
        self.output_folder.as_deref()
    }

    /// Remote base URL, if one was configured.
    pub fn remote_url(&self) -> Option<&Url> {
        self.remote_url.as_ref()
    }

    /// Check that both the output folder and the remote URL are set.
    ///
    /// # Errors
    ///
    /// The output folder is checked first, so a config missing both fields
    /// reports [`ValidationError::OutputFolderNotSet`].
    pub fn for_install(&self) -> Result<InstallTarget<'_>, ValidationError> {
        let output_folder = self.for_remove()?;
        let remote_url = self
            .remote_url
            .as_ref()
            .ok_or(ValidationError::RemoteUrlNotSet)?;
        Ok(InstallTarget {
            output_folder,
            remote_url,
        })
    }

    /// Check that the output folder is set; that is all `remove` needs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutputFolderNotSet`] when it is missing.
    pub fn for_remove(&self) -> Result<&Path, ValidationError> {
        self.output_folder
            .as_deref()
            .ok_or(ValidationError::OutputFolderNotSet)
    }
}

/// Result of [`resolve`]: the merged config and any file values that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The merged configuration.
    pub config: EffectiveConfig,
    /// File values that failed to parse and were skipped.
    pub warnings: Vec<ConfigValueError>,
}

/// Merge the file config with command-line overrides. CLI values win when present.
///
/// The file's `output_folder` is trimmed; an empty folder counts as unset. A
/// `url` that does not parse, or cannot serve as a base for package paths,
/// is reported in [`Resolution::warnings`] and left unset.
pub fn resolve(file: &RawConfig, cli: &CliOverrides) -> Resolution {
    let mut warnings = Vec::new();

    let file_output_folder = file
        .get(KEY_OUTPUT_FOLDER)
        .map(str::trim)
        .filter(|folder| !folder.is_empty())
        .map(PathBuf::from);

    let file_url = file
        .get(KEY_URL)
        .and_then(|value| match parse_base_url(value) {
            Ok(url) => Some(url),
            Err(reason) => {
                warnings.push(ConfigValueError {
                    key: KEY_URL,
                    value: value.to_string(),
                    reason,
                });
                None
            }
        });

    let cli_output_folder = cli
        .output_folder
        .clone()
        .filter(|folder| !folder.as_os_str().is_empty());

    let config = EffectiveConfig {
        output_folder: cli_output_folder.or(file_output_folder),
        remote_url: cli.url.clone().or(file_url),
    };

    tracing::debug!(
        "Resolved config: output_folder={:?} remote_url={:?}",
        config.output_folder,
        config.remote_url.as_ref().map(Url::as_str)
    );

    Resolution { config, warnings }
}

fn parse_base_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value.trim()).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("not usable as a base URL".to_string());
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_file_values_used_without_overrides() {
        let file: RawConfig = [
            ("output_folder", " /tmp/libs"),
            ("url", " http://example.com/repo"),
        ]
        .into_iter()
        .collect();

        let resolution = resolve(&file, &CliOverrides::default());
        assert!(resolution.warnings.is_empty());
        assert_eq!(
            resolution.config.output_folder(),
            Some(Path::new("/tmp/libs"))
        );
        assert_eq!(
            resolution.config.remote_url(),
            Some(&url("http://example.com/repo"))
        );
    }

    #[test]
    fn test_cli_overrides_win() {
        let file: RawConfig = [
            ("output_folder", " /tmp/libs"),
            ("url", " http://example.com/repo"),
        ]
        .into_iter()
        .collect();
        let cli = CliOverrides {
            output_folder: Some(PathBuf::from("/opt/override")),
            url: Some(url("https://mirror.example.org/")),
        };

        let config = resolve(&file, &cli).config;
        assert_eq!(config.output_folder(), Some(Path::new("/opt/override")));
        assert_eq!(
            config.remote_url(),
            Some(&url("https://mirror.example.org/"))
        );
    }

    #[test]
    fn test_empty_cli_output_falls_back_to_file() {
        let file: RawConfig = [("output_folder", "libs")].into_iter().collect();
        let cli = CliOverrides {
            output_folder: Some(PathBuf::new()),
            url: None,
        };
        let config = resolve(&file, &cli).config;
        assert_eq!(config.output_folder(), Some(Path::new("libs")));
    }

    #[test]
    fn test_cli_only() {
        let cli = CliOverrides {
            output_folder: Some(PathBuf::from("libs")),
            url: Some(url("http://example.com")),
        };
        let config = resolve(&RawConfig::default(), &cli).config;
        assert!(config.for_install().is_ok());
    }

    #[test]
    fn test_bad_url_is_warning_not_failure() {
        let file: RawConfig = [("url", " not a url"), ("output_folder", " libs")]
            .into_iter()
            .collect();
        let resolution = resolve(&file, &CliOverrides::default());

        assert_eq!(resolution.config.remote_url(), None);
        assert_eq!(
            resolution.config.output_folder(),
            Some(Path::new("libs"))
        );
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].key, "url");
        assert_eq!(resolution.warnings[0].value, " not a url");
    }

    #[test]
    fn test_cannot_be_base_url_rejected() {
        let file: RawConfig = [("url", "mailto:someone@example.com")].into_iter().collect();
        let resolution = resolve(&file, &CliOverrides::default());
        assert_eq!(resolution.config.remote_url(), None);
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_bad_file_url_replaced_by_cli() {
        let file: RawConfig = [("url", "::::")].into_iter().collect();
        let cli = CliOverrides {
            output_folder: None,
            url: Some(url("http://example.com/repo")),
        };
        let resolution = resolve(&file, &cli);
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(
            resolution.config.remote_url(),
            Some(&url("http://example.com/repo"))
        );
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        let file: RawConfig = [("colour", "blue")].into_iter().collect();
        let resolution = resolve(&file, &CliOverrides::default());
        assert_eq!(resolution.config, EffectiveConfig::default());
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_install_validation() {
        let empty = EffectiveConfig::default();
        assert_eq!(
            empty.for_install().unwrap_err(),
            ValidationError::OutputFolderNotSet
        );

        let folder_only = resolve(
            &[("output_folder", "libs")].into_iter().collect(),
            &CliOverrides::default(),
        )
        .config;
        let err = folder_only.for_install().unwrap_err();
        assert_eq!(err, ValidationError::RemoteUrlNotSet);
        assert_eq!(err.to_string(), "Remote url not set");
    }

    #[test]
    fn test_remove_validation() {
        let empty = EffectiveConfig::default();
        let err = empty.for_remove().unwrap_err();
        assert_eq!(err.to_string(), "Output folder not set");

        let whitespace_folder = resolve(
            &[("output_folder", "   ")].into_iter().collect(),
            &CliOverrides::default(),
        )
        .config;
        assert!(whitespace_folder.for_remove().is_err());

        let folder_only = resolve(
            &[("output_folder", "libs")].into_iter().collect(),
            &CliOverrides::default(),
        )
        .config;
        assert_eq!(folder_only.for_remove().unwrap(), Path::new("libs"));
    }
}
