//! Line-oriented `key: value` config file reader.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::ConfigError;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*$").expect("blank line pattern is valid"));

static COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*\S*").expect("comment pattern is valid"));

static KEY_VALUE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\S+\s*:\s*\S+\s*$").expect("key-value pattern is valid")
});

/// A line that was neither blank, a comment, nor a valid `key: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredLine {
    /// 1-based line number.
    pub line_number: usize,
    /// The line as it appeared in the file.
    pub content: String,
}

impl std::fmt::Display for IgnoredLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {:?}", self.line_number, self.content)
    }
}

/// Key/value pairs read from a config file, plus the lines that were skipped.
///
/// Values are the raw text after the first `:`, leading space included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    entries: HashMap<String, String>,
    ignored: Vec<IgnoredLine>,
}

impl RawConfig {
    /// Look up the raw value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no key was read.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All key/value pairs, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Lines that did not parse, in file order.
    pub fn ignored(&self) -> &[IgnoredLine] {
        &self.ignored
    }

    /// Insert a pair; a later insert for the same key replaces the earlier one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::default();
        for (k, v) in iter {
            config.insert(k, v);
        }
        config
    }
}

/// Where the config file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// File to read.
    pub path: PathBuf,
    /// Whether the user named the file with `--config`.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub explicit: bool,
}

impl ConfigSource {
    /// A path the user asked for.
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            explicit: true,
        }
    }

    /// The default `./picl.conf`.
    pub fn default_path() -> Self {
        Self {
            path: crate::paths::default_config_path(),
            explicit: false,
        }
    }

    /// Explicit when `path` is given, the default location otherwise.
    pub fn from_arg(path: Option<&Path>) -> Self {
        path.map_or_else(Self::default_path, Self::explicit)
    }
}

/// Open and read the config file named by `source`.
///
/// # Errors
///
/// Returns [`ConfigError::Open`] if the file cannot be opened, unless it is
/// the default path and simply does not exist, in which case an empty
/// [`RawConfig`] is returned. Returns [`ConfigError::Read`] if reading fails.
pub fn load_config(source: &ConfigSource) -> Result<RawConfig, ConfigError> {
    let file = match File::open(&source.path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound && !source.explicit => {
            tracing::debug!(
                "No config file at {}, continuing without one",
                source.path.display()
            );
            return Ok(RawConfig::default());
        }
        Err(source_err) => {
            return Err(ConfigError::Open {
                path: source.path.clone(),
                source: source_err,
            });
        }
    };

    tracing::debug!("Reading config from {}", source.path.display());
    read_config(file)
}

/// Read `key: value` pairs from `input`, taking ownership so the handle is
/// closed on every return path.
///
/// Lines are classified in order: blank, comment (`#`), `key: value`. The
/// pair is split on the first `:`; the key is trimmed, the value is kept as
/// written. Anything else is recorded in [`RawConfig::ignored`]. Later
/// duplicates of a key overwrite earlier ones.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] on an I/O failure (including invalid UTF-8).
pub fn read_config<R: Read>(input: R) -> Result<RawConfig, ConfigError> {
    let mut config = RawConfig::default();

    for (index, line) in BufReader::new(input).lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        if BLANK_LINE.is_match(&line) || COMMENT_LINE.is_match(&line) {
            continue;
        }

        let pair = line
            .split_once(':')
            .filter(|(key, _)| !key.trim().is_empty() && KEY_VALUE_LINE.is_match(&line));
        if let Some((key, value)) = pair {
            config.insert(key.trim(), value);
            continue;
        }

        config.ignored.push(IgnoredLine {
            line_number,
            content: line,
        });
    }

    Ok(config)
}
