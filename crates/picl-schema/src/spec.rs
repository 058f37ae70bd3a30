//! Package specifier parsing
//!
//! A specifier is `name@version`, e.g. `my-library@3.5.1`. Both halves are
//! required. Only the first `@` separates them, so `a@b@c` names package `a`
//! at version `b@c`.

use thiserror::Error;

use crate::types::{PackageName, Version};

/// Errors produced while parsing a `name@version` specifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The input has no `@` separating name and version.
    #[error("Invalid package specifier '{0}': expected <name>@<version>")]
    MissingSeparator(String),

    /// Nothing precedes the `@`.
    #[error("Invalid package specifier '{0}': missing package name")]
    EmptyName(String),

    /// Nothing follows the `@`.
    #[error("Invalid package specifier '{0}': missing version after @")]
    EmptyVersion(String),

    /// The name or version would escape the output folder as a file name.
    #[error("Invalid package specifier '{0}': name and version must be plain file names")]
    PathComponent(String),
}

/// True when `part` cannot be used as a plain file name component.
fn is_path_like(part: &str) -> bool {
    part.contains(['/', '\\']) || part == "." || part == ".."
}

/// Parsed package specifier. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageSpec {
    /// Package name (non-empty, never contains `@`).
    pub name: PackageName,
    /// Package version (non-empty, opaque).
    pub version: Version,
}

impl PackageSpec {
    /// Parse a package specifier like `jq@1.7.1`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when there is no `@`, when the name or the
    /// version is empty, or when either contains a path separator or is a
    /// bare `.` / `..`.
    pub fn parse(spec: &str) -> Result<Self, SpecError> {
        let Some((name, version)) = spec.split_once('@') else {
            return Err(SpecError::MissingSeparator(spec.to_string()));
        };
        if name.is_empty() {
            return Err(SpecError::EmptyName(spec.to_string()));
        }
        if version.is_empty() {
            return Err(SpecError::EmptyVersion(spec.to_string()));
        }

        let pkg = Self {
            name: PackageName::from(name),
            version: Version::from(version),
        };
        pkg.check_file_safe()?;
        Ok(pkg)
    }

    /// Check that the name and version can be joined onto a folder without
    /// leaving it.
    ///
    /// Specs built field by field skip [`parse`](Self::parse), so path
    /// builders call this as well.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::PathComponent`] if either part contains `/` or
    /// `\`, or is exactly `.` or `..`.
    pub fn check_file_safe(&self) -> Result<(), SpecError> {
        if is_path_like(&self.name) || is_path_like(&self.version) {
            return Err(SpecError::PathComponent(self.to_string()));
        }
        Ok(())
    }

    /// File name of the artifact stored for this package: `<name>-<version>.zip`.
    pub fn artifact_file_name(&self) -> String {
        format!("{}-{}.zip", self.name, self.version)
    }
}

impl std::str::FromStr for PackageSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versioned() {
        let spec = PackageSpec::parse("my-library@3.5.1").unwrap();
        assert_eq!(spec.name, "my-library");
        assert_eq!(spec.version, "3.5.1");
    }

    #[test]
    fn test_parse_opaque_version() {
        let spec = PackageSpec::parse("jq@latest-nightly").unwrap();
        assert_eq!(spec.version, "latest-nightly");
    }

    #[test]
    fn test_parse_splits_on_first_at() {
        let spec = PackageSpec::parse("a@b@c").unwrap();
        assert_eq!(spec.name, "a");
        assert_eq!(spec.version, "b@c");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            PackageSpec::parse("noatsign"),
            Err(SpecError::MissingSeparator("noatsign".to_string()))
        );
        assert_eq!(
            PackageSpec::parse("@version"),
            Err(SpecError::EmptyName("@version".to_string()))
        );
        assert_eq!(
            PackageSpec::parse("name@"),
            Err(SpecError::EmptyVersion("name@".to_string()))
        );
        assert!(PackageSpec::parse("").is_err());
        assert!(PackageSpec::parse("@").is_err());
    }

    #[test]
    fn test_parse_rejects_path_components() {
        for raw in [
            "../victim@1",
            "..@1",
            ".@1",
            "lib@..",
            "lib@.",
            "a/b@1",
            "lib@1/../../x",
            "a\\b@1",
            "lib@..\\x",
        ] {
            assert_eq!(
                PackageSpec::parse(raw),
                Err(SpecError::PathComponent(raw.to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_parse_allows_dots_inside_parts() {
        let spec = PackageSpec::parse("lib.core@..1").unwrap();
        assert_eq!(spec.name, "lib.core");
        assert_eq!(spec.version, "..1");
        assert!(PackageSpec::parse(".hidden@1.0").is_ok());
    }

    #[test]
    fn test_check_file_safe_on_constructed_spec() {
        let spec = PackageSpec {
            name: PackageName::from("../victim"),
            version: Version::from("1"),
        };
        assert!(matches!(
            spec.check_file_safe(),
            Err(SpecError::PathComponent(_))
        ));
    }

    #[test]
    fn test_name_and_version_round_trip_through_display() {
        for (name, version) in [("lib", "1.0"), ("my-lib", "3.5.1"), ("x", "y")] {
            let raw = format!("{name}@{version}");
            let spec: PackageSpec = raw.parse().unwrap();
            assert_eq!(spec.name, name);
            assert_eq!(spec.version, version);
            assert_eq!(spec.to_string(), raw);
        }
    }

    #[test]
    fn test_artifact_file_name() {
        let spec = PackageSpec::parse("my-library@3.5.1").unwrap();
        assert_eq!(spec.artifact_file_name(), "my-library-3.5.1.zip");
    }
}
