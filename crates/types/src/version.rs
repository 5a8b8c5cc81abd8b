//! Exact-pin dependency specifications
//!
//! Dependency declarations are `name@MAJOR.MINOR.PATCH`. Pins must be exact:
//! range operators and wildcards make builds non-reproducible across time and
//! are rejected at parse time rather than resolved to "whatever is newest".

use kiln_errors::VersionError;
use semver::Version;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A dependency declaration: package name plus exact version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageSpec {
    pub name: String,
    pub version: Version,
}

impl PackageSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Parse a `name@version` declaration
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidSpec` when the input is not of the form
    /// `name@version`, and `VersionError::NotExact` when the version part is
    /// a range, a wildcard, or otherwise not a single concrete version.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let (name, version) = input.split_once('@').ok_or_else(|| {
            VersionError::InvalidSpec {
                input: input.to_string(),
            }
        })?;

        if name.is_empty() || version.is_empty() {
            return Err(VersionError::InvalidSpec {
                input: input.to_string(),
            });
        }

        if version.starts_with(['=', '^', '~', '>', '<', '!'])
            || version.contains('*')
            || version.contains(',')
        {
            return Err(VersionError::NotExact {
                input: input.to_string(),
            });
        }

        let version = Version::parse(version).map_err(|e| VersionError::ParseError {
            message: format!("{input}: {e}"),
        })?;

        Ok(Self {
            name: name.to_string(),
            version,
        })
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

impl FromStr for PackageSpec {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Recipes declare dependencies as plain strings, so specs serialize as the
// `name@version` form rather than a struct.
impl Serialize for PackageSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PackageSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}

/// Whether a version string is a single exact version, never a range
#[must_use]
pub fn is_exact_version(version: &str) -> bool {
    let version = version.trim();
    if version.starts_with(['=', '^', '~', '>', '<', '!']) {
        return false;
    }
    if version.contains('*') || version.contains(',') {
        return false;
    }
    Version::parse(version).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_spec() {
        let spec = PackageSpec::parse("jsonlib@3.12.0").unwrap();
        assert_eq!(spec.name, "jsonlib");
        assert_eq!(spec.version, Version::new(3, 12, 0));
        assert_eq!(spec.to_string(), "jsonlib@3.12.0");
    }

    #[test]
    fn test_every_accepted_spec_is_exact() {
        for input in ["jsonlib@3.12.0", "zlib@1.3.1", "fmt@10.2.1"] {
            let spec = PackageSpec::parse(input).unwrap();
            assert!(is_exact_version(&spec.version.to_string()));
        }
    }

    #[test]
    fn test_ranges_rejected() {
        for input in [
            "jsonlib@>=3.0",
            "jsonlib@^3.12.0",
            "jsonlib@~3.12",
            "jsonlib@3.*",
            "jsonlib@>=3.0,<4.0",
        ] {
            assert!(
                matches!(
                    PackageSpec::parse(input),
                    Err(VersionError::NotExact { .. })
                ),
                "expected NotExact for {input}"
            );
        }
    }

    #[test]
    fn test_partial_versions_rejected() {
        assert!(PackageSpec::parse("jsonlib@3.12").is_err());
        assert!(PackageSpec::parse("jsonlib@3").is_err());
    }

    #[test]
    fn test_malformed_specs_rejected() {
        for input in ["jsonlib", "@3.12.0", "jsonlib@", ""] {
            assert!(
                matches!(
                    PackageSpec::parse(input),
                    Err(VersionError::InvalidSpec { .. })
                ),
                "expected InvalidSpec for {input:?}"
            );
        }
    }

    #[test]
    fn test_serde_string_form() {
        let spec: PackageSpec = serde_json::from_str("\"jsonlib@3.12.0\"").unwrap();
        assert_eq!(spec.name, "jsonlib");
        assert_eq!(serde_json::to_string(&spec).unwrap(), "\"jsonlib@3.12.0\"");
    }
}
