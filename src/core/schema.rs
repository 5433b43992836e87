//! Schema version handling.
//!
//! A declaration states the minimum configuration-schema version it needs
//! via `cmake_minimum_required(VERSION x.y)`. The floor is checked against
//! the tool's own schema version before any other processing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The configuration-schema version this tool speaks.
///
/// Declarations with a floor above this are rejected up front.
pub const TOOL_SCHEMA_VERSION: SchemaVersion = SchemaVersion {
    major: 3,
    minor: 28,
    patch: None,
};

/// A `major.minor[.patch]` schema version.
///
/// Comparisons treat a missing patch component as zero, so `3.24` and
/// `3.24.0` compare equal.
#[derive(Debug, Clone, Copy)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl SchemaVersion {
    /// Create a version without a patch component.
    pub fn new(major: u32, minor: u32) -> Self {
        SchemaVersion {
            major,
            minor,
            patch: None,
        }
    }

    /// Check whether this version satisfies the given minimum floor.
    pub fn satisfies(&self, floor: &SchemaVersion) -> bool {
        self >= floor
    }

    fn as_triple(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch.unwrap_or(0))
    }
}

impl PartialEq for SchemaVersion {
    fn eq(&self, other: &Self) -> bool {
        self.as_triple() == other.as_triple()
    }
}

impl Eq for SchemaVersion {}

impl std::hash::Hash for SchemaVersion {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_triple().hash(state);
    }
}

impl PartialOrd for SchemaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SchemaVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_triple().cmp(&other.as_triple())
    }
}

impl FromStr for SchemaVersion {
    type Err = SchemaVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SchemaVersionParseError(s.to_string());

        let mut parts = s.split('.');
        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(err)?
            .parse()
            .map_err(|_| err())?;
        let minor = parts
            .next()
            .ok_or_else(err)?
            .parse()
            .map_err(|_| err())?;
        let patch = match parts.next() {
            Some(p) => Some(p.parse().map_err(|_| err())?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(SchemaVersion {
            major,
            minor,
            patch,
        })
    }
}

/// Error returned when parsing an invalid schema version string.
#[derive(Debug, Clone)]
pub struct SchemaVersionParseError(pub String);

impl fmt::Display for SchemaVersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid schema version '{}', expected `major.minor` or `major.minor.patch`",
            self.0
        )
    }
}

impl std::error::Error for SchemaVersionParseError {}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        Ok(())
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_component() {
        let v: SchemaVersion = "3.24".parse().unwrap();
        assert_eq!(v, SchemaVersion::new(3, 24));
        assert_eq!(v.to_string(), "3.24");
    }

    #[test]
    fn test_parse_three_component() {
        let v: SchemaVersion = "3.24.1".parse().unwrap();
        assert_eq!(v.patch, Some(1));
        assert_eq!(v.to_string(), "3.24.1");
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<SchemaVersion>().is_err());
        assert!("3".parse::<SchemaVersion>().is_err());
        assert!("3.x".parse::<SchemaVersion>().is_err());
        assert!("3.24.1.5".parse::<SchemaVersion>().is_err());
    }

    #[test]
    fn test_ordering_ignores_missing_patch() {
        let plain: SchemaVersion = "3.24".parse().unwrap();
        let zero: SchemaVersion = "3.24.0".parse().unwrap();
        assert_eq!(plain.cmp(&zero), std::cmp::Ordering::Equal);
        assert!("3.25".parse::<SchemaVersion>().unwrap() > plain);
        assert!("2.99".parse::<SchemaVersion>().unwrap() < plain);
    }

    #[test]
    fn test_tool_version_satisfies_fixture_floor() {
        let floor: SchemaVersion = "3.24".parse().unwrap();
        assert!(TOOL_SCHEMA_VERSION.satisfies(&floor));
        assert!(!TOOL_SCHEMA_VERSION.satisfies(&SchemaVersion::new(4, 0)));
    }
}
