//! Package index: the lookup table configure-time resolution runs against.
//!
//! The index lists the package names the external resolution mechanism
//! could satisfy. It is deliberately not a resolver: no version solving,
//! no transitive graph, just name -> entry.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::target::LinkHandle;

/// An entry in the package index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Version the external source would provide (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Exported link target, when it differs from `name::name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl IndexEntry {
    /// The handle this entry exports for the given package name.
    pub fn exported_handle(&self, name: &str) -> LinkHandle {
        match &self.target {
            Some(target) => LinkHandle::new(target.clone()),
            None => LinkHandle::new(format!("{}::{}", name, name)),
        }
    }
}

/// The set of packages resolution can satisfy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageIndex {
    #[serde(default)]
    packages: BTreeMap<String, IndexEntry>,
}

impl PackageIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        PackageIndex::default()
    }

    /// Load an index from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read package index: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse index content.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse package index")
    }

    /// Add a package entry.
    pub fn add(&mut self, name: impl Into<String>, entry: IndexEntry) {
        self.packages.insert(name.into(), entry);
    }

    /// Look up a package by name.
    pub fn lookup(&self, name: &str) -> Option<&IndexEntry> {
        self.packages.get(name)
    }

    /// Check if a package is present.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Number of packages in the index.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Iterate over package names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        let content = r#"
[packages.hello]
version = "0.1"

[packages.bye]
version = "0.1"

[packages.zlib]
target = "ZLIB::ZLIB"
"#;
        let index = PackageIndex::parse(content).unwrap();
        assert_eq!(index.len(), 3);
        assert!(index.contains("hello"));
        assert_eq!(
            index.lookup("hello").unwrap().version.as_deref(),
            Some("0.1")
        );
    }

    #[test]
    fn test_exported_handle_defaults_to_namespaced_name() {
        let entry = IndexEntry::default();
        assert_eq!(entry.exported_handle("hello").as_str(), "hello::hello");
    }

    #[test]
    fn test_exported_handle_override() {
        let entry = IndexEntry {
            version: None,
            target: Some("ZLIB::ZLIB".to_string()),
        };
        assert_eq!(entry.exported_handle("zlib").as_str(), "ZLIB::ZLIB");
    }

    #[test]
    fn test_empty_index() {
        let index = PackageIndex::parse("").unwrap();
        assert!(index.is_empty());
        assert!(!index.contains("hello"));
    }
}
