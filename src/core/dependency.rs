//! Dependency requests.
//!
//! A DependencyRequest is what a declaration asks of the external resolution
//! mechanism: a bare lookup key plus a required/optional flag. There is no
//! version constraint and no source location at this level.

use serde::{Deserialize, Serialize};

use crate::core::target::LinkHandle;

/// How the external tool should search for the dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Config-file lookup (default)
    #[default]
    Config,
    /// Find-module lookup (`find_package(... MODULE)`)
    Module,
}

/// A named external package the configuration must resolve before linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRequest {
    /// Lookup key
    pub name: String,

    /// Whether absence is a configuration failure
    pub required: bool,

    /// Lookup mode
    #[serde(default)]
    pub mode: LookupMode,
}

impl DependencyRequest {
    /// Create a required dependency request.
    pub fn required(name: impl Into<String>) -> Self {
        DependencyRequest {
            name: name.into(),
            required: true,
            mode: LookupMode::Config,
        }
    }

    /// Create an optional dependency request.
    pub fn optional(name: impl Into<String>) -> Self {
        DependencyRequest {
            name: name.into(),
            required: false,
            mode: LookupMode::Config,
        }
    }

    /// Set the lookup mode.
    pub fn with_mode(mut self, mode: LookupMode) -> Self {
        self.mode = mode;
        self
    }

    /// The namespace-qualified handle this dependency exports by default.
    ///
    /// A resolved package `hello` is attached to targets as `hello::hello`.
    pub fn exported_handle(&self) -> LinkHandle {
        LinkHandle::new(format!("{}::{}", self.name, self.name))
    }
}

impl std::fmt::Display for DependencyRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.required {
            write!(f, " (optional)")?;
        }
        Ok(())
    }
}
