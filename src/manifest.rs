//! Native manifest re-expression of a declaration.
//!
//! `Capstan.toml` is the same entity set in the ecosystem's own
//! build-description format. Conversions are lossless in both directions:
//! declaration -> manifest -> declaration reproduces an identical entity
//! set, with dependencies and targets keyed by name.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::dependency::{DependencyRequest, LookupMode};
use crate::core::project::Project;
use crate::core::schema::SchemaVersion;
use crate::core::target::{BuildTarget, LinkHandle, TargetKind};
use crate::core::Declaration;

/// Raw manifest as serialized to and from TOML.
#[derive(Debug, Serialize, Deserialize)]
struct RawManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema: Option<SchemaVersion>,

    #[serde(default)]
    project: Option<Project>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    dependencies: BTreeMap<String, DependencySpec>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    targets: BTreeMap<String, RawTarget>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    variables: BTreeMap<String, String>,
}

/// Dependency entry as it appears in the manifest.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum DependencySpec {
    /// Shorthand: `hello = "required"` or `hello = "optional"`
    Simple(Requirement),

    /// Detailed: `bye = { required = true, mode = "module" }`
    Detailed {
        #[serde(default = "default_true")]
        required: bool,

        #[serde(default)]
        mode: LookupMode,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Requirement {
    Required,
    Optional,
}

fn default_true() -> bool {
    true
}

/// Raw target from the manifest.
#[derive(Debug, Serialize, Deserialize)]
struct RawTarget {
    #[serde(default)]
    kind: TargetKind,

    #[serde(default)]
    sources: Vec<String>,

    #[serde(default)]
    links: Vec<LinkHandle>,
}

/// Parse manifest content into a declaration.
pub fn parse_manifest(content: &str) -> Result<Declaration> {
    let raw: RawManifest =
        toml::from_str(content).context("failed to parse Capstan.toml manifest")?;

    let dependencies = raw
        .dependencies
        .into_iter()
        .map(|(name, spec)| {
            let (required, mode) = match spec {
                DependencySpec::Simple(Requirement::Required) => (true, LookupMode::Config),
                DependencySpec::Simple(Requirement::Optional) => (false, LookupMode::Config),
                DependencySpec::Detailed { required, mode } => (required, mode),
            };
            DependencyRequest {
                name,
                required,
                mode,
            }
        })
        .collect();

    let targets = raw
        .targets
        .into_iter()
        .map(|(name, target)| BuildTarget {
            name,
            kind: target.kind,
            sources: target.sources,
            links: target.links,
        })
        .collect();

    Ok(Declaration {
        schema_floor: raw.schema,
        project: raw.project,
        dependencies,
        targets,
        variables: raw.variables,
    })
}

/// Serialize a declaration to manifest content.
pub fn to_manifest_string(decl: &Declaration) -> Result<String> {
    let dependencies = decl
        .dependencies
        .iter()
        .map(|dep| {
            let spec = match (dep.required, dep.mode) {
                (true, LookupMode::Config) => DependencySpec::Simple(Requirement::Required),
                (false, LookupMode::Config) => DependencySpec::Simple(Requirement::Optional),
                (required, mode) => DependencySpec::Detailed { required, mode },
            };
            (dep.name.clone(), spec)
        })
        .collect();

    let targets = decl
        .targets
        .iter()
        .map(|target| {
            (
                target.name.clone(),
                RawTarget {
                    kind: target.kind,
                    sources: target.sources.clone(),
                    links: target.links.clone(),
                },
            )
        })
        .collect();

    let raw = RawManifest {
        schema: decl.schema_floor,
        project: decl.project.clone(),
        dependencies,
        targets,
        variables: decl.variables.clone(),
    };

    toml::to_string_pretty(&raw).context("failed to serialize manifest")
}
