//! The parsed configure declaration.
//!
//! A Declaration is the whole entity set a configuration file expresses:
//! schema floor, project, dependency requests, build targets, and any
//! retained variables. It is read once at configuration time and never
//! mutated afterwards.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::dependency::DependencyRequest;
use crate::core::project::Project;
use crate::core::schema::{SchemaVersion, TOOL_SCHEMA_VERSION};
use crate::core::target::BuildTarget;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// The complete entity set declared by a configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Declaration {
    /// Minimum schema version the declaration requires
    #[serde(rename = "schema", skip_serializing_if = "Option::is_none")]
    pub schema_floor: Option<SchemaVersion>,

    /// The declared project (absent only in malformed declarations)
    pub project: Option<Project>,

    /// Dependency lookups, in declaration order
    pub dependencies: Vec<DependencyRequest>,

    /// Build targets, in declaration order
    pub targets: Vec<BuildTarget>,

    /// Unrecognized `set()` variables, retained for round-trips
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

impl Declaration {
    /// Create an empty declaration.
    pub fn new() -> Self {
        Declaration::default()
    }

    /// Get a dependency request by name.
    pub fn dependency(&self, name: &str) -> Option<&DependencyRequest> {
        self.dependencies.iter().find(|d| d.name == name)
    }

    /// Get a target by name.
    pub fn target(&self, name: &str) -> Option<&BuildTarget> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Get the project name, if a project was declared.
    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }

    /// A copy with dependencies and targets in name order.
    ///
    /// Declaration order is kept for display and emission; comparisons and
    /// fingerprints go through the normalized form so that re-expressions
    /// that reorder entries still compare equal.
    pub fn normalized(&self) -> Declaration {
        let mut decl = self.clone();
        decl.dependencies.sort_by(|a, b| a.name.cmp(&b.name));
        decl.targets.sort_by(|a, b| a.name.cmp(&b.name));
        decl
    }

    /// Check the schema floor against the tool's own schema version.
    ///
    /// This runs before all other validation: a declaration written for a
    /// newer schema must be rejected before any of its content is trusted.
    pub fn check_schema_floor(&self) -> Option<Diagnostic> {
        let floor = self.schema_floor?;
        if TOOL_SCHEMA_VERSION.satisfies(&floor) {
            return None;
        }
        Some(
            Diagnostic::error(format!(
                "declaration requires schema version {} but this tool supports {}",
                floor, TOOL_SCHEMA_VERSION
            ))
            .with_suggestion(suggestions::SCHEMA_TOO_NEW),
        )
    }

    /// Validate the declaration's invariants.
    ///
    /// Collects diagnostics rather than stopping at the first problem.
    /// `manifest_dir`, when given, is used to check whether referenced
    /// source files exist; absence is surfaced as a note because a missing
    /// source is a build-time failure, not a configuration-time one.
    pub fn validate(&self, manifest_dir: Option<&Path>) -> Vec<Diagnostic> {
        let mut diags = Vec::new();

        if let Some(diag) = self.check_schema_floor() {
            diags.push(diag);
        } else if self.schema_floor.is_none() {
            diags.push(
                Diagnostic::warning("declaration does not state a minimum schema version")
                    .with_suggestion(suggestions::NO_SCHEMA_FLOOR),
            );
        }

        match &self.project {
            None => {
                diags.push(
                    Diagnostic::error("declaration does not declare a project")
                        .with_suggestion(suggestions::NO_PROJECT),
                );
            }
            Some(project) => {
                if project.name.is_empty() {
                    diags.push(Diagnostic::error("project name must not be empty"));
                }
                if project.cxx_std.is_some() && !project.enables_cxx() {
                    diags.push(Diagnostic::warning(format!(
                        "project `{}` sets a C++ standard but does not enable the CXX language",
                        project.name
                    )));
                }
            }
        }

        self.validate_dependencies(&mut diags);
        self.validate_targets(manifest_dir, &mut diags);

        diags
    }

    fn validate_dependencies(&self, diags: &mut Vec<Diagnostic>) {
        let mut seen = HashSet::new();
        for dep in &self.dependencies {
            if dep.name.is_empty() {
                diags.push(Diagnostic::error(
                    "dependency reference with an empty name",
                ));
                continue;
            }
            if !seen.insert(dep.name.as_str()) {
                diags.push(
                    Diagnostic::error(format!(
                        "dependency `{}` is declared more than once",
                        dep.name
                    ))
                    .with_suggestion(suggestions::DUPLICATE_DEPENDENCY),
                );
            }
        }
    }

    fn validate_targets(&self, manifest_dir: Option<&Path>, diags: &mut Vec<Diagnostic>) {
        let dep_names: HashSet<&str> = self.dependencies.iter().map(|d| d.name.as_str()).collect();
        let target_names: HashSet<&str> = self.targets.iter().map(|t| t.name.as_str()).collect();

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.name.is_empty() {
                diags.push(Diagnostic::error("build target with an empty name"));
                continue;
            }
            if !seen.insert(target.name.as_str()) {
                diags.push(Diagnostic::error(format!(
                    "target `{}` is declared more than once",
                    target.name
                )));
            }

            for link in &target.links {
                let ns = link.namespace();
                let is_dep = dep_names.contains(ns);
                let is_sibling = !link.is_namespaced()
                    && ns != target.name
                    && target_names.contains(ns);
                if !is_dep && !is_sibling {
                    diags.push(
                        Diagnostic::error(format!(
                            "target `{}` links `{}` but no dependency `{}` is declared",
                            target.name, link, ns
                        ))
                        .with_suggestion(suggestions::UNDECLARED_LINK),
                    );
                }
            }

            if let Some(dir) = manifest_dir {
                for source in &target.sources {
                    if !dir.join(source).exists() {
                        diags.push(Diagnostic::note(format!(
                            "source file `{}` for target `{}` does not exist yet \
                             (this will fail at build time, not configuration time)",
                            source, target.name
                        )));
                    }
                }
            }
        }
    }
}

impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.schema_floor == b.schema_floor
            && a.project == b.project
            && a.dependencies == b.dependencies
            && a.targets == b.targets
            && a.variables == b.variables
    }
}

impl Eq for Declaration {}
