//! Configure-time dependency lookups.
//!
//! Performs the one step of configuration the declaration itself
//! expresses: resolving every dependency request against the package
//! index. Compilation and linking stay with the external orchestrator.
//!
//! Lookups run once per declaration content: a stamp file records the
//! entity-set fingerprint of the last successful run, and an unchanged
//! declaration reuses it instead of resolving again.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::schema::TOOL_SCHEMA_VERSION;
use crate::core::target::LinkHandle;
use crate::index::PackageIndex;
use crate::ops::check::load_declaration;
use crate::util::context::GlobalContext;
use crate::util::diagnostic::{suggestions, MissingDependencyError, SchemaFloorError};
use crate::util::fingerprint::fingerprint;

/// Options for a configure run.
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// Explicit index path (defaults to `capstan-index.toml` next to the
    /// declaration)
    pub index_path: Option<PathBuf>,

    /// Ignore any existing stamp and run the lookups again
    pub fresh: bool,
}

/// A dependency request satisfied by the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLookup {
    /// Package name
    pub name: String,

    /// Version the index advertises, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Link target the package exports
    pub handle: LinkHandle,
}

/// The outcome of a configure run.
#[derive(Debug)]
pub struct ConfigureReport {
    /// Project name
    pub project: String,

    /// Entity-set fingerprint of the declaration
    pub fingerprint: String,

    /// Whether a previous run's stamp was reused
    pub reused: bool,

    /// Satisfied lookups, in declaration order
    pub resolved: Vec<ResolvedLookup>,

    /// Optional lookups the index could not satisfy
    pub skipped: Vec<String>,
}

/// Stamp recording a successful configure run.
#[derive(Debug, Serialize, Deserialize)]
struct Stamp {
    fingerprint: String,
    resolved: Vec<ResolvedLookup>,
    skipped: Vec<String>,
}

/// Run configure-time dependency lookups for a declaration.
pub fn configure(path: &Path, opts: &ConfigureOptions) -> Result<ConfigureReport> {
    let declaration = load_declaration(path)?;

    // The schema floor is enforced before any other processing.
    if let Some(floor) = declaration.schema_floor {
        if !TOOL_SCHEMA_VERSION.satisfies(&floor) {
            return Err(SchemaFloorError {
                declared: floor.to_string(),
                supported: TOOL_SCHEMA_VERSION.to_string(),
            }
            .into());
        }
    }

    let diagnostics = declaration.validate(path.parent());
    let errors: Vec<_> = diagnostics.iter().filter(|d| d.is_error()).collect();
    if !errors.is_empty() {
        let messages = errors
            .iter()
            .map(|d| format!("  {}", d.message))
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "declaration is invalid, configuration aborted:\n{}",
            messages
        );
    }

    let project = declaration
        .project_name()
        .expect("validated declaration has a project")
        .to_string();

    let digest = fingerprint(&declaration)?;
    let stamp_path = GlobalContext::stamp_path(path);

    if !opts.fresh {
        if let Some(stamp) = read_stamp(&stamp_path)? {
            if stamp.fingerprint == digest {
                tracing::info!("declaration unchanged, dependency lookups already ran");
                return Ok(ConfigureReport {
                    project,
                    fingerprint: digest,
                    reused: true,
                    resolved: stamp.resolved,
                    skipped: stamp.skipped,
                });
            }
            tracing::info!("declaration changed, running dependency lookups again");
        }
    }

    let index_path = opts
        .index_path
        .clone()
        .unwrap_or_else(|| GlobalContext::default_index_path(path));
    if !index_path.exists() {
        bail!(
            "no package index found at {}\n{}",
            index_path.display(),
            suggestions::NO_INDEX
        );
    }
    let index = PackageIndex::load(&index_path)?;

    tracing::info!(
        "resolving {} dependency lookups against {}",
        declaration.dependencies.len(),
        index_path.display()
    );

    let mut resolved = Vec::new();
    let mut skipped = Vec::new();
    for dep in &declaration.dependencies {
        match index.lookup(&dep.name) {
            Some(entry) => {
                let handle = entry.exported_handle(&dep.name);
                tracing::info!("target declared `{}`", handle);
                resolved.push(ResolvedLookup {
                    name: dep.name.clone(),
                    version: entry.version.clone(),
                    handle,
                });
            }
            None if dep.required => {
                return Err(MissingDependencyError::new(dep.name.clone()).into());
            }
            None => {
                tracing::warn!("optional dependency `{}` not found, skipping", dep.name);
                skipped.push(dep.name.clone());
            }
        }
    }

    write_stamp(
        &stamp_path,
        &Stamp {
            fingerprint: digest.clone(),
            resolved: resolved.clone(),
            skipped: skipped.clone(),
        },
    )?;

    Ok(ConfigureReport {
        project,
        fingerprint: digest,
        reused: false,
        resolved,
        skipped,
    })
}

fn read_stamp(path: &Path) -> Result<Option<Stamp>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read stamp: {}", path.display()))?;
    match toml::from_str(&content) {
        Ok(stamp) => Ok(Some(stamp)),
        // A corrupt stamp just means the lookups run again.
        Err(_) => Ok(None),
    }
}

fn write_stamp(path: &Path, stamp: &Stamp) -> Result<()> {
    let dir = path.parent().expect("stamp path has a parent");
    GlobalContext::ensure_dir(dir)?;
    let content = toml::to_string_pretty(stamp).context("failed to serialize stamp")?;
    std::fs::write(path, content)
        .with_context(|| format!("failed to write stamp: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FIXTURE: &str = "\
cmake_minimum_required(VERSION 3.24)
project(MyApp CXX)
set(CMAKE_CXX_STANDARD 17)
find_package(hello REQUIRED)
find_package(bye REQUIRED)
add_executable(app main.cpp)
target_link_libraries(app hello::hello bye::bye)
";

    const INDEX: &str = "\
[packages.hello]
version = \"0.1\"

[packages.bye]
version = \"0.1\"
";

    fn project(decl: &str, index: Option<&str>) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CMakeLists.txt");
        std::fs::write(&path, decl).unwrap();
        if let Some(index) = index {
            std::fs::write(tmp.path().join("capstan-index.toml"), index).unwrap();
        }
        (tmp, path)
    }

    #[test]
    fn test_configure_resolves_both_lookups() {
        let (_tmp, path) = project(FIXTURE, Some(INDEX));

        let report = configure(&path, &ConfigureOptions::default()).unwrap();
        assert_eq!(report.project, "MyApp");
        assert!(!report.reused);
        assert_eq!(report.resolved.len(), 2);
        assert_eq!(report.resolved[0].name, "hello");
        assert_eq!(report.resolved[0].handle.as_str(), "hello::hello");
        assert_eq!(report.resolved[1].name, "bye");
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_configure_aborts_on_missing_required_dependency() {
        let (_tmp, path) = project(FIXTURE, Some("[packages.hello]\n"));

        let err = configure(&path, &ConfigureOptions::default()).unwrap_err();
        assert!(err.to_string().contains("`bye`"));
    }

    #[test]
    fn test_configure_skips_missing_optional_dependency() {
        let decl = "\
project(p CXX)
find_package(hello REQUIRED)
find_package(extra QUIET)
add_executable(app main.cpp)
target_link_libraries(app hello::hello)
";
        let (_tmp, path) = project(decl, Some("[packages.hello]\n"));

        let report = configure(&path, &ConfigureOptions::default()).unwrap();
        assert_eq!(report.resolved.len(), 1);
        assert_eq!(report.skipped, vec!["extra"]);
    }

    #[test]
    fn test_configure_runs_once_per_content() {
        let (_tmp, path) = project(FIXTURE, Some(INDEX));

        let first = configure(&path, &ConfigureOptions::default()).unwrap();
        assert!(!first.reused);

        let second = configure(&path, &ConfigureOptions::default()).unwrap();
        assert!(second.reused);
        assert_eq!(second.resolved.len(), 2);
        assert_eq!(second.fingerprint, first.fingerprint);
    }

    #[test]
    fn test_configure_reruns_on_content_change() {
        let (_tmp, path) = project(FIXTURE, Some(INDEX));

        configure(&path, &ConfigureOptions::default()).unwrap();

        // Whitespace and comments do not count as changes.
        std::fs::write(&path, format!("# touched\n{}", FIXTURE)).unwrap();
        let touched = configure(&path, &ConfigureOptions::default()).unwrap();
        assert!(touched.reused);

        // A semantic change does.
        let changed = FIXTURE.replace("find_package(bye REQUIRED)", "find_package(bye QUIET)");
        std::fs::write(&path, changed).unwrap();
        let rerun = configure(&path, &ConfigureOptions::default()).unwrap();
        assert!(!rerun.reused);
    }

    #[test]
    fn test_configure_fresh_ignores_stamp() {
        let (_tmp, path) = project(FIXTURE, Some(INDEX));

        configure(&path, &ConfigureOptions::default()).unwrap();
        let fresh = configure(
            &path,
            &ConfigureOptions {
                fresh: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!fresh.reused);
    }

    #[test]
    fn test_configure_requires_index() {
        let (_tmp, path) = project(FIXTURE, None);

        let err = configure(&path, &ConfigureOptions::default()).unwrap_err();
        assert!(err.to_string().contains("no package index"));
    }

    #[test]
    fn test_configure_schema_floor_checked_first() {
        // The index is absent as well, but the floor failure must win.
        let decl = "\
cmake_minimum_required(VERSION 99.0)
project(p CXX)
find_package(hello REQUIRED)
";
        let (_tmp, path) = project(decl, None);

        let err = configure(&path, &ConfigureOptions::default()).unwrap_err();
        assert!(err.to_string().contains("99.0"));
    }

    #[test]
    fn test_configure_rejects_invalid_declaration() {
        let decl = "\
project(p CXX)
find_package(hello REQUIRED)
find_package(hello REQUIRED)
";
        let (_tmp, path) = project(decl, Some(INDEX));

        let err = configure(&path, &ConfigureOptions::default()).unwrap_err();
        assert!(err.to_string().contains("configuration aborted"));
    }

    #[test]
    fn test_index_handle_override_is_used() {
        let decl = "\
project(p CXX)
find_package(zlib REQUIRED)
add_executable(app main.cpp)
target_link_libraries(app zlib::zlib)
";
        let index = "[packages.zlib]\ntarget = \"ZLIB::ZLIB\"\n";
        let (_tmp, path) = project(decl, Some(index));

        let report = configure(&path, &ConfigureOptions::default()).unwrap();
        assert_eq!(report.resolved[0].handle.as_str(), "ZLIB::ZLIB");
    }
}
