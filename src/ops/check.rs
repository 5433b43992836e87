//! Declaration loading and validation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::Declaration;
use crate::manifest::parse_manifest;
use crate::parse::parse_script;
use crate::util::diagnostic::Diagnostic;

/// The outcome of checking a declaration.
#[derive(Debug)]
pub struct CheckReport {
    /// The file that was checked
    pub path: PathBuf,

    /// The parsed entity set
    pub declaration: Declaration,

    /// Collected diagnostics, in validation order
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Check if validation passed (warnings and notes allowed).
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }
}

/// Load a declaration from either syntax.
///
/// `.toml` files are read as manifests; everything else as script.
pub fn load_declaration(path: &Path) -> Result<Declaration> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read declaration: {}", path.display()))?;

    if is_manifest(path) {
        return parse_manifest(&content);
    }

    parse_script(&content, path.display().to_string()).map_err(|e| {
        let (line, col) = line_col(&content, e.span.offset());
        anyhow::Error::new(e).context(format!(
            "invalid declaration at {}:{}:{}",
            path.display(),
            line,
            col
        ))
    })
}

/// Check whether a path holds the manifest re-expression.
pub fn is_manifest(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "toml")
}

/// Parse and validate a declaration file.
pub fn check(path: &Path) -> Result<CheckReport> {
    let declaration = load_declaration(path)?;
    let diagnostics = declaration.validate(path.parent());

    Ok(CheckReport {
        path: path.to_path_buf(),
        declaration,
        diagnostics,
    })
}

fn line_col(content: &str, offset: usize) -> (usize, usize) {
    let clamped = offset.min(content.len());
    let before = &content[..clamped];
    let line = before.matches('\n').count() + 1;
    let col = before
        .rfind('\n')
        .map(|nl| clamped - nl)
        .unwrap_or(clamped + 1);
    (line, col)
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

    #[test]
    fn test_check_fixture() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CMakeLists.txt");
        std::fs::write(&path, FIXTURE).unwrap();
        std::fs::write(tmp.path().join("main.cpp"), "int main() { return 0; }\n").unwrap();

        let report = check(&path).unwrap();
        assert!(report.is_ok(), "{:?}", report.diagnostics);
        assert_eq!(report.declaration.dependencies.len(), 2);
    }

    #[test]
    fn test_check_reports_missing_source_as_note_only() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CMakeLists.txt");
        std::fs::write(&path, FIXTURE).unwrap();

        let report = check(&path).unwrap();
        // A missing source file is a build-time concern.
        assert!(report.is_ok());
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.message.contains("main.cpp")));
    }

    #[test]
    fn test_check_duplicate_dependency_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CMakeLists.txt");
        std::fs::write(
            &path,
            "project(p)\nfind_package(hello REQUIRED)\nfind_package(hello REQUIRED)\n",
        )
        .unwrap();

        let report = check(&path).unwrap();
        assert!(!report.is_ok());
    }

    #[test]
    fn test_load_manifest_by_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Capstan.toml");
        std::fs::write(
            &path,
            "[project]\nname = \"MyApp\"\n\n[dependencies]\nhello = \"required\"\n",
        )
        .unwrap();

        let decl = load_declaration(&path).unwrap();
        assert_eq!(decl.project_name(), Some("MyApp"));
        assert_eq!(decl.dependencies.len(), 1);
    }

    #[test]
    fn test_parse_error_carries_location() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CMakeLists.txt");
        std::fs::write(&path, "project(p)\nbogus_command()\n").unwrap();

        let err = load_declaration(&path).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("bogus_command"));
        assert!(msg.contains(":2:"));
    }

    #[test]
    fn test_line_col() {
        assert_eq!(line_col("abc", 1), (1, 2));
        assert_eq!(line_col("a\nbc", 2), (2, 1));
        assert_eq!(line_col("a\nbc", 3), (2, 2));
    }
}
