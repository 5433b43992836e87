//! User-friendly diagnostic messages.
//!
//! Every error carries its root cause and, where one exists, a suggested
//! fix. Configuration is all-or-nothing: diagnostics are collected, shown
//! together, and any error-severity entry aborts the run.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no declaration file is found.
    pub const NO_DECLARATION: &str = "help: Run `capstan init` to create a declaration";

    /// Suggestion when a declaration omits its schema floor.
    pub const NO_SCHEMA_FLOOR: &str =
        "help: Add `cmake_minimum_required(VERSION 3.24)` as the first line";

    /// Suggestion when the schema floor is above what the tool supports.
    pub const SCHEMA_TOO_NEW: &str =
        "help: Lower the declared floor, or upgrade capstan to a newer schema";

    /// Suggestion when no project is declared.
    pub const NO_PROJECT: &str = "help: Add `project(<name> CXX)` after the schema floor";

    /// Suggestion when a dependency is declared twice.
    pub const DUPLICATE_DEPENDENCY: &str = "help: Remove the duplicate `find_package` call";

    /// Suggestion when a link edge names an undeclared dependency.
    pub const UNDECLARED_LINK: &str =
        "help: Declare the dependency with `find_package(<name> REQUIRED)` before linking it";

    /// Suggestion when a required lookup cannot be satisfied.
    pub const MISSING_DEPENDENCY: &str =
        "help: Add the package to the index, or mark the lookup optional";

    /// Suggestion when the package index file is absent.
    pub const NO_INDEX: &str =
        "help: Create a `capstan-index.toml` listing the packages resolution can satisfy";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            ..Diagnostic::error("")
        }
    }

    /// Create a new note diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Note,
            ..Diagnostic::error("")
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Check if this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
                Severity::Note => "\x1b[1;36mnote\x1b[0m",
                Severity::Help => "\x1b[1;32mhelp\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Note => "note",
                Severity::Help => "help",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  -> {}\n", ctx));
        }

        for suggestion in &self.suggestions {
            output.push_str(&format!("  {}\n", suggestion));
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

/// Print a batch of diagnostics and return the number of errors among them.
pub fn emit_all(diagnostics: &[Diagnostic], color: bool) -> usize {
    for diag in diagnostics {
        emit(diag, color);
    }
    diagnostics.iter().filter(|d| d.is_error()).count()
}

/// A required dependency lookup that no source can satisfy.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("could not resolve required dependency `{package}`")]
#[diagnostic(code(capstan::configure::missing_dependency))]
pub struct MissingDependencyError {
    pub package: String,
    #[help]
    pub suggestion: Option<String>,
}

impl MissingDependencyError {
    /// Create the error with the standard suggestion attached.
    pub fn new(package: impl Into<String>) -> Self {
        MissingDependencyError {
            package: package.into(),
            suggestion: Some(suggestions::MISSING_DEPENDENCY.to_string()),
        }
    }
}

/// A declaration whose schema floor exceeds the tool's schema version.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("declaration requires schema version {declared}, tool supports {supported}")]
#[diagnostic(
    code(capstan::schema::floor_not_met),
    help("Lower the declared floor or upgrade capstan")
)]
pub struct SchemaFloorError {
    pub declared: String,
    pub supported: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("dependency `hello` is declared more than once")
            .with_context("first declared at line 4")
            .with_suggestion(suggestions::DUPLICATE_DEPENDENCY);

        let output = diag.format(false);
        assert!(output.contains("error: dependency `hello`"));
        assert!(output.contains("first declared at line 4"));
        assert!(output.contains("help: Remove the duplicate"));
    }

    #[test]
    fn test_emit_all_counts_errors() {
        let diags = vec![
            Diagnostic::warning("w"),
            Diagnostic::error("e1"),
            Diagnostic::note("n"),
            Diagnostic::error("e2"),
        ];
        assert_eq!(emit_all(&diags, false), 2);
    }

    #[test]
    fn test_missing_dependency_error() {
        let err = MissingDependencyError::new("hello");
        assert!(err.to_string().contains("`hello`"));
        assert!(err.suggestion.is_some());
    }
}
