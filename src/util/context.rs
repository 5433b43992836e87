//! Global context for Capstan operations.
//!
//! Provides centralized access to paths and output settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default file name of a configure declaration.
pub const DECLARATION_FILE: &str = "CMakeLists.txt";

/// Default file name of the native manifest re-expression.
pub const MANIFEST_FILE: &str = "Capstan.toml";

/// Default file name of the package index.
pub const INDEX_FILE: &str = "capstan-index.toml";

/// Global context containing paths and output settings.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(GlobalContext {
            cwd,
            verbose: false,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find the declaration file starting from cwd and searching upward.
    pub fn find_declaration(&self) -> Option<PathBuf> {
        let mut current = self.cwd.clone();
        loop {
            let candidate = current.join(DECLARATION_FILE);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Get the project-local Capstan directory next to a declaration.
    pub fn project_capstan_dir(declaration: &Path) -> PathBuf {
        declaration
            .parent()
            .unwrap_or(Path::new("."))
            .join(".capstan")
    }

    /// Get the configure-stamp path for a declaration.
    pub fn stamp_path(declaration: &Path) -> PathBuf {
        Self::project_capstan_dir(declaration).join("configure-stamp.toml")
    }

    /// Get the default index path next to a declaration.
    pub fn default_index_path(declaration: &Path) -> PathBuf {
        declaration
            .parent()
            .unwrap_or(Path::new("."))
            .join(INDEX_FILE)
    }

    /// Ensure a directory exists, creating it if necessary.
    pub fn ensure_dir(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new().expect("failed to create default GlobalContext")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_declaration_in_cwd() {
        let tmp = TempDir::new().unwrap();
        let decl = tmp.path().join(DECLARATION_FILE);
        std::fs::write(&decl, "project(test)\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        assert_eq!(ctx.find_declaration(), Some(decl));
    }

    #[test]
    fn test_find_declaration_searches_upward() {
        let tmp = TempDir::new().unwrap();
        let decl = tmp.path().join(DECLARATION_FILE);
        std::fs::write(&decl, "project(test)\n").unwrap();

        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested).unwrap();
        assert_eq!(ctx.find_declaration(), Some(decl));
    }

    #[test]
    fn test_stamp_path_lives_in_project_dir() {
        let stamp = GlobalContext::stamp_path(Path::new("/proj/CMakeLists.txt"));
        assert_eq!(
            stamp,
            Path::new("/proj/.capstan/configure-stamp.toml")
        );
    }
}
