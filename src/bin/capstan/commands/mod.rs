//! Command implementations.

pub mod check;
pub mod completions;
pub mod configure;
pub mod convert;
pub mod init;
pub mod new;
pub mod show;

use std::path::PathBuf;

use anyhow::Result;
use capstan::util::diagnostic::suggestions;
use capstan::GlobalContext;

/// Resolve the declaration path from an optional CLI argument.
///
/// An explicit path is used as given; otherwise the declaration is found
/// by searching upward from the current directory.
pub fn resolve_declaration(path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path);
    }

    let ctx = GlobalContext::new()?;
    ctx.find_declaration().ok_or_else(|| {
        anyhow::anyhow!(
            "could not find CMakeLists.txt in {} or any parent directory\n{}",
            ctx.cwd().display(),
            suggestions::NO_DECLARATION
        )
    })
}
