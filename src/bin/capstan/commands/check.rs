//! `capstan check` command

use anyhow::Result;

use crate::cli::CheckArgs;
use crate::commands::resolve_declaration;
use capstan::ops::check;
use capstan::util::diagnostic::emit_all;

pub fn execute(args: CheckArgs, color: bool) -> Result<()> {
    let path = resolve_declaration(args.path)?;
    let report = check(&path)?;

    let errors = emit_all(&report.diagnostics, color);
    if errors > 0 {
        anyhow::bail!(
            "{} failed validation with {} error{}",
            report.path.display(),
            errors,
            if errors == 1 { "" } else { "s" }
        );
    }

    println!(
        "{}: ok ({} dependencies, {} targets)",
        report.path.display(),
        report.declaration.dependencies.len(),
        report.declaration.targets.len()
    );
    Ok(())
}
