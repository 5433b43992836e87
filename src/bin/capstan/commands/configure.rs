//! `capstan configure` command

use anyhow::Result;

use crate::cli::ConfigureArgs;
use crate::commands::resolve_declaration;
use capstan::ops::configure::{configure, ConfigureOptions};

pub fn execute(args: ConfigureArgs) -> Result<()> {
    let path = resolve_declaration(args.path)?;

    let opts = ConfigureOptions {
        index_path: args.index,
        fresh: args.fresh,
    };
    let report = configure(&path, &opts)?;

    for lookup in &report.resolved {
        match &lookup.version {
            Some(version) => println!("resolved {} {} -> {}", lookup.name, version, lookup.handle),
            None => println!("resolved {} -> {}", lookup.name, lookup.handle),
        }
    }
    for name in &report.skipped {
        println!("skipped {} (optional, not in index)", name);
    }

    let status = if report.reused {
        "up to date"
    } else {
        "complete"
    };
    println!(
        "Configured `{}`: {} ({} resolved, {} skipped)",
        report.project,
        status,
        report.resolved.len(),
        report.skipped.len()
    );
    Ok(())
}
