//! `capstan convert` command

use anyhow::{Context, Result};

use crate::cli::{ConvertArgs, ConvertFormat};
use crate::commands::resolve_declaration;
use capstan::ops::convert::{convert, ConvertTarget};

pub fn execute(args: ConvertArgs) -> Result<()> {
    let path = resolve_declaration(args.path)?;

    let to = match args.to {
        Some(ConvertFormat::Script) => ConvertTarget::Script,
        Some(ConvertFormat::Manifest) => ConvertTarget::Manifest,
        None => ConvertTarget::opposite_of(&path),
    };

    let output = convert(&path, to)?;

    match args.output {
        Some(out) => {
            std::fs::write(&out, output)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}
