//! `capstan new` command

use anyhow::Result;

use crate::cli::NewArgs;
use capstan::ops::scaffold::{new_project, NewOptions};

pub fn execute(args: NewArgs) -> Result<()> {
    let path = args.path.unwrap_or_else(|| args.name.clone().into());

    let opts = NewOptions {
        name: args.name.clone(),
        lib: args.lib,
        init: false,
    };
    new_project(&path, &opts)?;

    let kind = if args.lib { "library" } else { "executable" };
    println!("Created {} project `{}`", kind, args.name);
    Ok(())
}
