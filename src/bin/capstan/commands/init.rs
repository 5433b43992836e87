//! `capstan init` command

use anyhow::{Context, Result};

use crate::cli::InitArgs;
use capstan::ops::scaffold::{init_project, NewOptions};

pub fn execute(args: InitArgs) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("failed to get current directory")?,
    };

    let name = match args.name {
        Some(name) => name,
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .context("cannot derive a project name from the target directory")?,
    };

    let opts = NewOptions {
        name: name.clone(),
        lib: args.lib,
        init: true,
    };
    init_project(&path, &opts)?;

    println!("Initialized project `{}`", name);
    Ok(())
}
