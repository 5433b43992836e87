//! Capstan CLI - a configure-declaration front end

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("capstan=debug")
    } else {
        EnvFilter::new("capstan=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color;

    match cli.command {
        Commands::New(args) => commands::new::execute(args),
        Commands::Init(args) => commands::init::execute(args),
        Commands::Check(args) => commands::check::execute(args, color),
        Commands::Show(args) => commands::show::execute(args),
        Commands::Convert(args) => commands::convert::execute(args),
        Commands::Configure(args) => commands::configure::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
