//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Capstan - a configure-declaration front end for CMake-style build scripts
#[derive(Parser)]
#[command(name = "capstan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project with a starter declaration
    New(NewArgs),

    /// Initialize a declaration in an existing directory
    Init(InitArgs),

    /// Parse and validate a declaration
    Check(CheckArgs),

    /// Display the parsed entity set of a declaration
    Show(ShowArgs),

    /// Re-express a declaration in the other syntax
    Convert(ConvertArgs),

    /// Run configure-time dependency lookups
    Configure(ConfigureArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct NewArgs {
    /// Project name
    pub name: String,

    /// Scaffold a library target instead of an executable
    #[arg(long)]
    pub lib: bool,

    /// Directory to create the project in (defaults to name)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct InitArgs {
    /// Project name (defaults to directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Scaffold a library target instead of an executable
    #[arg(long)]
    pub lib: bool,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Declaration file (found by searching upward when omitted)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Declaration file (found by searching upward when omitted)
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: ShowFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ShowFormat {
    Human,
    Json,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Declaration file (found by searching upward when omitted)
    pub path: Option<PathBuf>,

    /// Output syntax (defaults to the opposite of the input)
    #[arg(long, value_enum)]
    pub to: Option<ConvertFormat>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConvertFormat {
    Script,
    Manifest,
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Declaration file (found by searching upward when omitted)
    pub path: Option<PathBuf>,

    /// Package index to resolve lookups against
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Ignore any existing stamp and run the lookups again
    #[arg(long)]
    pub fresh: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
