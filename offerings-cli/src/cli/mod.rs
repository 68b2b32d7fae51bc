pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::naming::{Convention, ServiceKind};

#[derive(Parser)]
#[command(name = "offerings-cli")]
#[command(about = "Generate service catalog offerings from existing offering exports")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
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
    /// Generate new offerings from a run file
    Generate(GenerateArgs),
    /// Preview the name generated for one parent offering
    Name(NameArgs),
    /// Print a fresh service commitment block
    Commitments(CommitmentArgs),
    /// Print a commented run file template
    InitConfig(InitConfigArgs),
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Run file (defaults to the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the source directory
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Override the output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct NameArgs {
    /// Parent offering, e.g. "[Parent HS PL IT] Software assistance"
    #[arg(short, long)]
    pub parent: String,

    /// SR or IM
    #[arg(short, long, default_value = "SR")]
    pub kind: ServiceKind,

    #[arg(short, long)]
    pub app: Option<String>,

    /// Schedule suffix
    #[arg(short, long, default_value = "")]
    pub schedule: String,

    #[arg(short, long, default_value = "standard")]
    pub convention: Convention,

    /// Receiving party, e.g. "HS DE"
    #[arg(short, long, default_value = "")]
    pub receiver: String,

    /// Delivering party for CORP conventions
    #[arg(short, long, default_value = "")]
    pub delivering: String,

    /// Build a level 2 name with this service type
    #[arg(long)]
    pub lvl2: Option<String>,

    /// Never add the Prod token
    #[arg(long)]
    pub no_prod: bool,
}

#[derive(clap::Args)]
pub struct CommitmentArgs {
    /// Country code for the line prefix
    #[arg(long)]
    pub country: String,

    #[arg(short, long, default_value = "SR")]
    pub kind: ServiceKind,

    #[arg(short, long)]
    pub schedule: String,

    /// Response duration
    #[arg(long)]
    pub rsp: String,

    /// Resolution duration
    #[arg(long)]
    pub rsl: String,

    /// Existing block to rewrite instead of generating a fresh one
    #[arg(long)]
    pub update: Option<String>,
}

#[derive(clap::Args)]
pub struct InitConfigArgs {
    /// Write the template to the default config path instead of stdout
    #[arg(short, long)]
    pub write: bool,

    /// Overwrite an existing run file
    #[arg(short, long, requires = "write")]
    pub force: bool,
}
