use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available Rigger subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the pipeline configuration for a mode
    ///
    /// Loads `.env`, `rigger.toml` and `RIGGER_*` variables from the project
    /// root, assembles the configuration, and prints it as JSON. Development
    /// mode provisions a local dev server (hostname, port, certificate dir).
    Assemble(AssembleArgs),

    /// Validate the environment and summarize the project layout
    ///
    /// Useful for verifying that a project's environment is valid for a mode.
    Check(CheckArgs),
}

/// Arguments for the assemble command
#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Deployment mode: development or production
    ///
    /// Any other value is rejected before anything is read or provisioned.
    #[arg(short, long, value_name = "MODE")]
    pub mode: String,

    /// Project root containing src/, .env and rigger.toml
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Write the configuration to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Ignore the project's .env file
    #[arg(long)]
    pub no_dotenv: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Deployment mode: development or production
    #[arg(short, long, value_name = "MODE")]
    pub mode: String,

    /// Project root containing src/, .env and rigger.toml
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Ignore the project's .env file
    #[arg(long)]
    pub no_dotenv: bool,
}
