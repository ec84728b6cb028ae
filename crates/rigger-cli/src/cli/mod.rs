//! Command-line interface definition.
//!
//! - `rigger assemble` - Assemble the pipeline configuration and print or write it as JSON
//! - `rigger check` - Validate the environment and summarize the project layout

mod commands;

use clap::Parser;

pub use commands::{AssembleArgs, CheckArgs, Command};

/// Rigger - environment-conditional bundler pipeline assembly
#[derive(Parser, Debug)]
#[command(
    name = "rigger",
    version,
    about = "Assemble bundler pipeline configurations for web applications",
    long_about = "Rigger assembles the configuration a JavaScript bundling engine consumes.\n\
                  The deployment mode selects either a development pipeline (dev server,\n\
                  hot module replacement, eval source maps) or a production pipeline\n\
                  (parallel minifier, performance hints)."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
