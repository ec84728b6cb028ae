//! Error handling for the Rigger CLI.
//!
//! Commands return [`CliError`]. Assembly failures are wrapped unchanged so the
//! miette conversion in [`miette`](self::miette) can attach hints per variant.

use std::path::PathBuf;

use rigger_config::AssembleError;
use thiserror::Error;

mod miette;

pub use self::miette::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// Project root given on the command line does not exist
    #[error("Project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
