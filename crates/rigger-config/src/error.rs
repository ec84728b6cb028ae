//! Error types for environment loading and pipeline assembly.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssembleError>;

/// Result type returned by external collaborators.
pub type CollaboratorResult<T> = std::result::Result<T, CollaboratorError>;

#[derive(Debug, Error)]
pub enum AssembleError {
    // Fatal misconfiguration, raised before any collaborator runs
    #[error("unsupported environment mode {0:?}: expected \"development\" or \"production\"")]
    UnsupportedMode(String),

    #[error("invalid value for {key}: {message}")]
    InvalidSetting { key: String, message: String },

    #[error("invalid module rule pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // Layered configuration errors (rigger.toml, .env, process environment)
    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),

    // Collaborator failures propagate unchanged; assembly never retries
    #[error("module resolver failed: {0}")]
    Resolver(#[source] CollaboratorError),

    #[error("dev server provisioning failed: {0}")]
    DevServer(#[source] CollaboratorError),

    #[error("failed to serialize pipeline configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by resolver and dev-server collaborators.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("project root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("no free port available on {host}")]
    NoFreePort { host: String },

    #[error("TLS certificate provisioning failed for {host}: {reason}")]
    Certificate { host: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
