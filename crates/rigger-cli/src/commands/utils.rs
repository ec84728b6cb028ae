//! Shared utilities for command implementations.

use std::path::{Path, PathBuf};

use rigger_config::{Assembler, BuildEnvironment, EnvironmentLoader, PipelineConfig};
use tracing::debug;

use crate::error::{CliError, Result};

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Absolute project root, which must be an existing directory.
pub fn project_root(root: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let root = resolve_path(root, &cwd);
    if !root.is_dir() {
        return Err(CliError::RootNotFound(root));
    }
    Ok(root)
}

/// Load the environment for `mode` from `.env` and the process environment.
///
/// An unsupported mode fails before `.env` is read.
pub fn load_environment(root: &Path, mode: &str, no_dotenv: bool) -> Result<BuildEnvironment> {
    let mut loader = EnvironmentLoader::new(root);
    if no_dotenv {
        loader = loader.without_dotenv();
    }
    let env = loader.load(mode)?;
    debug!("Loaded environment: {:?}", env.settings());
    Ok(env)
}

/// Load the environment for `mode` and assemble the project's pipeline.
pub async fn assemble_project(root: &Path, mode: &str, no_dotenv: bool) -> Result<PipelineConfig> {
    let env = load_environment(root, mode, no_dotenv)?;
    let assembler = Assembler::load(root)?;
    Ok(assembler.assemble(&env).await?)
}
