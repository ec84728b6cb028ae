//! Assemble command implementation.
//!
//! Prints the pipeline configuration as JSON on stdout, or writes it to `--out`.

use std::time::Instant;

use rigger_config::PipelineConfig;

use crate::cli::AssembleArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the assemble command.
///
/// # Errors
///
/// Returns the assembly error unchanged for unsupported modes, invalid
/// settings and collaborator failures. Nothing is written in that case.
pub async fn execute(args: AssembleArgs) -> Result<()> {
    let start = Instant::now();
    let root = utils::project_root(&args.root)?;

    let config = utils::assemble_project(&root, &args.mode, args.no_dotenv).await?;
    let json = render(&config, args.compact)?;

    match &args.out {
        Some(path) => {
            let path = utils::resolve_path(path, &std::env::current_dir()?);
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, &json)
                .await
                .map_err(|source| CliError::Write {
                    path: path.clone(),
                    source,
                })?;
            ui::success(&format!(
                "Wrote {} pipeline to {} ({}, {})",
                config.mode(),
                path.display(),
                ui::format_size(json.len() as u64),
                ui::format_duration(start.elapsed())
            ));
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Serialize the configuration, pretty unless `compact`.
pub fn render(config: &PipelineConfig, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(config)?
    } else {
        serde_json::to_string_pretty(config)?
    };
    Ok(json)
}
