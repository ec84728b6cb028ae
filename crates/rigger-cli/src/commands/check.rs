//! Check command implementation.
//!
//! Validates the mode and environment settings for a project and reports the
//! resolved paths. No collaborator is contacted: the resolver is not consulted and
//! no dev server is provisioned.

use rigger_config::{Assembler, BuildEnvironment, Mode, ServiceWorkerFlag};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Findings of a check, in display order.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub rows: Vec<(String, String)>,
    pub warnings: Vec<String>,
}

/// Execute the check command.
///
/// # Errors
///
/// Returns an error for an unsupported mode, an invalid setting, an invalid
/// `rigger.toml`, or a missing project root.
pub async fn execute(args: CheckArgs) -> Result<()> {
    ui::info(&format!("Checking {} configuration...", args.mode));
    let root = utils::project_root(&args.root)?;

    let env = utils::load_environment(&root, &args.mode, args.no_dotenv)?;
    let assembler = Assembler::load(&root)?;
    let report = inspect(&assembler, &env);

    for warning in &report.warnings {
        ui::warning(warning);
    }
    ui::print_summary("Project", &report.rows);
    ui::success("Configuration is valid");
    Ok(())
}

/// Inspect the project layout and environment without assembling.
pub fn inspect(assembler: &Assembler, env: &BuildEnvironment) -> CheckReport {
    let defaults = assembler.defaults();
    let paths = assembler.paths();
    let mut report = CheckReport::default();

    let entry = paths.source_module(&defaults.layout.bootstrap_module);
    if !entry.is_file() {
        report
            .warnings
            .push(format!("Bootstrap module not found: {}", entry.display()));
    }

    // Only the development proxy reads the upward definition
    let upward = paths.project_file(&defaults.layout.upward_definition);
    if env.mode() == Mode::Development && !upward.is_file() {
        report
            .warnings
            .push(format!("Upward definition not found: {}", upward.display()));
    }

    let file_name = env
        .service_worker_file_name()
        .unwrap_or(defaults.service_worker_file_name.as_str());
    let service_worker =
        match ServiceWorkerFlag::resolve(env.mode(), env.service_worker_debugging(), file_name) {
            ServiceWorkerFlag::Register(name) => name,
            ServiceWorkerFlag::Disabled => "disabled".to_string(),
        };

    report.rows = vec![
        ("mode".to_string(), env.mode().to_string()),
        ("root".to_string(), paths.root.display().to_string()),
        ("source".to_string(), paths.src.display().to_string()),
        ("output".to_string(), paths.output.display().to_string()),
        (
            format!("entry {}", defaults.layout.entry_name),
            entry.display().to_string(),
        ),
        ("service worker".to_string(), service_worker),
    ];
    if let Some(domain) = env.backend_domain() {
        report.rows.push(("backend".to_string(), domain.to_string()));
    }
    if let Some(media) = env.product_media_path() {
        report.rows.push(("product media".to_string(), media.to_string()));
    }
    report
}
