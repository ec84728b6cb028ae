//! Miette diagnostic conversion for CLI errors.

use miette::{Report, miette};
use rigger_config::{AssembleError, CollaboratorError};

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Assemble(e) => assemble_error_to_miette(e),
        CliError::RootNotFound(path) => miette!(
            help = "Pass --root <DIR> pointing at the project directory",
            "Project root not found: {}",
            path.display()
        ),
        _ => miette!("{}", err),
    }
}

/// Convert AssembleError to miette Report
pub fn assemble_error_to_miette(err: AssembleError) -> Report {
    match err {
        AssembleError::UnsupportedMode(mode) => miette!(
            code = "rigger::unsupported_mode",
            help = "Use --mode development or --mode production",
            "Unsupported mode {:?}",
            mode
        ),
        AssembleError::InvalidSetting { key, message } => miette!(
            code = "rigger::invalid_setting",
            help = format!("Check the value given for {key}"),
            "Invalid value for {}: {}",
            key,
            message
        ),
        AssembleError::Resolver(CollaboratorError::RootNotFound(path)) => miette!(
            code = "rigger::resolver",
            help = "Pass --root <DIR> pointing at the project directory",
            "Module resolver could not find project root {}",
            path.display()
        ),
        AssembleError::DevServer(e) => miette!(
            code = "rigger::dev_server",
            help = "Development builds need a free local port and a writable .rigger/certs directory",
            "Dev server provisioning failed: {}",
            e
        ),
        other => miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_mode_has_help() {
        let report = cli_error_to_miette(AssembleError::UnsupportedMode("staging".into()).into());
        assert!(report.to_string().contains("staging"));
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("--mode production"));
    }

    #[test]
    fn invalid_setting_names_the_key() {
        let err = AssembleError::InvalidSetting {
            key: "environment".into(),
            message: "missing field `mode`".into(),
        };
        let report = cli_error_to_miette(err.into());
        assert!(report.to_string().contains("missing field `mode`"));
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("environment"));
    }

    #[test]
    fn other_errors_keep_display() {
        let err = CliError::Io(std::io::Error::other("disk full"));
        assert!(cli_error_to_miette(err).to_string().contains("disk full"));
    }
}
