//! Logging for the Rigger CLI.
//!
//! Assembly progress is reported through `tracing`. The CLI installs a compact
//! formatter on stderr so that `rigger assemble` can write JSON to stdout untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use rigger_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Assembling pipeline");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "rigger=debug,rigger_config=debug,rigger_cli=debug";
const QUIET_FILTER: &str = "rigger=error";
const DEFAULT_FILTER: &str = "rigger=info,rigger_config=info,rigger_cli=info";

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: DEBUG for rigger crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. INFO for rigger crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(select_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Whether stderr should receive ANSI colors.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise the terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_filter_enables_debug() {
        let filter = select_filter(true, false).to_string();
        assert!(filter.contains("rigger_config=debug"));
    }

    #[test]
    fn quiet_filter_is_errors_only() {
        assert_eq!(select_filter(false, true).to_string(), QUIET_FILTER);
    }

    #[test]
    fn verbose_takes_precedence_over_quiet() {
        let filter = select_filter(true, true).to_string();
        assert!(filter.contains("debug"));
    }
}
