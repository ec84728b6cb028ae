//! Terminal output for status messages and summaries.
//!
//! All status output goes to stderr; stdout is reserved for the assembled
//! configuration.
//!
//! ```no_run
//! use rigger_cli::ui;
//!
//! ui::init_colors(false);
//! ui::info("Assembling production pipeline...");
//! ui::success("Pipeline assembled");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_summary};
pub use messages::{info, success, warning};

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

/// Decide once whether status messages are colored.
pub fn init_colors(no_color: bool) {
    COLOR_ENABLED.store(!no_color && crate::logger::should_use_colors(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLOR_ENABLED.load(Ordering::Relaxed)
}
