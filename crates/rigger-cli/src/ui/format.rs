//! Formatting for sizes, durations, and pipeline summaries.

use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;

use super::colors_enabled;

/// Human-readable size, e.g. `"4.21 KB"`.
///
/// ```
/// use rigger_cli::ui::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(2048), "2.00 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.2} {}", UNITS[unit])
    }
}

/// Human-readable duration: milliseconds below one second, seconds otherwise.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Print a titled key/value table to stderr.
pub fn print_summary(title: &str, rows: &[(String, String)]) {
    let width = (Term::stderr().size().1 as usize).min(72);
    let key_width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    if colors_enabled() {
        eprintln!("\n{}", title.bold().underline());
    } else {
        eprintln!("\n{title}");
    }
    eprintln!("{}", "─".repeat(width));

    for (key, value) in rows {
        if colors_enabled() {
            eprintln!("  {:key_width$}  {}", key.bright_white().bold(), value.dimmed());
        } else {
            eprintln!("  {key:key_width$}  {value}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_572_864), "1.50 MB");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(12)), "12ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn summary_handles_empty_rows() {
        print_summary("Pipeline", &[]);
        print_summary(
            "Pipeline",
            &[("mode".to_string(), "production".to_string())],
        );
    }
}
