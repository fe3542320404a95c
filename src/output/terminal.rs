//! Terminal formatting with colors and aligned columns.
//!
//! Padding is applied before coloring so escape codes never shift columns.

use colored::Colorize;

use crate::checks::ResolutionWarning;
use crate::result::Report;

/// Width of each right-aligned figure column.
const FIGURE_WIDTH: usize = 12;

/// Format a duration in microseconds, scaled for readability.
///
/// Values below 1000 us print in microseconds, larger ones in milliseconds,
/// always with three decimals.
pub fn format_duration(us: f64) -> String {
    if us >= 1_000.0 {
        format!("{:.3} ms", us / 1_000.0)
    } else {
        format!("{:.3} \u{00B5}s", us)
    }
}

/// Format a report as one aligned row.
///
/// Layout: label padded (or truncated) to `label_width`, then the minimum
/// and the mean in fixed-width columns, then a caveat marker when the run
/// is close to the clock resolution.
pub fn format_report(report: &Report, label_width: usize) -> String {
    let label = fit_label(&report.label, label_width);
    let min = format!("{:>width$}", format_duration(report.summary.min_us), width = FIGURE_WIDTH);
    let mean = format!("{:>width$}", format_duration(report.summary.mean_us), width = FIGURE_WIDTH);

    let mut row = format!("{}  min {}  mean {}", label, min.bold(), mean);
    if let Some(warning) = &report.warning {
        row.push_str("  ");
        row.push_str(&format_caveat(warning));
    }
    row
}

/// Format the clock resolution line printed once per session.
pub fn format_resolution(resolution_us: f64) -> String {
    format!(
        "Clock resolution: {} (figures near this are unreliable)",
        format_duration(resolution_us)
    )
}

fn format_caveat(warning: &ResolutionWarning) -> String {
    match warning {
        ResolutionWarning::BelowResolution { .. } => {
            "[!] below clock resolution".red().bold().to_string()
        }
        ResolutionWarning::NearResolution { .. } => {
            "[!] near clock resolution".yellow().to_string()
        }
        ResolutionWarning::HighQuantization { .. } => "[~] quantized".yellow().to_string(),
    }
}

/// Pad `label` to exactly `width` characters, truncating with an ellipsis.
fn fit_label(label: &str, width: usize) -> String {
    let len = label.chars().count();
    if len <= width {
        return format!("{:<width$}", label, width = width);
    }
    let mut fitted: String = label.chars().take(width.saturating_sub(1)).collect();
    fitted.push('\u{2026}');
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::Summary;

    fn make_report(label: &str, min_us: f64, mean_us: f64) -> Report {
        Report {
            label: label.to_string(),
            summary: Summary {
                samples: 100,
                min_us,
                mean_us,
                max_us: mean_us * 2.0,
            },
            resolution_us: 0.02,
            warmup: 10,
            warning: None,
        }
    }

    #[test]
    fn test_format_duration_scaling() {
        assert_eq!(format_duration(1.5), "1.500 \u{00B5}s");
        assert_eq!(format_duration(999.9994), "999.999 \u{00B5}s");
        assert_eq!(format_duration(1_500.0), "1.500 ms");
        assert_eq!(format_duration(0.0), "0.000 \u{00B5}s");
    }

    #[test]
    fn test_format_report_contents() {
        let row = format_report(&make_report("mocked method", 1.5, 2.25), 20);
        assert!(row.starts_with("mocked method       "));
        assert!(row.contains("1.500 \u{00B5}s"));
        assert!(row.contains("mean"));
        assert!(row.contains("2.250 \u{00B5}s"));
        assert!(!row.contains("[!]"));
    }

    #[test]
    fn test_rows_align() {
        let short = format_report(&make_report("event", 1.0, 2.0), 24);
        let long = format_report(&make_report("property getter via proxy", 10.0, 20.0), 24);
        let column = |row: &str| row[..row.find("  min ").unwrap()].chars().count();
        assert_eq!(column(&short), 24);
        assert_eq!(column(&long), 24);
    }

    #[test]
    fn test_long_label_truncated() {
        assert_eq!(fit_label("abcdefgh", 5), "abcd\u{2026}");
        assert_eq!(fit_label("abc", 5), "abc  ");
    }

    #[test]
    fn test_caveat_marker() {
        let mut report = make_report("tiny", 0.01, 0.015);
        report.warning = Some(ResolutionWarning::BelowResolution {
            mean_us: 0.015,
            resolution_us: 0.02,
        });
        let row = format_report(&report, 10);
        assert!(row.contains("below clock resolution"));
    }

    #[test]
    fn test_format_resolution() {
        let line = format_resolution(0.041);
        assert!(line.starts_with("Clock resolution: 0.041 \u{00B5}s"));
    }
}
