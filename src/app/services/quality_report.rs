//! Markdown rendering of the data quality report

use crate::app::services::record_processor::QualityReport;
use std::fmt::Write;

/// Render the human-readable report for one run date
///
/// Reasons are listed in report order, most frequent first.
pub fn render_quality_report(date: &str, report: &QualityReport) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "# Data Quality report — {}", date);
    let _ = writeln!(
        out,
        "This report summarizes validation results for `sensor_readings` during Bronze → Silver."
    );
    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out, "- Total rows read: **{}**", report.total);
    let _ = writeln!(out, "- Clean rows written: **{}**", report.clean);
    let _ = writeln!(
        out,
        "- Rejected rows written (quarantine): **{}**",
        report.rejects
    );
    let _ = writeln!(
        out,
        "- Duplicate reading_id rejected: **{}**",
        report.dup_rejects
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "## Reject reasons (top)");
    for bucket in &report.reasons {
        let _ = writeln!(out, "- {}: {}", bucket.reason, bucket.count);
    }

    out
}
