//! Human Output
//!
//! Aligned terminal table: `config` label column on the left, one
//! right-aligned metric column per backend, followed by a short summary.

use crate::report::Report;

/// Format a report for human-readable terminal display.
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();
    output.push('\n');

    if report.rows.is_empty() {
        output.push_str("No benchmark configurations found.\n");
        return output;
    }

    let headers: Vec<&str> = std::iter::once("config")
        .chain(report.columns.iter().map(String::as_str))
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &report.rows {
        widths[0] = widths[0].max(row.config.len());
        for (idx, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx + 1) {
                *width = (*width).max(cell.display().len());
            }
        }
    }

    push_line(&mut output, &widths, &headers, false);
    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rules: Vec<&str> = rules.iter().map(String::as_str).collect();
    push_line(&mut output, &widths, &rules, false);

    for row in &report.rows {
        let fields: Vec<&str> = std::iter::once(row.config.as_str())
            .chain(row.cells.iter().map(|cell| cell.display()))
            .collect();
        push_line(&mut output, &widths, &fields, true);
    }

    output.push('\n');
    output.push_str(&format!(
        "{} configuration(s), {} metric(s) collected",
        report.summary.configs, report.summary.collected
    ));
    if report.summary.missing_metric > 0 {
        output.push_str(&format!(", {} without metric", report.summary.missing_metric));
    }
    if report.summary.missing_executable > 0 {
        output.push_str(&format!(
            ", {} skipped (executable not found)",
            report.summary.missing_executable
        ));
    }
    output.push('\n');

    output
}

/// Render one table line. The first field is left-aligned; the metric
/// fields are right-aligned when `align_values` is set.
fn push_line(output: &mut String, widths: &[usize], fields: &[&str], align_values: bool) {
    let mut line = String::new();
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let width = widths.get(idx).copied().unwrap_or(0);
        if idx > 0 && align_values {
            line.push_str(&format!("{:>width$}", field, width = width));
        } else {
            line.push_str(&format!("{:<width$}", field, width = width));
        }
    }
    output.push_str(line.trim_end());
    output.push('\n');
}
