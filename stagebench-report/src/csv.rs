//! CSV Output

use crate::report::Report;

/// Generate a CSV report: a header row, then one line per configuration.
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::new();

    let mut header = vec!["config".to_string()];
    header.extend(report.columns.iter().map(|c| escape_field(c)));
    output.push_str(&header.join(","));
    output.push('\n');

    for row in &report.rows {
        let mut fields = vec![escape_field(&row.config)];
        fields.extend(row.cells.iter().map(|cell| escape_field(cell.display())));
        output.push_str(&fields.join(","));
        output.push('\n');
    }

    output
}

/// Quote a field if it contains a delimiter, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
