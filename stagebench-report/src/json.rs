//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{MetricCell, ReportRow};

    #[test]
    fn cells_serialize_with_status_tags() {
        let mut report = Report::new("0.1.0", vec!["X11".into(), "Wayland".into()]);
        report.push_row(ReportRow {
            config: "scene.yaml".into(),
            cells: vec![
                MetricCell::Value("12.3".into()),
                MetricCell::MissingExecutable,
            ],
        });

        let json = generate_json_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["columns"][0], "X11");
        assert_eq!(value["rows"][0]["config"], "scene.yaml");
        assert_eq!(value["rows"][0]["cells"][0]["status"], "value");
        assert_eq!(value["rows"][0]["cells"][0]["value"], "12.3");
        assert_eq!(value["rows"][0]["cells"][1]["status"], "missing-executable");
        assert_eq!(value["summary"]["configs"], 1);
    }

    #[test]
    fn json_round_trips() {
        let mut report = Report::new("0.1.0", vec!["X11".into(), "Wayland".into()]);
        report.push_row(ReportRow {
            config: "scene.yaml".into(),
            cells: vec![MetricCell::NoMetric, MetricCell::Value("9.8".into())],
        });

        let json = generate_json_report(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.rows[0].cells, report.rows[0].cells);
    }
}
