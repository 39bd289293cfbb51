//! Benchmark Metric Parsing
//!
//! Extracts the structured key/value result the compositor prints on
//! completion. The first line starting with [`BENCHMARK_MARKER`] wins;
//! any later marker lines in the same output are ignored.

use std::collections::HashMap;

/// Literal prefix of a benchmark result line.
pub const BENCHMARK_MARKER: &str = "BENCHMARK:";

/// Key/value metrics parsed from a single benchmark marker line.
///
/// Tokens are whitespace-separated; each token containing a `:` is split
/// on the first colon into key and value. Values are kept as unmodified
/// strings; the harness never interprets them numerically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricLine {
    values: HashMap<String, String>,
}

impl MetricLine {
    /// Scan captured stdout for the first benchmark marker line and parse it.
    ///
    /// Returns `None` if no line starts with the marker: the compositor may
    /// have crashed or never reached its benchmark-completion point.
    pub fn parse(output: &str) -> Option<Self> {
        output
            .lines()
            .find(|line| line.starts_with(BENCHMARK_MARKER))
            .map(Self::parse_line)
    }

    fn parse_line(line: &str) -> Self {
        let mut values = HashMap::new();
        for token in line.split_whitespace() {
            if let Some((key, value)) = token.split_once(':') {
                values.insert(key.to_string(), value.to_string());
            }
        }
        Self { values }
    }

    /// Look up a metric value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The averaged result, the only key the harness consumes.
    pub fn avg(&self) -> Option<&str> {
        self.get("avg")
    }
}

/// Parse captured stdout and return the `avg` value of the first
/// benchmark marker line, if any.
pub fn extract_avg(output: &str) -> Option<String> {
    MetricLine::parse(output)?.avg().map(str::to_string)
}
