//! Configuration loading from stagebench.toml
//!
//! Harness configuration can be specified in a `stagebench.toml` file in
//! the project root. The file is discovered by walking up from the current
//! directory; CLI flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use stagebench_core::Backend;

/// StageBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StageConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Per-backend launch overrides
    #[serde(default)]
    pub backends: BackendsConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Writable directory pinned as the child's runtime session directory
    #[serde(default = "default_runtime_dir")]
    pub runtime_dir: String,
    /// Benchmark configuration directory (overrides discovery)
    #[serde(default)]
    pub config_dir: Option<String>,
    /// Per-run timeout (e.g. "60s", "5m"); absent means no timeout and a
    /// hung benchmark hangs the report run
    #[serde(default)]
    pub timeout: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            runtime_dir: default_runtime_dir(),
            config_dir: None,
            timeout: None,
        }
    }
}

fn default_runtime_dir() -> String {
    stagebench_core::DEFAULT_RUNTIME_DIR.to_string()
}

/// Launch overrides for the two backends
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackendsConfig {
    /// Legacy X11 session backend
    #[serde(default)]
    pub x11: BackendOverride,
    /// Isolated Wayland session backend
    #[serde(default)]
    pub wayland: BackendOverride,
}

/// Overrides applied on top of a backend's built-in launch defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackendOverride {
    /// Session-wrapper argv prefix; an empty list runs the executable
    /// directly, without a wrapper
    #[serde(default)]
    pub wrapper: Option<Vec<String>>,
    /// Wrapper/client separator token; an empty string removes the default
    #[serde(default)]
    pub separator: Option<String>,
    /// Compositor executable name or path
    #[serde(default)]
    pub executable: Option<String>,
}

impl BackendOverride {
    /// Apply these overrides to a backend's defaults.
    pub fn apply(&self, mut backend: Backend) -> Backend {
        if let Some(wrapper) = &self.wrapper {
            backend.wrapper = wrapper.clone();
        }
        match self.separator.as_deref() {
            Some("") => backend.separator = None,
            Some(separator) => backend.separator = Some(separator.to_string()),
            None => {}
        }
        if let Some(executable) = &self.executable {
            backend.executable = executable.clone();
        }
        backend
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl StageConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("stagebench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Parse a duration string (e.g. "30s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;

        let nanos: u64 = match unit_part.to_lowercase().as_str() {
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            other => return Err(anyhow::anyhow!("Unknown duration unit: {}", other)),
        };

        Ok(Duration::from_nanos((value * nanos as f64) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StageConfig::default();
        assert_eq!(config.runner.runtime_dir, "/tmp");
        assert!(config.runner.timeout.is_none());
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn parse_toml_with_partial_sections() {
        let toml_str = r#"
            [runner]
            runtime_dir = "/run/bench"

            [backends.wayland]
            executable = "mixer-wayland"
        "#;

        let config: StageConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.runtime_dir, "/run/bench");
        assert_eq!(
            config.backends.wayland.executable.as_deref(),
            Some("mixer-wayland")
        );
        // Defaults should still apply
        assert_eq!(config.output.format, "human");
        assert!(config.backends.x11.wrapper.is_none());
    }

    #[test]
    fn overrides_replace_only_what_they_name() {
        let over = BackendOverride {
            wrapper: None,
            separator: None,
            executable: Some("mixer-wayland".to_string()),
        };
        let backend = over.apply(Backend::wayland());
        assert_eq!(backend.executable, "mixer-wayland");
        assert_eq!(backend.wrapper, vec!["cage".to_string()]);
        assert_eq!(backend.separator.as_deref(), Some("--"));
    }

    #[test]
    fn empty_separator_clears_the_default() {
        let over = BackendOverride {
            wrapper: Some(Vec::new()),
            separator: Some(String::new()),
            executable: None,
        };
        let backend = over.apply(Backend::wayland());
        assert!(backend.wrapper.is_empty());
        assert!(backend.separator.is_none());
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(
            StageConfig::parse_duration("30s").unwrap(),
            Duration::from_secs(30)
        );
        assert_eq!(
            StageConfig::parse_duration("500ms").unwrap(),
            Duration::from_millis(500)
        );
        assert_eq!(
            StageConfig::parse_duration("2m").unwrap(),
            Duration::from_secs(120)
        );
        assert_eq!(
            StageConfig::parse_duration("1.5s").unwrap(),
            Duration::from_millis(1500)
        );
        assert!(StageConfig::parse_duration("fast").is_err());
        assert!(StageConfig::parse_duration("").is_err());
    }
}
