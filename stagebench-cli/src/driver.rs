//! Report Driver
//!
//! Composes the leaves: for every enumerated configuration, run each
//! backend to completion and collect one [`MetricCell`] per (backend,
//! config) pair, one [`ReportRow`] per configuration.
//!
//! Execution is fully sequential: one child process is started and
//! waited on before the next. Per-cell failures are absorbed locally and
//! rendered as absence markers; a failure in one configuration's backend
//! run never aborts the remaining configurations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use stagebench_core::{Backend, BackendRunner, ExecutableResolver};
use stagebench_report::{MetricCell, Report, ReportRow};
use tracing::{error, info, warn};

use crate::enumerate::config_label;

/// Knobs shared by every backend invocation in a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Writable directory pinned as the child's runtime session directory.
    pub runtime_dir: PathBuf,
    /// Optional per-run deadline. `None` means a hung benchmark hangs the
    /// whole report run.
    pub timeout: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            runtime_dir: PathBuf::from(stagebench_core::DEFAULT_RUNTIME_DIR),
            timeout: None,
        }
    }
}

/// Run every configuration under every backend and assemble the report.
///
/// Backend executables are resolved once, up front; a backend that fails
/// to resolve contributes an explicit [`MetricCell::MissingExecutable`]
/// marker to every row instead of aborting the report.
pub fn run_comparison(
    configs: &[PathBuf],
    backends: Vec<Backend>,
    resolver: &ExecutableResolver,
    options: &RunOptions,
) -> Report {
    let columns = backends
        .iter()
        .map(|backend| backend.label().to_string())
        .collect();
    let mut report = Report::new(env!("CARGO_PKG_VERSION"), columns);

    let runners: Vec<Option<BackendRunner>> = backends
        .into_iter()
        .map(|backend| {
            let label = backend.label();
            match BackendRunner::new(
                backend,
                resolver,
                options.runtime_dir.clone(),
                options.timeout,
            ) {
                Ok(runner) => {
                    info!(
                        backend = label,
                        executable = %runner.executable().display(),
                        "resolved backend executable"
                    );
                    Some(runner)
                }
                Err(err) => {
                    error!(backend = label, "{err}");
                    None
                }
            }
        })
        .collect();

    for config in configs {
        let cells = runners
            .iter()
            .map(|runner| run_cell(runner.as_ref(), config))
            .collect();
        report.push_row(ReportRow {
            config: config_label(config),
            cells,
        });
    }

    report
}

fn run_cell(runner: Option<&BackendRunner>, config: &Path) -> MetricCell {
    let Some(runner) = runner else {
        return MetricCell::MissingExecutable;
    };
    match runner.run(config) {
        Ok(Some(avg)) => MetricCell::Value(avg),
        Ok(None) => {
            warn!(
                backend = runner.backend().label(),
                config = %config.display(),
                "run produced no benchmark line"
            );
            MetricCell::NoMetric
        }
        Err(err) => {
            warn!(
                backend = runner.backend().label(),
                config = %config.display(),
                "benchmark run failed: {err}"
            );
            MetricCell::NoMetric
        }
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, script).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn direct_backend(base: Backend, executable: &Path) -> Backend {
        let mut backend = base;
        backend.wrapper.clear();
        backend.separator = None;
        backend.executable = executable.to_string_lossy().into_owned();
        backend
    }

    #[test]
    fn one_row_per_config_with_both_metrics() {
        let dir = TempDir::new().unwrap();
        let x11 = write_stub(
            dir.path(),
            "x11-stub",
            "#!/bin/sh\necho \"BENCHMARK: avg:12.3\"\n",
        );
        let wayland = write_stub(
            dir.path(),
            "wayland-stub",
            "#!/bin/sh\necho \"BENCHMARK: avg:9.8\"\n",
        );
        let configs = vec![dir.path().join("large.yaml"), dir.path().join("small.yaml")];

        let backends = vec![
            direct_backend(Backend::x11(), &x11),
            direct_backend(Backend::wayland(), &wayland),
        ];
        let resolver = ExecutableResolver::new(None, dir.path());
        let report = run_comparison(&configs, backends, &resolver, &RunOptions::default());

        assert_eq!(report.columns, vec!["X11", "Wayland"]);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].config, "large.yaml");
        assert_eq!(
            report.rows[0].cells,
            vec![
                MetricCell::Value("12.3".into()),
                MetricCell::Value("9.8".into())
            ]
        );
        assert_eq!(report.rows[1].config, "small.yaml");
        assert_eq!(report.summary.collected, 4);
    }

    #[test]
    fn silent_backend_yields_absence_marker_and_run_continues() {
        let dir = TempDir::new().unwrap();
        let x11 = write_stub(
            dir.path(),
            "x11-stub",
            "#!/bin/sh\necho \"BENCHMARK: avg:12.3\"\n",
        );
        let wayland = write_stub(dir.path(), "wayland-stub", "#!/bin/sh\necho warming up\n");
        let configs = vec![dir.path().join("a.yaml"), dir.path().join("b.yaml")];

        let backends = vec![
            direct_backend(Backend::x11(), &x11),
            direct_backend(Backend::wayland(), &wayland),
        ];
        let resolver = ExecutableResolver::new(None, dir.path());
        let report = run_comparison(&configs, backends, &resolver, &RunOptions::default());

        assert_eq!(report.rows.len(), 2);
        for row in &report.rows {
            assert_eq!(row.cells[0], MetricCell::Value("12.3".into()));
            assert_eq!(row.cells[1], MetricCell::NoMetric);
        }
    }

    #[test]
    fn unresolved_backend_marks_every_row() {
        let dir = TempDir::new().unwrap();
        let x11 = write_stub(
            dir.path(),
            "x11-stub",
            "#!/bin/sh\necho \"BENCHMARK: avg:3.3\"\n",
        );
        let mut wayland = Backend::wayland();
        wayland.executable = "no-such-compositor".to_string();
        let configs = vec![dir.path().join("a.yaml")];

        let backends = vec![direct_backend(Backend::x11(), &x11), wayland];
        let resolver = ExecutableResolver::new(None, dir.path());
        let report = run_comparison(&configs, backends, &resolver, &RunOptions::default());

        assert_eq!(
            report.rows[0].cells,
            vec![
                MetricCell::Value("3.3".into()),
                MetricCell::MissingExecutable
            ]
        );
        assert_eq!(report.summary.missing_executable, 1);
    }
}
