//! Backend Runner
//!
//! Invokes the compositor under a backend's session wrapper and turns its
//! captured stdout into a benchmark metric.
//!
//! The child runs in a controlled environment: everything is cleared
//! except `PATH` and `HOME` (the wrappers need both to start a session
//! and exec their client), and the runtime session directory is pinned to
//! a known writable location so the wrapper can establish its socket
//! regardless of the ambient environment.
//!
//! Execution is synchronous: the caller blocks until the child exits.
//! There is no timeout unless one was explicitly configured; a hung
//! benchmark hangs the run.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::metric::extract_avg;
use crate::resolve::ExecutableResolver;

/// Environment variable pinned for every child invocation.
pub const RUNTIME_DIR_VAR: &str = "XDG_RUNTIME_DIR";

/// Default value for [`RUNTIME_DIR_VAR`].
pub const DEFAULT_RUNTIME_DIR: &str = "/tmp";

/// Environment variables carried over from the parent into the otherwise
/// cleared child environment.
const PASSTHROUGH_VARS: [&str; 2] = ["PATH", "HOME"];

/// Poll interval while waiting on a deadline-bounded child.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Errors from constructing or driving a backend run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The backend's executable could not be resolved. Fatal for the
    /// backend: the runner refuses to construct, so nothing is spawned.
    #[error("executable '{0}' not found on the search path, in ./build, or in .")]
    ExecutableNotFound(String),

    /// The composed command failed to start.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        /// Rendered command line, for diagnostics.
        command: String,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// An explicitly configured deadline expired; the child was killed.
    #[error("benchmark did not finish within {0:?}")]
    Timeout(Duration),

    /// Waiting on the child or reading its output failed.
    #[error("failed to collect benchmark output: {0}")]
    Output(#[from] std::io::Error),
}

/// Runs one backend's benchmark invocations.
///
/// Construction resolves the backend's executable up front, so a missing
/// binary surfaces once per backend instead of once per configuration.
#[derive(Debug)]
pub struct BackendRunner {
    backend: Backend,
    executable: PathBuf,
    runtime_dir: PathBuf,
    timeout: Option<Duration>,
}

impl BackendRunner {
    /// Resolve the backend's executable and build a runner for it.
    pub fn new(
        backend: Backend,
        resolver: &ExecutableResolver,
        runtime_dir: impl Into<PathBuf>,
        timeout: Option<Duration>,
    ) -> Result<Self, RunnerError> {
        let executable = resolver
            .resolve(&backend.executable)
            .ok_or_else(|| RunnerError::ExecutableNotFound(backend.executable.clone()))?;
        Ok(Self {
            backend,
            executable,
            runtime_dir: runtime_dir.into(),
            timeout,
        })
    }

    /// The backend this runner drives.
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// The resolved executable path.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Run one benchmark configuration to completion and parse its metric.
    ///
    /// Returns `Ok(Some(avg))` when the output carried a benchmark line,
    /// `Ok(None)` when it did not. A nonzero exit still parses the output;
    /// partial diagnostics may carry a benchmark line.
    pub fn run(&self, config: &Path) -> Result<Option<String>, RunnerError> {
        let mut argv = self.backend.command_line(&self.executable, config);
        let rendered = render_command(&argv);
        let program = argv.remove(0);

        let mut command = Command::new(program);
        command
            .args(&argv)
            .env_clear()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        for var in PASSTHROUGH_VARS {
            if let Some(value) = std::env::var_os(var) {
                command.env(var, value);
            }
        }
        command.env(RUNTIME_DIR_VAR, &self.runtime_dir);

        debug!(backend = self.backend.label(), command = %rendered, "running benchmark");

        let stdout = match self.timeout {
            None => {
                let output = command.output().map_err(|source| RunnerError::Spawn {
                    command: rendered.clone(),
                    source,
                })?;
                self.check_status(output.status, config);
                String::from_utf8_lossy(&output.stdout).into_owned()
            }
            Some(limit) => self.run_with_deadline(command, limit, &rendered, config)?,
        };

        Ok(extract_avg(&stdout))
    }

    /// Spawn the child and kill it if it outlives the configured deadline.
    ///
    /// Stdout is drained on a separate thread so a chatty child cannot
    /// deadlock against a full pipe while we poll for exit.
    fn run_with_deadline(
        &self,
        mut command: Command,
        limit: Duration,
        rendered: &str,
        config: &Path,
    ) -> Result<String, RunnerError> {
        let mut child = command.spawn().map_err(|source| RunnerError::Spawn {
            command: rendered.to_string(),
            source,
        })?;

        let stdout_pipe = child.stdout.take();
        let reader = std::thread::spawn(move || {
            let mut captured = Vec::new();
            if let Some(mut pipe) = stdout_pipe {
                let _ = pipe.read_to_end(&mut captured);
            }
            captured
        });

        let deadline = Instant::now() + limit;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    self.check_status(status, config);
                    break;
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        // The reader is left to drain on its own: a grandchild
                        // may still hold the pipe's write end, and the output
                        // is discarded on timeout anyway.
                        drop(reader);
                        return Err(RunnerError::Timeout(limit));
                    }
                    std::thread::sleep(WAIT_POLL_INTERVAL);
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    drop(reader);
                    return Err(RunnerError::Output(source));
                }
            }
        }

        let captured = reader.join().unwrap_or_default();
        Ok(String::from_utf8_lossy(&captured).into_owned())
    }

    fn check_status(&self, status: ExitStatus, config: &Path) {
        if !status.success() {
            warn!(
                backend = self.backend.label(),
                config = %config.display(),
                %status,
                "benchmark process exited abnormally; output parsed anyway"
            );
        }
    }
}

fn render_command(argv: &[std::ffi::OsString]) -> String {
    argv.iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
