//! Benchmark Configuration Enumeration
//!
//! Discovers the `*.yaml` configuration files for a run. Two sourcing
//! strategies exist, matching the two deployment modes: a `benchmarks/`
//! tree relative to the working directory (source checkout), or the data
//! directory installed next to the binary (packaged install). The first
//! root that exists wins; exactly one strategy is active per run.
//!
//! Results are sorted by file name: row order is what the operator diffs
//! across revisions, so it must be reproducible.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Extension benchmark configuration files must carry.
pub const CONFIG_EXTENSION: &str = "yaml";

/// Configuration root relative to the working directory.
pub const WORKDIR_CONFIG_ROOT: &str = "benchmarks";

/// Errors from configuration enumeration. Both variants are fatal and
/// abort the run before any subprocess is started.
#[derive(Debug, Error)]
pub enum EnumerateError {
    /// None of the candidate roots exists.
    #[error("no benchmark configuration directory found (tried: {tried})")]
    NoConfigRoot {
        /// Candidate roots, for the operator.
        tried: String,
    },

    /// A root exists but could not be read.
    #[error("failed to read configuration directory {}: {source}", dir.display())]
    ReadDir {
        /// The unreadable directory.
        dir: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
}

/// Candidate configuration roots for the current deployment, in priority
/// order: working tree first, then the installed data directory.
pub fn default_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.join(WORKDIR_CONFIG_ROOT));
    }
    if let Some(dir) = installed_data_dir() {
        roots.push(dir);
    }
    roots
}

/// Data directory of a packaged install: `<prefix>/share/stagebench/benchmarks`
/// relative to the running binary's prefix.
fn installed_data_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let prefix = exe.parent()?.parent()?;
    Some(
        prefix
            .join("share")
            .join("stagebench")
            .join(WORKDIR_CONFIG_ROOT),
    )
}

/// Enumerate configuration files from the first existing root.
///
/// An empty result is legitimate (the report is simply empty); no
/// existing root at all is an error.
pub fn enumerate_configs(roots: &[PathBuf]) -> Result<Vec<PathBuf>, EnumerateError> {
    let root = roots
        .iter()
        .find(|root| root.is_dir())
        .ok_or_else(|| EnumerateError::NoConfigRoot {
            tried: roots
                .iter()
                .map(|root| root.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })?;

    debug!(root = %root.display(), "enumerating benchmark configurations");

    let mut configs = Vec::new();
    let entries = std::fs::read_dir(root).map_err(|source| EnumerateError::ReadDir {
        dir: root.clone(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| EnumerateError::ReadDir {
            dir: root.clone(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == CONFIG_EXTENSION) {
            configs.push(path);
        }
    }

    configs.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    Ok(configs)
}

/// Row label for a configuration: its file name.
pub fn config_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
