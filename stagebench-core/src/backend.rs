//! Backend Launch Definitions
//!
//! Each backend pairs a session-wrapper command with the compositor build
//! it drives. The X11 path starts a throwaway X session via `xinit` with
//! the compositor as its sole client; the Wayland path nests the
//! compositor inside a `cage` session, with client arguments passed after
//! the wrapper's `--` separator.

use std::ffi::OsString;
use std::path::Path;

/// Flag passed to the compositor ahead of the configuration path.
pub const BENCHMARK_FLAG: &str = "--benchmark";

/// The two display backends the harness compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Legacy windowing session (`xinit`).
    X11,
    /// Isolated compositor session (`cage`).
    Wayland,
}

impl BackendKind {
    /// Column label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            BackendKind::X11 => "X11",
            BackendKind::Wayland => "Wayland",
        }
    }
}

/// A fully described backend: wrapper command, separator, and the logical
/// name of the compositor executable to resolve and run under it.
#[derive(Debug, Clone)]
pub struct Backend {
    /// Which of the two backends this is.
    pub kind: BackendKind,
    /// Session-wrapper argv prefix, e.g. `["xinit"]`.
    pub wrapper: Vec<String>,
    /// Token separating wrapper arguments from the client command, if the
    /// wrapper requires one.
    pub separator: Option<String>,
    /// Logical executable name, resolved at run time.
    pub executable: String,
}

impl Backend {
    /// Default X11 backend: `xinit <exe> --benchmark <config>`.
    pub fn x11() -> Self {
        Self {
            kind: BackendKind::X11,
            wrapper: vec!["xinit".to_string()],
            separator: None,
            executable: "stagemix-x11".to_string(),
        }
    }

    /// Default Wayland backend: `cage -- <exe> --benchmark <config>`.
    pub fn wayland() -> Self {
        Self {
            kind: BackendKind::Wayland,
            wrapper: vec!["cage".to_string()],
            separator: Some("--".to_string()),
            executable: "stagemix-wayland".to_string(),
        }
    }

    /// Column label used in reports.
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Compose the full argv: wrapper, separator (if any), resolved
    /// executable, then the fixed `--benchmark <config>` template.
    pub fn command_line(&self, executable: &Path, config: &Path) -> Vec<OsString> {
        let mut argv: Vec<OsString> = self.wrapper.iter().map(OsString::from).collect();
        if let Some(separator) = &self.separator {
            argv.push(OsString::from(separator));
        }
        argv.push(executable.as_os_str().to_os_string());
        argv.push(OsString::from(BENCHMARK_FLAG));
        argv.push(config.as_os_str().to_os_string());
        argv
    }
}
