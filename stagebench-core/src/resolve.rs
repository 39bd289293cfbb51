//! Executable Resolution
//!
//! Locates a backend's compositor binary. A bare name is looked up on the
//! process search path first, then in `./build/` and `./` relative to the
//! working directory, the layout a source checkout produces. A name that
//! already contains a path separator is checked directly.
//!
//! Search path and working directory are injectable so tests can resolve
//! against a fixed temporary tree instead of the ambient environment.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Local directories tried after the search path, in order.
const LOCAL_ROOTS: [&str; 2] = ["build", "."];

/// Resolves logical executable names to on-disk paths.
#[derive(Debug, Clone)]
pub struct ExecutableResolver {
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl ExecutableResolver {
    /// Resolver backed by the ambient `PATH` and current working directory.
    pub fn from_env() -> Self {
        Self {
            search_path: env::var_os("PATH"),
            cwd: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Resolver with an explicit search path and working directory.
    pub fn new(search_path: Option<OsString>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            search_path,
            cwd: cwd.into(),
        }
    }

    /// Return the first existing, executable match for `name`, or `None`.
    ///
    /// The caller must treat `None` as fatal for that backend: running a
    /// benchmark against a missing executable is an operator-visible
    /// configuration error, not something to skip silently.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let candidate = Path::new(name);
        if candidate.components().count() > 1 {
            let path = self.cwd.join(candidate);
            return is_executable(&path).then_some(path);
        }

        if let Some(search_path) = &self.search_path {
            for dir in env::split_paths(search_path) {
                let path = dir.join(name);
                if is_executable(&path) {
                    return Some(path);
                }
            }
        }

        for root in LOCAL_ROOTS {
            let path = self.cwd.join(root).join(name);
            if is_executable(&path) {
                return Some(path);
            }
        }

        None
    }
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn touch_executable(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn search_path_match_takes_priority_over_build_dir() {
        let path_dir = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        fs::create_dir(cwd.path().join("build")).unwrap();

        let on_path = touch_executable(path_dir.path(), "mix-x11");
        touch_executable(&cwd.path().join("build"), "mix-x11");

        let resolver = ExecutableResolver::new(
            Some(path_dir.path().as_os_str().to_os_string()),
            cwd.path(),
        );
        assert_eq!(resolver.resolve("mix-x11"), Some(on_path));
    }

    #[test]
    fn falls_back_to_build_then_cwd() {
        let cwd = TempDir::new().unwrap();
        fs::create_dir(cwd.path().join("build")).unwrap();
        let in_build = touch_executable(&cwd.path().join("build"), "mix-x11");
        touch_executable(cwd.path(), "mix-wayland");

        let resolver = ExecutableResolver::new(None, cwd.path());
        assert_eq!(resolver.resolve("mix-x11"), Some(in_build));
        assert_eq!(
            resolver.resolve("mix-wayland"),
            Some(cwd.path().join(".").join("mix-wayland"))
        );
    }

    #[test]
    fn missing_executable_resolves_to_none() {
        let cwd = TempDir::new().unwrap();
        let resolver = ExecutableResolver::new(None, cwd.path());
        assert_eq!(resolver.resolve("no-such-binary"), None);
    }

    #[test]
    fn non_executable_file_is_skipped() {
        let cwd = TempDir::new().unwrap();
        let path = cwd.path().join("plain");
        fs::write(&path, "data").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).unwrap();

        let resolver = ExecutableResolver::new(None, cwd.path());
        assert_eq!(resolver.resolve("plain"), None);
    }

    #[test]
    fn explicit_path_is_checked_directly() {
        let cwd = TempDir::new().unwrap();
        let exe = touch_executable(cwd.path(), "mixer");

        let resolver = ExecutableResolver::new(None, "/nonexistent");
        assert_eq!(resolver.resolve(exe.to_str().unwrap()), Some(exe));
    }
}
