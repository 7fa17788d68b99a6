//! Executable discovery.
//!
//! The configure step only needs to know whether `c2html` and `doctext` are
//! installed. Lookup sits behind [`ToolLocator`] so argument building can be
//! tested against a fixed answer.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Outcome of looking up one executable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolProbe {
    pub tool_available: bool,
    pub path: Option<PathBuf>,
}

impl ToolProbe {
    pub fn found(path: impl Into<PathBuf>) -> Self {
        Self {
            tool_available: true,
            path: Some(path.into()),
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }
}

pub trait ToolLocator: Send + Sync {
    fn locate(&self, name: &str) -> ToolProbe;
}

/// Searches the directories of a `PATH`-style variable, first match wins.
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    dirs: Vec<PathBuf>,
}

impl PathLocator {
    pub fn new(search_path: Option<&OsString>) -> Self {
        let dirs = search_path
            .map(|p| std::env::split_paths(p).collect())
            .unwrap_or_default();
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl ToolLocator for PathLocator {
    fn locate(&self, name: &str) -> ToolProbe {
        // Names with a separator are paths, not search-path entries.
        if name.contains(std::path::MAIN_SEPARATOR) {
            let candidate = Path::new(name);
            return if is_executable(candidate) {
                ToolProbe::found(candidate)
            } else {
                ToolProbe::missing()
            };
        }

        self.dirs
            .iter()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
            .map(ToolProbe::found)
            .unwrap_or_else(ToolProbe::missing)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
