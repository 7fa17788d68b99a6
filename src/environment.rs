//! Process environment handling.
//!
//! The orchestrator reads the host environment once into a [`HostEnv`]
//! snapshot and never writes to it. Anything a child process should not
//! inherit is expressed as [`EnvOverrides`] on the command itself.

use std::collections::BTreeMap;
use std::ffi::OsString;

/// Variables stripped from the configure environment so a developer's own
/// build settings cannot leak into the isolated docs configuration.
pub const ISOLATED_VARS: &[&str] = &["PETSC_ARCH", "MAKEFLAGS"];

/// Set when building from a release tarball.
pub const TARBALL_VAR: &str = "PETSCBUILDTARBALL";

/// Historical misspelling of [`TARBALL_VAR`], still honoured.
pub const LEGACY_TARBALL_VAR: &str = "PETSCBUIDTARBALL";

/// Read-only snapshot of the variables the orchestrator consults.
#[derive(Debug, Clone, Default)]
pub struct HostEnv {
    vars: BTreeMap<String, String>,
    path: Option<OsString>,
}

impl HostEnv {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
            path: std::env::var_os("PATH"),
        }
    }

    /// Build a snapshot from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let path = vars.get("PATH").map(OsString::from);
        Self { vars, path }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// The executable search path, if any.
    pub fn search_path(&self) -> Option<&OsString> {
        self.path.as_ref()
    }

    /// Whether a tarball build was requested, and under which variable name.
    pub fn tarball_mode(&self) -> TarballMode {
        if self.contains(TARBALL_VAR) {
            TarballMode::Enabled { var: TARBALL_VAR }
        } else if self.contains(LEGACY_TARBALL_VAR) {
            TarballMode::Enabled {
                var: LEGACY_TARBALL_VAR,
            }
        } else {
            TarballMode::Disabled
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TarballMode {
    Disabled,
    Enabled { var: &'static str },
}

impl TarballMode {
    pub fn is_enabled(self) -> bool {
        matches!(self, TarballMode::Enabled { .. })
    }

    /// True when enabled only through the misspelled variable.
    pub fn is_legacy(self) -> bool {
        matches!(self, TarballMode::Enabled { var } if var == LEGACY_TARBALL_VAR)
    }
}

/// Environment edits applied to a single child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// Variables removed from the inherited environment
    pub remove: Vec<String>,
    /// Variables set (after removal)
    pub set: Vec<(String, String)>,
}

impl EnvOverrides {
    /// Overrides that strip [`ISOLATED_VARS`].
    pub fn isolated() -> Self {
        Self {
            remove: ISOLATED_VARS.iter().map(|v| v.to_string()).collect(),
            set: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.set.is_empty()
    }

    pub fn removes(&self, key: &str) -> bool {
        self.remove.iter().any(|k| k == key)
    }

    /// Apply to a tokio command.
    pub fn apply(&self, cmd: &mut tokio::process::Command) {
        for key in &self.remove {
            cmd.env_remove(key);
        }
        for (key, value) in &self.set {
            cmd.env(key, value);
        }
    }
}
