//! Configuration for the classic docs build.
//!
//! Settings are layered: `classic-docs.toml` in the docs directory, then
//! environment variables, then command-line flags. Every layer is optional.
//!
//! # Configuration File Format
//!
//! ```toml
//! [build]
//! petsc_dir = ".."
//!
//! [commands]
//! configure = "configure"
//! make = "make"
//!
//! [tools]
//! c2html = "c2html"
//! doctext = "doctext"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::environment::HostEnv;
use crate::errors::{DocsError, Result};

/// Isolated architecture tag used for every docs configure and build.
pub const CLASSIC_DOCS_ARCH: &str = "arch-classic-docs";

/// Name of the optional configuration file inside the docs directory.
pub const CONFIG_FILE: &str = "classic-docs.toml";

/// Written by configure in the build root once configuration succeeded.
pub const CONFIGURE_SENTINEL: &str = "configure.log";

pub const CONFIGURE_ENV: &str = "CLASSIC_DOCS_CONFIGURE";
pub const MAKE_ENV: &str = "CLASSIC_DOCS_MAKE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildSection {
    /// Build root, relative paths resolve against the docs directory
    #[serde(default)]
    pub petsc_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsSection {
    #[serde(default = "default_configure_cmd")]
    pub configure: String,
    #[serde(default = "default_make_cmd")]
    pub make: String,
}

fn default_configure_cmd() -> String {
    "configure".to_string()
}

fn default_make_cmd() -> String {
    "make".to_string()
}

impl Default for CommandsSection {
    fn default() -> Self {
        Self {
            configure: default_configure_cmd(),
            make: default_make_cmd(),
        }
    }
}

/// Executable names probed on the search path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsSection {
    #[serde(default = "default_c2html")]
    pub c2html: String,
    #[serde(default = "default_doctext")]
    pub doctext: String,
}

fn default_c2html() -> String {
    "c2html".to_string()
}

fn default_doctext() -> String {
    "doctext".to_string()
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            c2html: default_c2html(),
            doctext: default_doctext(),
        }
    }
}

/// The complete classic-docs.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsToml {
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub commands: CommandsSection,
    #[serde(default)]
    pub tools: ToolsSection,
}

impl DocsToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocsError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| DocsError::Config(format!("failed to parse {}: {}", CONFIG_FILE, e)))
    }

    /// Load `classic-docs.toml` from the docs directory, or defaults if absent.
    pub fn load_or_default(docs_dir: &Path) -> Result<Self> {
        let path = docs_dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Command-line layer.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub docs_dir: Option<PathBuf>,
    pub petsc_dir: Option<PathBuf>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the build acts from, absolute
    pub docs_dir: PathBuf,
    /// Project top-level source directory, absolute
    pub build_root: PathBuf,
    pub arch: &'static str,
    pub configure_cmd: PathBuf,
    pub make_cmd: PathBuf,
    pub tools: ToolsSection,
}

impl Config {
    /// Resolve the configuration.
    ///
    /// `cwd` is the process working directory, used when no docs directory is given.
    pub fn new(cli: CliOverrides, env: &HostEnv, cwd: &Path) -> Result<Self> {
        let docs_dir = absolute(cli.docs_dir.as_deref().unwrap_or(cwd), cwd)?;
        let toml = DocsToml::load_or_default(&docs_dir)?;

        let build_root = match cli.petsc_dir.or(toml.build.petsc_dir) {
            Some(dir) => absolute(&dir, &docs_dir)?,
            None => docs_dir
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| DocsError::Config(format!(
                    "docs directory {} has no parent to use as the build root",
                    docs_dir.display()
                )))?,
        };

        let configure = env
            .get(CONFIGURE_ENV)
            .map(str::to_string)
            .unwrap_or(toml.commands.configure);
        let make = env
            .get(MAKE_ENV)
            .map(str::to_string)
            .unwrap_or(toml.commands.make);

        Ok(Self {
            configure_cmd: resolve_program(&configure, &build_root, true),
            make_cmd: resolve_program(&make, &build_root, false),
            docs_dir,
            build_root,
            arch: CLASSIC_DOCS_ARCH,
            tools: toml.tools,
        })
    }

    /// `<build_root>/configure.log`
    pub fn sentinel(&self) -> PathBuf {
        self.build_root.join(CONFIGURE_SENTINEL)
    }

    /// `<build_root>/<arch>`
    pub fn arch_dir(&self) -> PathBuf {
        self.build_root.join(self.arch)
    }

    /// `<docs_dir>/manualpages/htmlmap`
    pub fn htmlmap(&self) -> PathBuf {
        self.docs_dir.join("manualpages").join("htmlmap")
    }
}

/// Canonicalize `path`, resolving a relative one against `base`.
fn absolute(path: &Path, base: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    joined
        .canonicalize()
        .map_err(|source| DocsError::UnresolvedPath {
            path: joined,
            source,
        })
}

/// Paths with a separator are taken relative to the build root. A bare name
/// is looked up on PATH, except the configure script which lives in the
/// build root by convention.
fn resolve_program(program: &str, build_root: &Path, local_by_default: bool) -> PathBuf {
    let path = Path::new(program);
    if path.is_absolute() {
        path.to_path_buf()
    } else if program.contains(std::path::MAIN_SEPARATOR) || local_by_default {
        build_root.join(path)
    } else {
        path.to_path_buf()
    }
}
