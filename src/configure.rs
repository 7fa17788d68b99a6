//! The minimal configure run needed to build the classic docs.
//!
//! Every optional heavy dependency is switched off. The only choice made at
//! runtime is whether the two doc-generation tools (`c2html`, and `doctext`
//! from sowing) are taken from the local install or downloaded.

use tracing::{debug, warn};

use crate::config::Config;
use crate::environment::{EnvOverrides, HostEnv, TarballMode};
use crate::probe::{ToolLocator, ToolProbe};
use crate::runner::CommandSpec;

/// Options that disable every optional component of the library build.
pub const MINIMAL_OPTIONS: &[&str] = &[
    "--with-coverage-exec=0",
    "--with-mpi=0",
    "--with-cxx=0",
    "--with-syclc=0",
    "--with-hipc=0",
    "--with-cudac=0",
    "--with-x=0",
    "--with-bison=0",
    "--with-cmake=0",
    "--with-pthread=0",
    "--with-regexp=0",
    "--with-mkl_sparse_optimize=0",
    "--with-mkl_sparse=0",
    "--with-petsc4py",
];

/// How the doc-generation tools are obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSource {
    /// Tarball builds always download both tools
    Tarball,
    Probed { c2html: ToolProbe, doctext: ToolProbe },
}

impl ToolSource {
    /// Probe the search path unless a tarball build was requested.
    pub fn detect(env: &HostEnv, locator: &dyn ToolLocator, config: &Config) -> Self {
        let mode = env.tarball_mode();
        match mode {
            TarballMode::Enabled { var } => {
                if mode.is_legacy() {
                    warn!(
                        var,
                        "Tarball build requested through a misspelled variable; set {} instead",
                        crate::environment::TARBALL_VAR
                    );
                }
                ToolSource::Tarball
            }
            TarballMode::Disabled => {
                let c2html = locator.locate(&config.tools.c2html);
                let doctext = locator.locate(&config.tools.doctext);
                debug!(?c2html, ?doctext, "Probed doc tools");
                ToolSource::Probed { c2html, doctext }
            }
        }
    }

    /// Configure flags for the tools.
    pub fn flags(&self) -> Vec<&'static str> {
        match self {
            ToolSource::Tarball => vec!["--download-c2html", "--download-sowing"],
            ToolSource::Probed { c2html, doctext } => vec![
                "--with-fc=0",
                if c2html.tool_available {
                    "--with-c2html"
                } else {
                    "--download-c2html"
                },
                if doctext.tool_available {
                    "--with-sowing"
                } else {
                    "--download-sowing"
                },
            ],
        }
    }
}

/// Full argument list for the configure script.
pub fn configure_args(arch: &str, tools: &ToolSource) -> Vec<String> {
    let mut args: Vec<String> = MINIMAL_OPTIONS.iter().map(|s| s.to_string()).collect();
    args.push(format!("PETSC_ARCH={}", arch));
    args.extend(tools.flags().into_iter().map(String::from));
    args
}

/// The configure invocation, run in the build root with an isolated environment.
pub fn configure_command(config: &Config, tools: &ToolSource) -> CommandSpec {
    CommandSpec::new(&config.configure_cmd, &config.build_root)
        .args(configure_args(config.arch, tools))
        .env(EnvOverrides::isolated())
}
