//! The make invocation for one docs stage.

use std::path::Path;

use crate::config::Config;
use crate::environment::EnvOverrides;
use crate::runner::CommandSpec;
use crate::stage::Stage;

/// Arguments for `make <target> PETSC_DIR=.. PETSC_ARCH=.. HTMLMAP=.. LOC=..`.
pub fn make_args(config: &Config, stage: Stage, loc: &Path) -> Vec<String> {
    vec![
        stage.target().to_string(),
        format!("PETSC_DIR={}", config.build_root.display()),
        format!("PETSC_ARCH={}", config.arch),
        format!("HTMLMAP={}", config.htmlmap().display()),
        format!("LOC={}", loc.display()),
    ]
}

/// The build invocation, run in the build root.
pub fn make_command(config: &Config, stage: Stage, loc: &Path, env: EnvOverrides) -> CommandSpec {
    CommandSpec::new(&config.make_cmd, &config.build_root)
        .args(make_args(config, stage, loc))
        .env(env)
}
