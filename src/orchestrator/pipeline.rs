//! Two-stage classic docs pipeline.
//!
//! `pre` configures a minimal build under the isolated arch and then runs
//! `make alldoc_pre`. `post` never configures: it requires the configure
//! sentinel left by an earlier `pre` and then runs `make alldoc_post`.
//! Every failure stops the run. Nothing is retried or rolled back.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::configure::{ToolSource, configure_command};
use crate::environment::{EnvOverrides, HostEnv};
use crate::errors::{DocsError, Result};
use crate::make::make_command;
use crate::probe::{PathLocator, ToolLocator};
use crate::runner::CommandRunner;
use crate::stage::Stage;
use crate::ui;

pub struct Orchestrator {
    config: Config,
    env: HostEnv,
    runner: Arc<dyn CommandRunner>,
    locator: Arc<dyn ToolLocator>,
}

impl Orchestrator {
    /// Create an orchestrator that probes tools on the snapshot's `PATH`.
    pub fn new(config: Config, env: HostEnv, runner: Arc<dyn CommandRunner>) -> Self {
        let locator = Arc::new(PathLocator::new(env.search_path()));
        Self {
            config,
            env,
            runner,
            locator,
        }
    }

    pub fn with_locator(mut self, locator: Arc<dyn ToolLocator>) -> Self {
        self.locator = locator;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one stage.
    ///
    /// `output_dir` is where `post` places its artifacts; relative paths
    /// resolve against the docs directory. `pre` ignores it.
    pub async fn run(&self, stage: Stage, output_dir: Option<&Path>) -> Result<()> {
        info!(
            build_root = %self.config.build_root.display(),
            arch = self.config.arch,
            %stage,
            "Starting classic docs build"
        );

        let (loc, env) = match stage {
            Stage::Pre => {
                self.configure().await?;
                // make inherits the environment configure ran with
                (self.config.docs_dir.clone(), EnvOverrides::isolated())
            }
            Stage::Post => {
                self.ensure_configured()?;
                let out = output_dir.ok_or(DocsError::MissingOutputDir)?;
                (self.resolve_output(out), EnvOverrides::default())
            }
        };

        self.build(stage, &loc, env).await?;
        ui::print_done(stage);
        Ok(())
    }

    /// Fail unless `configure.log` exists in the build root.
    pub fn ensure_configured(&self) -> Result<()> {
        let sentinel = self.config.sentinel();
        if sentinel.is_file() {
            Ok(())
        } else {
            Err(DocsError::ConfigurationNotFound { path: sentinel })
        }
    }

    async fn configure(&self) -> Result<()> {
        let tools = ToolSource::detect(&self.env, self.locator.as_ref(), &self.config);
        let spec = configure_command(&self.config, &tools);
        ui::print_configure_banner(&self.config);
        self.runner.run(&spec).await
    }

    async fn build(&self, stage: Stage, loc: &Path, env: EnvOverrides) -> Result<()> {
        let htmlmap = self.config.htmlmap();
        if !htmlmap.is_file() {
            warn!(path = %htmlmap.display(), "htmlmap not found; make may fail to resolve manual page links");
        }

        let spec = make_command(&self.config, stage, loc, env);
        ui::print_build_banner(&self.config, stage, &spec);
        self.runner.run(&spec).await
    }

    fn resolve_output(&self, out: &Path) -> PathBuf {
        if out.is_absolute() {
            out.to_path_buf()
        } else {
            self.config.docs_dir.join(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CLASSIC_DOCS_ARCH, CliOverrides};
    use crate::probe::ToolProbe;
    use crate::runner::testing::RecordingRunner;
    use std::fs;
    use tempfile::TempDir;

    struct NoTools;

    impl ToolLocator for NoTools {
        fn locate(&self, _name: &str) -> ToolProbe {
            ToolProbe::missing()
        }
    }

    /// `<tmp>/petsc/doc` with an optional `configure.log` in `petsc`.
    fn setup(configured: bool) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("petsc/doc");
        fs::create_dir_all(&doc).unwrap();
        if configured {
            fs::write(dir.path().join("petsc/configure.log"), "ok\n").unwrap();
        }
        let config = Config::new(CliOverrides::default(), &HostEnv::default(), &doc).unwrap();
        (dir, config)
    }

    fn orchestrator(config: Config, runner: Arc<RecordingRunner>) -> Orchestrator {
        Orchestrator::new(config, HostEnv::default(), runner).with_locator(Arc::new(NoTools))
    }

    #[tokio::test]
    async fn test_pre_configures_then_builds() {
        let (_dir, config) = setup(false);
        let docs_dir = config.docs_dir.clone();
        let build_root = config.build_root.clone();
        let runner = Arc::new(RecordingRunner::new());

        orchestrator(config, runner.clone())
            .run(Stage::Pre, None)
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);

        let configure = &calls[0];
        assert_eq!(configure.program, build_root.join("configure"));
        assert!(configure.args.iter().any(|a| a == "--with-mpi=0"));
        assert_eq!(configure.assignment("PETSC_ARCH"), Some(CLASSIC_DOCS_ARCH));
        assert!(configure.env.removes("PETSC_ARCH"));
        assert!(configure.env.removes("MAKEFLAGS"));

        let make = &calls[1];
        assert_eq!(make.args[0], "alldoc_pre");
        assert_eq!(make.assignment("PETSC_ARCH"), Some(CLASSIC_DOCS_ARCH));
        assert_eq!(make.assignment("LOC"), Some(docs_dir.to_str().unwrap()));
        assert!(make.env.removes("MAKEFLAGS"));
    }

    #[tokio::test]
    async fn test_pre_ignores_output_dir() {
        let (_dir, config) = setup(false);
        let docs_dir = config.docs_dir.clone();
        let runner = Arc::new(RecordingRunner::new());

        orchestrator(config, runner.clone())
            .run(Stage::Pre, Some(Path::new("/tmp/out")))
            .await
            .unwrap();

        assert_eq!(
            runner.calls()[1].assignment("LOC"),
            Some(docs_dir.to_str().unwrap())
        );
    }

    #[tokio::test]
    async fn test_pre_stops_when_configure_fails() {
        let (_dir, config) = setup(false);
        let runner = Arc::new(RecordingRunner::failing_at(0));

        let err = orchestrator(config, runner.clone())
            .run(Stage::Pre, None)
            .await
            .unwrap_err();

        assert!(matches!(err, DocsError::CommandFailed { .. }));
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_post_builds_without_configuring() {
        let (_dir, config) = setup(true);
        let runner = Arc::new(RecordingRunner::new());

        orchestrator(config, runner.clone())
            .run(Stage::Post, Some(Path::new("/tmp/out")))
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args[0], "alldoc_post");
        assert_eq!(calls[0].assignment("LOC"), Some("/tmp/out"));
        assert_eq!(calls[0].assignment("PETSC_ARCH"), Some(CLASSIC_DOCS_ARCH));
        assert!(calls[0].env.is_empty());
    }

    #[tokio::test]
    async fn test_post_without_sentinel_fails_before_any_command() {
        let (_dir, config) = setup(false);
        let sentinel = config.sentinel();
        let runner = Arc::new(RecordingRunner::new());

        let err = orchestrator(config, runner.clone())
            .run(Stage::Post, Some(Path::new("/tmp/out")))
            .await
            .unwrap_err();

        match err {
            DocsError::ConfigurationNotFound { path } => assert_eq!(path, sentinel),
            other => panic!("Expected ConfigurationNotFound, got {:?}", other),
        }
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_post_sentinel_must_be_a_file() {
        let (dir, config) = setup(false);
        fs::create_dir(dir.path().join("petsc/configure.log")).unwrap();
        let runner = Arc::new(RecordingRunner::new());

        let err = orchestrator(config, runner.clone())
            .run(Stage::Post, Some(Path::new("/tmp/out")))
            .await
            .unwrap_err();
        assert!(matches!(err, DocsError::ConfigurationNotFound { .. }));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_post_requires_output_dir() {
        let (_dir, config) = setup(true);
        let runner = Arc::new(RecordingRunner::new());

        let err = orchestrator(config, runner.clone())
            .run(Stage::Post, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DocsError::MissingOutputDir));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_post_relative_output_resolves_against_docs_dir() {
        let (_dir, config) = setup(true);
        let expected = config.docs_dir.join("_build/html");
        let runner = Arc::new(RecordingRunner::new());

        orchestrator(config, runner.clone())
            .run(Stage::Post, Some(Path::new("_build/html")))
            .await
            .unwrap();

        assert_eq!(
            runner.calls()[0].assignment("LOC"),
            Some(expected.to_str().unwrap())
        );
    }

    #[tokio::test]
    async fn test_arch_is_constant_across_stages() {
        for (stage, configured) in [(Stage::Pre, false), (Stage::Post, true)] {
            let (_dir, config) = setup(configured);
            let runner = Arc::new(RecordingRunner::new());
            orchestrator(config, runner.clone())
                .run(stage, Some(Path::new("/elsewhere")))
                .await
                .unwrap();
            for call in runner.calls() {
                assert_eq!(call.assignment("PETSC_ARCH"), Some(CLASSIC_DOCS_ARCH));
            }
        }
    }

    #[tokio::test]
    async fn test_tarball_env_reaches_configure_args() {
        let (_dir, config) = setup(false);
        let runner = Arc::new(RecordingRunner::new());
        let env = HostEnv::from_pairs([(crate::environment::TARBALL_VAR, "1")]);

        Orchestrator::new(config, env, runner.clone())
            .with_locator(Arc::new(NoTools))
            .run(Stage::Pre, None)
            .await
            .unwrap();

        let args = &runner.calls()[0].args;
        assert!(args.iter().any(|a| a == "--download-c2html"));
        assert!(!args.iter().any(|a| a == "--with-fc=0"));
    }
}
