//! Stage execution: `classic-docs --stage pre|post`.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use super::super::Cli;

pub async fn cmd_run(
    cli: &Cli,
    host_env: classic_docs::environment::HostEnv,
    cwd: &Path,
    stage: &str,
) -> Result<()> {
    use classic_docs::config::Config;
    use classic_docs::orchestrator::Orchestrator;
    use classic_docs::runner::{CommandRunner, DryRunRunner, ProcessRunner};
    use classic_docs::stage::Stage;

    // Reject a bad stage before touching the filesystem.
    let stage: Stage = stage.parse()?;

    let config = Config::new(cli_overrides(cli), &host_env, cwd)
        .context("Failed to resolve the classic docs configuration")?;

    let runner: Arc<dyn CommandRunner> = if cli.dry_run {
        Arc::new(DryRunRunner)
    } else {
        Arc::new(ProcessRunner)
    };

    Orchestrator::new(config, host_env, runner)
        .run(stage, cli.output_dir.as_deref())
        .await
        .with_context(|| format!("Classic docs {} stage failed", stage))?;

    Ok(())
}

pub fn cli_overrides(cli: &Cli) -> classic_docs::config::CliOverrides {
    classic_docs::config::CliOverrides {
        docs_dir: cli.docs_dir.clone(),
        petsc_dir: cli.petsc_dir.clone(),
    }
}
