//! Build product removal: `classic-docs --clean`.

use anyhow::{Context, Result};
use std::path::Path;

use super::super::Cli;
use super::build::cli_overrides;

pub fn cmd_clean(cli: &Cli, host_env: &classic_docs::environment::HostEnv, cwd: &Path) -> Result<()> {
    use classic_docs::config::Config;
    use classic_docs::orchestrator::clean::{clean, clean_targets};
    use classic_docs::ui::print_clean_summary;

    let config = Config::new(cli_overrides(cli), host_env, cwd)
        .context("Failed to resolve the classic docs configuration")?;

    if cli.dry_run {
        for path in clean_targets(&config) {
            println!("[dry-run] rm -rf {}", path.display());
        }
        return Ok(());
    }

    let removed = clean(&config)?;
    print_clean_summary(&removed);
    Ok(())
}
