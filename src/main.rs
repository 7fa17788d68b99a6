use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use classic_docs::environment::HostEnv;
use classic_docs::logging::{self, LOG_LEVEL_ENV};

mod cmd;

#[derive(Parser)]
#[command(name = "classic-docs")]
#[command(
    version,
    about = "Configure PETSc minimally and build the classic manual pages and html sources"
)]
pub struct Cli {
    /// Build stage: 'pre' (generate manual pages) or 'post' (copy raw html)
    #[arg(short, long)]
    pub stage: Option<String>,

    /// Remove the docs build arch and generated manual pages instead of building
    #[arg(short, long)]
    pub clean: bool,

    /// Where the post stage writes finished artifacts
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Docs directory to act from (defaults to the current directory)
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// PETSc source root (defaults to the parent of the docs directory)
    #[arg(long)]
    pub petsc_dir: Option<PathBuf>,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the artifact subdirectories of --stage and exit
    #[arg(long)]
    pub print_subdirs: bool,

    /// Emit --print-subdirs output as JSON
    #[arg(long, requires = "print_subdirs")]
    pub json: bool,

    #[arg(short, long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let host_env = HostEnv::capture();
    logging::init(logging::select_level(
        cli.log_level.as_deref(),
        cli.verbose,
        host_env.get(LOG_LEVEL_ENV),
    ));

    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    if cli.clean {
        return cmd::cmd_clean(&cli, &host_env, &cwd);
    }

    let Some(stage) = cli.stage.as_deref() else {
        anyhow::bail!("--stage is required (pre or post) unless --clean is given");
    };

    if cli.print_subdirs {
        return cmd::cmd_subdirs(stage, cli.json);
    }

    cmd::cmd_run(&cli, host_env, &cwd, stage).await
}
