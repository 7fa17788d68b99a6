//! External command execution.
//!
//! A [`CommandSpec`] is a fully described invocation: program, arguments,
//! working directory and environment edits. Runners take specs and either
//! execute them ([`ProcessRunner`]) or print them ([`DryRunRunner`]).

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::environment::EnvOverrides;
use crate::errors::{DocsError, Result};

/// One external command, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: EnvOverrides,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            env: EnvOverrides::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    /// Short program name for messages (`make`, `configure`).
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Value of a `KEY=value` argument, if present.
    pub fn assignment(&self, key: &str) -> Option<&str> {
        self.args.iter().find_map(|arg| {
            arg.strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
        })
    }

    /// Shell-like rendering for logs and dry runs.
    pub fn display(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion. Non-zero exit is an error.
    async fn run(&self, spec: &CommandSpec) -> Result<()>;
}

/// Spawns the command with inherited stdio and waits for it.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        let program = spec.program_name();
        info!(command = %spec.display(), cwd = %spec.cwd.display(), "Running");

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        spec.env.apply(&mut cmd);

        let status = cmd.status().await.map_err(|source| DocsError::SpawnFailed {
            program: program.clone(),
            source,
        })?;

        debug!(program = %program, code = ?status.code(), "Command finished");

        if status.success() {
            Ok(())
        } else {
            Err(DocsError::CommandFailed {
                program,
                code: status.code(),
            })
        }
    }
}

/// Prints each command instead of running it.
#[derive(Debug, Clone, Default)]
pub struct DryRunRunner;

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        println!("[dry-run] cd {}", spec.cwd.display());
        if !spec.env.remove.is_empty() {
            println!("[dry-run] unset {}", spec.env.remove.join(" "));
        }
        for (key, value) in &spec.env.set {
            println!("[dry-run] export {}={}", key, value);
        }
        println!("[dry-run] {}", spec.display());
        Ok(())
    }
}
