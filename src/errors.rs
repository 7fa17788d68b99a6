//! Typed error hierarchy for the classic docs orchestrator.
//!
//! Every variant is fatal. The orchestrator never recovers from an error; it
//! only tags the failure so the report says which part of the pipeline
//! stopped.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the classic docs build pipeline.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("Unrecognized stage {0} (expected 'pre' or 'post')")]
    UnrecognizedStage(String),

    #[error("The post stage requires an output directory (--output-dir)")]
    MissingOutputDir,

    #[error("Expected PETSc configuration not found at {}", path.display())]
    ConfigurationNotFound { path: PathBuf },

    #[error("Path {} could not be resolved: {source}", path.display())]
    UnresolvedPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to spawn {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}", describe_exit(*code))]
    CommandFailed { program: String, code: Option<i32> },

    #[error("Failed to remove {}: {source}", path.display())]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("non-zero code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

pub type Result<T, E = DocsError> = std::result::Result<T, E>;
