//! Errors raised while running an export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ConfigurationError;

/// The external converter (or diagram renderer) failed or is missing.
#[derive(Debug, Error)]
pub enum ExternalToolError {
    #[error("{program} not found; install it or set its path in the config file")]
    NotFound { program: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {}: {diagnostics}", describe_status(.code))]
    Failed {
        program: String,
        /// Exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The tool's own error output, trimmed.
        diagnostics: String,
    },
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Any failure of the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    ExternalTool(#[from] ExternalToolError),

    #[error("failed to prepare {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
