//! The export pipeline: validate, stage diagrams, convert.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use super::diagrams::{DiagramRenderer, stage_diagrams};
use super::error::ExportError;
use super::runner::ConverterRunner;
use super::translate::{ConverterSettings, Invocation, build_invocation};
use crate::domain::{ExportFormat, ExportRequest};
use crate::infra::ensure_parent_dir;

/// Result of a successful export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    pub source: PathBuf,
    pub format: ExportFormat,
    pub output: PathBuf,
    /// Number of diagram blocks replaced by images.
    pub diagrams_rendered: usize,
    /// Number of diagram blocks left as code because rendering failed.
    pub diagrams_failed: usize,
    pub invocation: Invocation,
}

/// Exports a markdown file by delegating to the external converter.
///
/// Validation happens first, so an invalid request never spawns a process.
/// Staged diagram files are kept until the converter has exited.
///
/// # Errors
///
/// - `ExportError::Configuration` for invalid parameters
/// - `ExportError::Staging` if the output directory or staged files can't be written
/// - `ExportError::ExternalTool` if the converter is missing or fails
pub fn export(
    request: &ExportRequest,
    settings: &ConverterSettings,
    runner: &dyn ConverterRunner,
    renderer: &dyn DiagramRenderer,
) -> Result<ExportOutcome, ExportError> {
    let validated = request.validate()?;

    ensure_parent_dir(validated.output()).map_err(|e| ExportError::Staging {
        path: validated.output().into(),
        source: e,
    })?;

    let staged = if validated.rasterize_diagrams() {
        stage_diagrams(validated.source(), renderer)?
    } else {
        None
    };
    let input = staged
        .as_ref()
        .map_or(validated.source(), |staged| staged.path());

    let invocation = build_invocation(&validated, settings, input);
    runner.run(&invocation)?;

    info!(
        format = %validated.format(),
        output = %validated.output().display(),
        "export complete"
    );

    Ok(ExportOutcome {
        source: validated.source().to_path_buf(),
        format: validated.format(),
        output: validated.output().to_path_buf(),
        diagrams_rendered: staged.as_ref().map_or(0, |s| s.rendered()),
        diagrams_failed: staged.as_ref().map_or(0, |s| s.failed()),
        invocation,
    })
}
