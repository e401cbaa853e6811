//! Export of markdown notes through an external document converter.
//!
//! Requests are validated and translated into a single converter
//! invocation (see [`translate`]), optionally after rasterizing mermaid
//! diagrams, and then run as a child process.

pub mod diagrams;
mod error;
mod pipeline;
mod runner;
mod translate;

pub use diagrams::{DEFAULT_MERMAID_CLI, DiagramRenderer, MermaidCli, StagedSource, stage_diagrams};
pub use error::{ExportError, ExternalToolError};
pub use pipeline::{ExportOutcome, export};
pub use runner::{ConverterRunner, ProcessRunner, RunOutput};
pub use translate::{
    ConverterSettings, DEFAULT_CONVERTER, DEFAULT_PDF_ENGINE, Invocation, build_invocation,
    translate,
};
