//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::ExportFormat;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A supported format and the directives it honors.
#[derive(Debug, Serialize)]
pub struct FormatListing {
    pub name: ExportFormat,
    pub extension: &'static str,
    pub writer: &'static str,
    pub font_embedding: bool,
    pub font_styling: bool,
    pub page_layout: bool,
}

impl From<ExportFormat> for FormatListing {
    fn from(format: ExportFormat) -> Self {
        Self {
            name: format,
            extension: format.extension(),
            writer: format.writer(),
            font_embedding: format.supports_font_embedding(),
            font_styling: format.supports_font_styling(),
            page_layout: format.supports_page_layout(),
        }
    }
}
