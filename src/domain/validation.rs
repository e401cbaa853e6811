//! Configuration errors raised while validating an export request.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::ExportFormat;

/// The request field a [`ConfigurationError`] refers to.
///
/// Names match the command-line flags that set each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestField {
    Source,
    Format,
    Output,
    FontFamily,
    FontSize,
    TtfPath,
    Page,
    LineHeight,
}

impl RequestField {
    /// Returns the field name as used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestField::Source => "source",
            RequestField::Format => "format",
            RequestField::Output => "output",
            RequestField::FontFamily => "font-family",
            RequestField::FontSize => "font-size",
            RequestField::TtfPath => "ttf-path",
            RequestField::Page => "page",
            RequestField::LineHeight => "line-height",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid, missing, or incompatible export parameters.
///
/// Always detected before any external process is spawned.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("source path is not a file: {path}")]
    SourceNotAFile { path: PathBuf },

    #[error("source file is not readable: {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported target format '{0}': expected one of pdf, docx, odt, txt, pptx")]
    UnsupportedFormat(String),

    #[error("font family cannot be empty")]
    EmptyFontFamily,

    #[error("font size must be a positive integer, got {0}")]
    InvalidFontSize(i64),

    #[error("font file not found: {path}")]
    FontNotFound { path: PathBuf },

    #[error("font file is not readable: {path}: {source}")]
    FontUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("font embedding is only supported for pdf, not {format}")]
    EmbeddingUnsupported { format: ExportFormat },

    #[error("unsupported page size '{0}': expected a4 or letter")]
    UnsupportedPage(String),

    #[error("line height must be a positive number, got {0}")]
    InvalidLineHeight(f64),

    #[error("output path would overwrite the source file: {path}")]
    OutputIsSource { path: PathBuf },
}

impl ConfigurationError {
    /// Returns the request field that violated validation.
    pub fn field(&self) -> RequestField {
        match self {
            ConfigurationError::SourceNotFound { .. }
            | ConfigurationError::SourceNotAFile { .. }
            | ConfigurationError::SourceUnreadable { .. } => RequestField::Source,
            ConfigurationError::UnsupportedFormat(_) => RequestField::Format,
            ConfigurationError::EmptyFontFamily => RequestField::FontFamily,
            ConfigurationError::InvalidFontSize(_) => RequestField::FontSize,
            ConfigurationError::FontNotFound { .. }
            | ConfigurationError::FontUnreadable { .. }
            | ConfigurationError::EmbeddingUnsupported { .. } => RequestField::TtfPath,
            ConfigurationError::UnsupportedPage(_) => RequestField::Page,
            ConfigurationError::InvalidLineHeight(_) => RequestField::LineHeight,
            ConfigurationError::OutputIsSource { .. } => RequestField::Output,
        }
    }
}
