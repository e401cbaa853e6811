//! Target formats supported by the exporter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ConfigurationError;

/// A document format notes can be exported to.
///
/// Parsing is case-insensitive and tolerates surrounding whitespace, so
/// `PDF`, ` pdf ` and `pdf` are equivalent.
///
/// # Examples
///
/// ```
/// use mdnote::domain::ExportFormat;
///
/// let format: ExportFormat = "PDF".parse().unwrap();
/// assert_eq!(format, ExportFormat::Pdf);
/// assert_eq!(format.extension(), "pdf");
/// assert!(format.supports_font_embedding());
///
/// // Plain text is produced by the converter's "plain" writer
/// assert_eq!(ExportFormat::Txt.writer(), "plain");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Docx,
    Odt,
    Txt,
    Pptx,
}

impl ExportFormat {
    /// All supported formats, in the order they are listed to users.
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Pdf,
        ExportFormat::Docx,
        ExportFormat::Odt,
        ExportFormat::Txt,
        ExportFormat::Pptx,
    ];

    /// Returns the user-facing format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Odt => "odt",
            ExportFormat::Txt => "txt",
            ExportFormat::Pptx => "pptx",
        }
    }

    /// Returns the file extension (without the dot) for output files.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Returns the converter's writer name for this format.
    pub fn writer(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "plain",
            other => other.as_str(),
        }
    }

    /// Whether a font file can be embedded in the output.
    pub fn supports_font_embedding(&self) -> bool {
        matches!(self, ExportFormat::Pdf)
    }

    /// Whether font family and size directives affect the output.
    pub fn supports_font_styling(&self) -> bool {
        !matches!(self, ExportFormat::Txt)
    }

    /// Whether page geometry (paper size, line height) applies.
    pub fn supports_page_layout(&self) -> bool {
        matches!(self, ExportFormat::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| ConfigurationError::UnsupportedFormat(s.trim().to_string()))
    }
}

impl Serialize for ExportFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExportFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
