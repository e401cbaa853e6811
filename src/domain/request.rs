//! Export requests and their validation.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{ConfigurationError, ExportFormat, FontSize, LineHeight, PageSize};
use crate::infra::{FileCheckError, check_readable_file};

/// A user's request to export a markdown file.
///
/// Holds the parameters exactly as supplied; nothing is checked until
/// [`ExportRequest::validate`] is called.
///
/// # Examples
///
/// ```no_run
/// use mdnote::domain::{ExportFormat, ExportRequest};
///
/// let request = ExportRequest::new("notes.md", "pdf")
///     .font_family(Some("EB Garamond"))
///     .ttf_path(Some("Garamond.ttf"));
///
/// let validated = request.validate().unwrap();
/// assert_eq!(validated.format(), ExportFormat::Pdf);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    source: PathBuf,
    format: String,
    output: Option<PathBuf>,
    font_family: Option<String>,
    font_size: Option<i64>,
    ttf_path: Option<PathBuf>,
    page: Option<String>,
    line_height: Option<f64>,
    rasterize_diagrams: bool,
}

impl ExportRequest {
    /// Creates a request to export `source` to `format`.
    pub fn new(source: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            format: format.into(),
            ..Self::default()
        }
    }

    /// Sets an explicit output path.
    pub fn output(mut self, output: Option<impl Into<PathBuf>>) -> Self {
        self.output = output.map(Into::into);
        self
    }

    pub fn font_family(mut self, family: Option<impl Into<String>>) -> Self {
        self.font_family = family.map(Into::into);
        self
    }

    /// Sets the font size in points. Validated as a positive integer.
    pub fn font_size(mut self, points: Option<i64>) -> Self {
        self.font_size = points;
        self
    }

    /// Sets a font file to embed (pdf only).
    pub fn ttf_path(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.ttf_path = path.map(Into::into);
        self
    }

    pub fn page(mut self, page: Option<impl Into<String>>) -> Self {
        self.page = page.map(Into::into);
        self
    }

    pub fn line_height(mut self, line_height: Option<f64>) -> Self {
        self.line_height = line_height;
        self
    }

    /// Renders diagram blocks to images before conversion.
    pub fn rasterize_diagrams(mut self, enabled: bool) -> Self {
        self.rasterize_diagrams = enabled;
        self
    }

    /// Checks every parameter and resolves the output path.
    ///
    /// Validation order: source, format, font family, font size, font file,
    /// page size, line height, output path. The first violation wins.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigurationError` for the first invalid field.
    pub fn validate(&self) -> Result<ValidatedRequest, ConfigurationError> {
        check_source(&self.source)?;

        let format: ExportFormat = self.format.parse()?;

        let font_family = match &self.font_family {
            Some(family) if family.trim().is_empty() => {
                return Err(ConfigurationError::EmptyFontFamily);
            }
            Some(family) => Some(family.trim().to_string()),
            None => None,
        };

        let font_size = self.font_size.map(FontSize::new).transpose()?;

        let ttf_path = match &self.ttf_path {
            Some(path) => Some(check_font_file(path, format)?),
            None => None,
        };

        let page = self.page.as_deref().map(str::parse::<PageSize>).transpose()?;
        let line_height = self.line_height.map(LineHeight::new).transpose()?;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| self.source.with_extension(format.extension()));
        if is_same_file(&self.source, &output) {
            return Err(ConfigurationError::OutputIsSource { path: output });
        }

        Ok(ValidatedRequest {
            source: self.source.clone(),
            format,
            output,
            font_family,
            font_size,
            ttf_path,
            page,
            line_height,
            rasterize_diagrams: self.rasterize_diagrams,
        })
    }
}

/// An export request whose every field has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedRequest {
    source: PathBuf,
    format: ExportFormat,
    output: PathBuf,
    font_family: Option<String>,
    font_size: Option<FontSize>,
    ttf_path: Option<PathBuf>,
    page: Option<PageSize>,
    line_height: Option<LineHeight>,
    rasterize_diagrams: bool,
}

impl ValidatedRequest {
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Directory containing the source, used to resolve relative resources.
    pub fn source_dir(&self) -> &Path {
        match self.source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Output path, either explicit or derived from the source.
    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn font_size(&self) -> Option<FontSize> {
        self.font_size
    }

    /// Absolute path of the font file to embed.
    pub fn ttf_path(&self) -> Option<&Path> {
        self.ttf_path.as_deref()
    }

    pub fn page(&self) -> Option<PageSize> {
        self.page
    }

    pub fn line_height(&self) -> Option<LineHeight> {
        self.line_height
    }

    pub fn rasterize_diagrams(&self) -> bool {
        self.rasterize_diagrams
    }
}

fn check_source(path: &Path) -> Result<(), ConfigurationError> {
    check_readable_file(path).map_err(|e| match e {
        FileCheckError::NotFound => ConfigurationError::SourceNotFound { path: path.into() },
        FileCheckError::NotAFile => ConfigurationError::SourceNotAFile { path: path.into() },
        FileCheckError::Unreadable(source) => ConfigurationError::SourceUnreadable {
            path: path.into(),
            source,
        },
    })
}

/// Validates a font file and returns its absolute path.
///
/// The converter typesets in its own working directory, so relative font
/// paths would not resolve there.
fn check_font_file(path: &Path, format: ExportFormat) -> Result<PathBuf, ConfigurationError> {
    if !format.supports_font_embedding() {
        return Err(ConfigurationError::EmbeddingUnsupported { format });
    }

    check_readable_file(path).map_err(|e| match e {
        FileCheckError::NotFound | FileCheckError::NotAFile => {
            ConfigurationError::FontNotFound { path: path.into() }
        }
        FileCheckError::Unreadable(source) => ConfigurationError::FontUnreadable {
            path: path.into(),
            source,
        },
    })?;

    path.canonicalize()
        .map_err(|source| ConfigurationError::FontUnreadable {
            path: path.into(),
            source,
        })
}

fn is_same_file(source: &Path, output: &Path) -> bool {
    if source == output {
        return true;
    }
    match (source.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
