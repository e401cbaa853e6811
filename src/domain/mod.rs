//! Core types: ExportRequest, ExportFormat, typography directives, ConfigurationError

mod format;
mod request;
mod style;
mod validation;

pub use format::ExportFormat;
pub use request::{ExportRequest, ValidatedRequest};
pub use style::{FontSize, LineHeight, PageSize};
pub use validation::{ConfigurationError, RequestField};
