//! Command handlers for the CLI.

mod completions;
mod export;
mod formats;

pub use completions::handle_completions;
pub use export::{DryRunResult, handle_export};
pub use formats::handle_formats;
