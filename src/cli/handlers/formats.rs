//! Handler for the `formats` command.

use anyhow::Result;

use crate::cli::FormatsArgs;
use crate::cli::output::{FormatListing, Output, OutputFormat};
use crate::domain::ExportFormat;

/// Handle the `formats` command.
pub fn handle_formats(args: &FormatsArgs) -> Result<()> {
    let listings: Vec<FormatListing> = ExportFormat::ALL.into_iter().map(Into::into).collect();

    match args.format {
        OutputFormat::Human => {
            for listing in &listings {
                println!("{}", describe(listing));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&listings))?);
        }
        OutputFormat::Paths => {
            for listing in &listings {
                println!("{}", listing.name);
            }
        }
    }

    Ok(())
}

fn describe(listing: &FormatListing) -> String {
    let mut options = Vec::new();
    if listing.font_styling {
        options.push("--font-family, --font-size");
    }
    if listing.font_embedding {
        options.push("--ttf-path");
    }
    if listing.page_layout {
        options.push("--page, --line-height");
    }
    let options = if options.is_empty() {
        "no style options".to_string()
    } else {
        options.join(", ")
    };
    format!("{:<5} .{:<5} {}", listing.name.as_str(), listing.extension, options)
}
