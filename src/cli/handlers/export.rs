//! Handler for the `export` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::ExportArgs;
use crate::domain::{ExportFormat, ExportRequest};
use crate::export::{ExportOutcome, Invocation, MermaidCli, ProcessRunner, export, translate};

/// Result of a dry run.
#[derive(Debug, Serialize)]
pub struct DryRunResult<'a> {
    pub dry_run: bool,
    pub invocation: &'a Invocation,
}

/// Handle the `export` command.
pub fn handle_export(args: &ExportArgs, config: &Config) -> Result<()> {
    let request = build_request(args, config);
    let settings = config.converter_settings();

    if args.dry_run {
        let invocation = translate(&request, &settings)?;
        print_dry_run(&args.cli_format, &invocation)?;
        return Ok(());
    }

    let renderer = MermaidCli::new(config.mermaid_cli());
    let outcome = export(&request, &settings, &ProcessRunner, &renderer)?;
    print_result(&args.cli_format, &outcome)
}

/// Merges command-line arguments over config defaults.
///
/// Config style defaults only apply to formats that honor them, so a
/// config-wide `page` does not warn on every docx export. Flags are always
/// passed through.
pub(crate) fn build_request(args: &ExportArgs, config: &Config) -> ExportRequest {
    let format = args.format.parse::<ExportFormat>().ok();
    let styling = format.is_some_and(|f| f.supports_font_styling());
    let layout = format.is_some_and(|f| f.supports_page_layout());

    ExportRequest::new(&args.source, &args.format)
        .output(args.output.as_ref())
        .ttf_path(args.ttf_path.as_ref())
        .font_family(
            args.font_family
                .as_ref()
                .or(config.font_family.as_ref().filter(|_| styling)),
        )
        .font_size(args.font_size.or(config.font_size.filter(|_| styling)))
        .page(args.page.as_ref().or(config.page.as_ref().filter(|_| layout)))
        .line_height(args.line_height.or(config.line_height.filter(|_| layout)))
        .rasterize_diagrams(args.mermaid_png)
}

fn print_dry_run(format: &OutputFormat, invocation: &Invocation) -> Result<()> {
    match format {
        OutputFormat::Human | OutputFormat::Paths => println!("{}", invocation),
        OutputFormat::Json => {
            let output = Output::new(DryRunResult {
                dry_run: true,
                invocation,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn print_result(format: &OutputFormat, outcome: &ExportOutcome) -> Result<()> {
    match format {
        OutputFormat::Human => {
            print!(
                "Exported {} to {} ({})",
                outcome.source.display(),
                outcome.output.display(),
                outcome.format
            );
            match outcome.diagrams_rendered {
                0 => {}
                1 => print!(", 1 diagram rendered"),
                n => print!(", {} diagrams rendered", n),
            }
            match outcome.diagrams_failed {
                0 => println!(),
                1 => println!(", 1 diagram left as code"),
                n => println!(", {} diagrams left as code", n),
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(outcome))?);
        }
        OutputFormat::Paths => {
            println!("{}", outcome.output.display());
        }
    }
    Ok(())
}
