//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// mdnote - export markdown notes to PDF, DOCX, ODT, TXT and PPTX
#[derive(Parser, Debug)]
#[command(name = "mdnote", version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a markdown file through the document converter
    Export(ExportArgs),

    /// List supported export formats and the options they accept
    Formats(FormatsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Markdown file to export
    pub source: PathBuf,

    /// Target format: pdf, docx, odt, txt or pptx
    #[arg(long = "to", value_name = "FORMAT")]
    pub format: String,

    /// Output path (defaults to the source path with the format's extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Embed the given font file (pdf only)
    #[arg(long, value_name = "PATH")]
    pub ttf_path: Option<PathBuf>,

    /// Output font family (pdf, docx, odt, pptx)
    #[arg(long, value_name = "NAME")]
    pub font_family: Option<String>,

    /// Output font size in points
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub font_size: Option<i64>,

    /// Paper size for pdf output (a4 or letter)
    #[arg(long)]
    pub page: Option<String>,

    /// Line spacing multiplier for pdf output
    #[arg(long, value_name = "X", allow_negative_numbers = true)]
    pub line_height: Option<f64>,

    /// Rasterize mermaid diagram blocks to images before conversion
    #[arg(long)]
    pub mermaid_png: bool,

    /// Print the converter command instead of running it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// CLI output format (for status messages, not export content)
    #[arg(long = "cli-format", value_enum, default_value_t = OutputFormat::Human)]
    pub cli_format: OutputFormat,
}

/// Arguments for the `formats` command
#[derive(Parser, Debug)]
pub struct FormatsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
