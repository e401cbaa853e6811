//! Rasterizing mermaid diagram blocks before conversion.
//!
//! The converter has no notion of mermaid, so fenced ```` ```mermaid ````
//! blocks are rendered to PNG up front and the source is rewritten to
//! reference the images. The rewritten copy lives in a temporary directory
//! that is removed when the [`StagedSource`] is dropped.

use std::collections::HashMap;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use super::error::{ExportError, ExternalToolError};
use super::runner::{ConverterRunner, ProcessRunner, display_name};
use super::translate::Invocation;
use crate::infra::ContentHash;

/// Default mermaid CLI program, looked up on `PATH`.
pub const DEFAULT_MERMAID_CLI: &str = "mmdc";

/// Renders diagram source to an image file (allows mocking in tests).
pub trait DiagramRenderer {
    /// Whether the renderer can be used at all.
    fn available(&self) -> bool;

    /// Renders `source` to a PNG at `output`.
    fn render(&self, source: &str, output: &Path) -> Result<(), ExportError>;
}

/// Renders diagrams with the mermaid CLI (`mmdc`).
#[derive(Debug, Clone)]
pub struct MermaidCli {
    program: PathBuf,
}

impl MermaidCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for MermaidCli {
    fn default() -> Self {
        Self::new(DEFAULT_MERMAID_CLI)
    }
}

impl DiagramRenderer for MermaidCli {
    fn available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn render(&self, source: &str, output: &Path) -> Result<(), ExportError> {
        let input = output.with_extension("mmd");
        fs::write(&input, source).map_err(|e| ExportError::Staging {
            path: input.clone(),
            source: e,
        })?;

        let invocation = Invocation::new(&self.program)
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(output)
            .arg("-b")
            .arg("white");
        ProcessRunner.run(&invocation)?;

        if !output.exists() {
            return Err(ExternalToolError::Failed {
                program: display_name(&self.program),
                code: Some(0),
                diagnostics: format!("no image written to {}", output.display()),
            }
            .into());
        }
        Ok(())
    }
}

/// A fenced mermaid block found in markdown source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramBlock {
    /// Byte range of the whole block, fences included.
    pub range: Range<usize>,
    /// Diagram source between the fences.
    pub code: String,
}

/// Finds all fenced code blocks whose info string starts with `mermaid`.
pub fn find_diagrams(markdown: &str) -> Vec<DiagramBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<DiagramBlock> = None;

    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) if is_mermaid(&info) => {
                current = Some(DiagramBlock {
                    range,
                    code: String::new(),
                });
            }
            Event::Text(text) => {
                if let Some(block) = current.as_mut() {
                    block.code.push_str(&text);
                }
            }
            Event::End(Tag::CodeBlock(_)) => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }

    blocks
}

/// Ends `text` with a blank line so the next block starts a new paragraph.
fn separate_paragraph(text: &mut String) {
    if text.is_empty() || text.ends_with("\n\n") {
        return;
    }
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text.push('\n');
}

fn is_mermaid(info: &str) -> bool {
    info.split_whitespace()
        .next()
        .is_some_and(|lang| lang.eq_ignore_ascii_case("mermaid"))
}

/// A rewritten source with diagrams replaced by rendered images.
#[derive(Debug)]
pub struct StagedSource {
    _dir: TempDir,
    path: PathBuf,
    rendered: usize,
    failed: usize,
}

impl StagedSource {
    /// Path of the rewritten markdown file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of blocks replaced by an image.
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// Number of blocks left as code because rendering failed.
    pub fn failed(&self) -> usize {
        self.failed
    }
}

/// Renders every mermaid block in `source` and stages a rewritten copy.
///
/// Returns `Ok(None)` when there is nothing to stage: the source has no
/// diagrams or the renderer is unavailable. A diagram that fails to render
/// is left as a code block and logged; it does not fail the export.
///
/// # Errors
///
/// Returns `ExportError::Staging` if the source cannot be read or the
/// staging directory cannot be written.
pub fn stage_diagrams(
    source: &Path,
    renderer: &dyn DiagramRenderer,
) -> Result<Option<StagedSource>, ExportError> {
    let markdown = fs::read_to_string(source).map_err(|e| ExportError::Staging {
        path: source.into(),
        source: e,
    })?;

    let blocks = find_diagrams(&markdown);
    if blocks.is_empty() {
        debug!(source = %source.display(), "no diagrams to render");
        return Ok(None);
    }
    if !renderer.available() {
        warn!(
            count = blocks.len(),
            "mermaid renderer not found; diagrams are exported as code blocks"
        );
        return Ok(None);
    }

    let dir = tempfile::Builder::new()
        .prefix("mdnote-")
        .tempdir()
        .map_err(|e| ExportError::Staging {
            path: std::env::temp_dir(),
            source: e,
        })?;

    let mut images: HashMap<ContentHash, Option<PathBuf>> = HashMap::new();
    let mut rewritten = String::with_capacity(markdown.len());
    let mut cursor = 0;
    let (mut rendered, mut failed) = (0, 0);

    for block in &blocks {
        let hash = ContentHash::compute(block.code.as_bytes());
        let image = images
            .entry(hash)
            .or_insert_with_key(|hash| {
                let path = dir.path().join(format!("diagram-{}.png", hash.short()));
                match renderer.render(&block.code, &path) {
                    Ok(()) => Some(path),
                    Err(e) => {
                        warn!(error = %e, "failed to render diagram; keeping it as code");
                        None
                    }
                }
            })
            .clone();

        rewritten.push_str(&markdown[cursor..block.range.start]);
        match image {
            Some(path) => {
                separate_paragraph(&mut rewritten);
                rewritten.push_str(&format!("![](<{}>)\n\n", path.display()));
                rendered += 1;
            }
            None => {
                rewritten.push_str(&markdown[block.range.clone()]);
                failed += 1;
            }
        }
        cursor = block.range.end;
    }
    rewritten.push_str(&markdown[cursor..]);

    let file_name = source
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("source.md"));
    let path = dir.path().join(file_name);
    fs::write(&path, rewritten).map_err(|e| ExportError::Staging {
        path: path.clone(),
        source: e,
    })?;

    info!(rendered, failed, staged = %path.display(), "staged diagrams");
    Ok(Some(StagedSource {
        _dir: dir,
        path,
        rendered,
        failed,
    }))
}
