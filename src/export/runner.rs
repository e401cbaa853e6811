//! Execution of converter invocations as child processes.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use super::error::ExternalToolError;
use super::translate::Invocation;

/// Captured output of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Executes invocations (allows mocking in tests).
pub trait ConverterRunner {
    fn run(&self, invocation: &Invocation) -> Result<RunOutput, ExternalToolError>;
}

/// Runs invocations as real child processes.
///
/// The program is resolved on `PATH` first so a missing converter is
/// reported as such instead of as a generic spawn failure. The child is
/// always waited for, whatever its exit status.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ConverterRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<RunOutput, ExternalToolError> {
        let program_name = display_name(invocation.program());
        let program = which::which(invocation.program()).map_err(|e| {
            debug!(program = %program_name, error = %e, "program lookup failed");
            ExternalToolError::NotFound {
                program: program_name.clone(),
            }
        })?;

        info!(%invocation, "running converter");
        let output = Command::new(&program)
            .args(invocation.args())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => ExternalToolError::NotFound {
                    program: program_name.clone(),
                },
                _ => ExternalToolError::Spawn {
                    program: program_name.clone(),
                    source,
                },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ExternalToolError::Failed {
                program: program_name,
                code: output.status.code(),
                diagnostics: diagnostics(&stderr, &stdout),
            });
        }

        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            warn!(program = %program_name, "{}", line.trim_end());
        }

        Ok(RunOutput { stdout, stderr })
    }
}

/// Short program name for messages (`pandoc` rather than a full path).
pub(crate) fn display_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Picks the tool's diagnostic text: stderr, else stdout, else a placeholder.
fn diagnostics(stderr: &str, stdout: &str) -> String {
    [stderr, stdout]
        .into_iter()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("no diagnostic output")
        .to_string()
}
