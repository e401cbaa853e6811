//! Translation of export requests into converter invocations.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::ser::SerializeStruct;
use tracing::{debug, warn};

use crate::domain::{ConfigurationError, ExportFormat, ExportRequest, ValidatedRequest};

/// Default converter program, looked up on `PATH`.
pub const DEFAULT_CONVERTER: &str = "pandoc";

/// Default PDF engine. Needs to be fontspec-aware for font embedding.
pub const DEFAULT_PDF_ENGINE: &str = "xelatex";

/// How to reach the external converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterSettings {
    /// Converter program name or path.
    pub program: PathBuf,
    /// Engine passed to `--pdf-engine` for pdf output.
    pub pdf_engine: String,
    /// Arguments appended verbatim after the translated ones.
    pub extra_args: Vec<String>,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_CONVERTER),
            pdf_engine: DEFAULT_PDF_ENGINE.to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// A fully formed external command: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Returns the value of the first `--name=value` argument.
    pub fn option_value(&self, name: &str) -> Option<String> {
        let prefix = format!("--{name}=");
        self.args
            .iter()
            .map(|a| a.to_string_lossy())
            .find_map(|a| a.strip_prefix(prefix.as_str()).map(str::to_string))
    }

    /// Returns the values of every `--variable=key:value` argument for `key`.
    pub fn variables(&self, key: &str) -> Vec<String> {
        let prefix = format!("--variable={key}:");
        self.args
            .iter()
            .map(|a| a.to_string_lossy())
            .filter_map(|a| a.strip_prefix(prefix.as_str()).map(str::to_string))
            .collect()
    }
}

impl fmt::Display for Invocation {
    /// Formats the invocation as a copy-pasteable shell command line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(self.program.as_os_str()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

impl Serialize for Invocation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let mut state = serializer.serialize_struct("Invocation", 2)?;
        state.serialize_field("program", &self.program.to_string_lossy())?;
        state.serialize_field("args", &args)?;
        state.end()
    }
}

fn shell_quote(arg: &OsStr) -> String {
    let arg = arg.to_string_lossy();
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        arg.into_owned()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Validates `request` and builds the converter invocation for it.
///
/// This is a pure mapping: nothing is spawned and no files are written.
///
/// # Errors
///
/// Returns the `ConfigurationError` for the first invalid field.
pub fn translate(
    request: &ExportRequest,
    settings: &ConverterSettings,
) -> Result<Invocation, ConfigurationError> {
    let validated = request.validate()?;
    Ok(build_invocation(&validated, settings, validated.source()))
}

/// Builds the invocation for an already validated request.
///
/// `input` is the file handed to the converter. It differs from the
/// request's source when diagrams were staged; relative resources are
/// still resolved against the original source directory.
pub fn build_invocation(
    request: &ValidatedRequest,
    settings: &ConverterSettings,
    input: &Path,
) -> Invocation {
    let format = request.format();

    let mut invocation = Invocation::new(&settings.program)
        .arg(input)
        .arg("--from=markdown")
        .arg(format!("--to={}", format.writer()))
        .arg("--standalone")
        .arg(option("output", request.output().as_os_str()))
        .arg(option("resource-path", request.source_dir().as_os_str()));

    if format == ExportFormat::Pdf {
        invocation = invocation.arg(format!("--pdf-engine={}", settings.pdf_engine));
    }

    invocation = push_font_directives(invocation, request);
    invocation = push_page_directives(invocation, request);

    for extra in &settings.extra_args {
        invocation = invocation.arg(extra);
    }

    debug!(%invocation, "translated export request");
    invocation
}

fn push_font_directives(mut invocation: Invocation, request: &ValidatedRequest) -> Invocation {
    let format = request.format();

    if !format.supports_font_styling() {
        if request.font_family().is_some() || request.font_size().is_some() {
            warn!(%format, "font family and size have no effect on this format; ignoring");
        }
        return invocation;
    }

    let embedded = request.ttf_path();
    let main_font = request.font_family().map(str::to_string).or_else(|| {
        embedded
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
    });

    if let Some(family) = main_font {
        invocation = invocation.arg(variable("mainfont", OsStr::new(&family)));
    }

    if let Some(font) = embedded {
        let mut dir = font
            .parent()
            .map(|p| p.as_os_str().to_os_string())
            .unwrap_or_default();
        dir.push("/");
        let mut path_option = OsString::from("Path=");
        path_option.push(dir);
        invocation = invocation.arg(variable("mainfontoptions", &path_option));

        if let Some(file_name) = font.file_name() {
            let mut upright = OsString::from("UprightFont=");
            upright.push(file_name);
            invocation = invocation.arg(variable("mainfontoptions", &upright));
        }
    }

    if let Some(size) = request.font_size() {
        invocation = invocation.arg(variable("fontsize", OsStr::new(&size.to_string())));
    }

    invocation
}

fn push_page_directives(mut invocation: Invocation, request: &ValidatedRequest) -> Invocation {
    let format = request.format();

    if !format.supports_page_layout() {
        if request.page().is_some() || request.line_height().is_some() {
            warn!(%format, "page size and line height only apply to pdf; ignoring");
        }
        return invocation;
    }

    if let Some(page) = request.page() {
        invocation = invocation.arg(variable("papersize", OsStr::new(page.as_str())));
    }
    if let Some(line_height) = request.line_height() {
        invocation = invocation.arg(variable(
            "linestretch",
            OsStr::new(&line_height.to_string()),
        ));
    }

    invocation
}

fn option(name: &str, value: &OsStr) -> OsString {
    let mut arg = OsString::from(format!("--{name}="));
    arg.push(value);
    arg
}

fn variable(key: &str, value: &OsStr) -> OsString {
    let mut arg = OsString::from(format!("--variable={key}:"));
    arg.push(value);
    arg
}
