//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::export::{
    ConverterSettings, DEFAULT_CONVERTER, DEFAULT_MERMAID_CLI, DEFAULT_PDF_ENGINE,
};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "MDNOTE_CONFIG";

/// Environment variable naming the converter program.
pub const CONVERTER_ENV: &str = "MDNOTE_PANDOC";

/// Application configuration loaded from config file.
///
/// Style keys are defaults; the matching command-line flags win.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Converter program name or path
    pub pandoc: Option<PathBuf>,

    /// PDF engine passed to the converter
    pub pdf_engine: Option<String>,

    /// Mermaid CLI program name or path
    pub mmdc: Option<PathBuf>,

    /// Extra converter arguments appended to every invocation
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Default font family
    pub font_family: Option<String>,

    /// Default font size in points
    pub font_size: Option<i64>,

    /// Default paper size for pdf output
    pub page: Option<String>,

    /// Default line spacing for pdf output
    pub line_height: Option<f64>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// `$MDNOTE_CONFIG` if set, otherwise `~/.config/mdnote/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mdnote")
            .join("config.toml")
    }

    /// Resolve the converter program.
    ///
    /// Precedence order:
    /// 1. Config file `pandoc` setting
    /// 2. $MDNOTE_PANDOC environment variable
    /// 3. "pandoc" as fallback
    pub fn converter(&self) -> PathBuf {
        self.converter_with(std::env::var_os(CONVERTER_ENV))
    }

    fn converter_with(&self, from_env: Option<OsString>) -> PathBuf {
        self.pandoc
            .clone()
            .or_else(|| from_env.filter(|p| !p.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONVERTER))
    }

    /// Resolve the mermaid CLI program.
    pub fn mermaid_cli(&self) -> PathBuf {
        self.mmdc
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MERMAID_CLI))
    }

    /// Builds converter settings from this config.
    pub fn converter_settings(&self) -> ConverterSettings {
        ConverterSettings {
            program: self.converter(),
            pdf_engine: self
                .pdf_engine
                .clone()
                .unwrap_or_else(|| DEFAULT_PDF_ENGINE.to_string()),
            extra_args: self.extra_args.clone(),
        }
    }
}
