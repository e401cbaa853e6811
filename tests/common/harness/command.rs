//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `mdnote` binary.
///
/// The command never sees the developer's own config file or converter
/// environment: `MDNOTE_CONFIG` always points into the test environment.
pub struct MdnoteCommand {
    args: Vec<String>,
    config: PathBuf,
    current_dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl MdnoteCommand {
    /// Creates a new command reading its config from `config`.
    pub fn new(config: &Path) -> Self {
        Self {
            args: Vec::new(),
            config: config.to_path_buf(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Adds a path argument.
    pub fn path(self, path: &Path) -> Self {
        self.args([path.to_string_lossy()])
    }

    /// Runs the command from `dir`.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets an environment variable for the command.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("mdnote").expect("Failed to find mdnote binary");
        cmd.args(&self.args)
            .env("MDNOTE_CONFIG", &self.config)
            .env_remove("MDNOTE_PANDOC")
            .env_remove("RUST_LOG");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for `export <source> --to <format>`.
    pub fn export(self, source: &Path, format: &str) -> Self {
        self.args(["export"]).path(source).args(["--to", format])
    }

    /// Configures for the `formats` command.
    pub fn formats(self) -> Self {
        self.args(["formats"])
    }

    /// Adds `--dry-run`.
    pub fn dry_run(self) -> Self {
        self.args(["--dry-run"])
    }

    /// Adds `--cli-format json` to an export command.
    pub fn cli_format_json(self) -> Self {
        self.args(["--cli-format", "json"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        MdnoteCommand::new(Path::new("/nonexistent/config.toml"))
            .args(["--help"])
            .assert()
            .success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = MdnoteCommand::new(Path::new("config.toml"))
            .export(Path::new("notes.md"), "pdf")
            .dry_run();
        assert_eq!(
            cmd.get_args(),
            &["export", "notes.md", "--to", "pdf", "--dry-run"]
        );
    }
}
