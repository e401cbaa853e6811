//! Isolated test environment with temp directory.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use super::MdnoteCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary working directory.
///
/// Holds the markdown sources, the config file and any fake tools.
/// Everything is removed when the environment is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the working directory
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment with no config file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the path to the working directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the config file the CLI reads (may not exist).
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Writes the config file.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        self.write_file("config.toml", toml)
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes a markdown note and returns its path.
    pub fn add_note(&self, name: &str, body: &str) -> PathBuf {
        self.write_file(name, body)
    }

    /// Reads a file relative to the environment root.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.root.join(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }

    /// Writes an executable shell script and returns its path.
    #[cfg(unix)]
    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.write_file(name, &format!("#!/bin/sh\n{}\n", body));
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    /// Installs a fake converter and points the config at it.
    ///
    /// The fake records its arguments (one per line) in `converter.args`,
    /// copies its input file to `converter.input`, and writes a stub
    /// document to the `--output=` path.
    #[cfg(unix)]
    pub fn install_fake_converter(&self) -> PathBuf {
        let args_log = self.root.join("converter.args");
        let input_copy = self.root.join("converter.input");
        let script = self.write_script(
            "bin/pandoc",
            &format!(
                r#"printf '%s\n' "$@" > '{args}'
cp "$1" '{input}'
for arg in "$@"; do
  case "$arg" in
    --output=*) printf 'converted\n' > "${{arg#--output=}}" ;;
  esac
done"#,
                args = args_log.display(),
                input = input_copy.display(),
            ),
        );
        self.use_converter(&script);
        script
    }

    /// Installs a converter that fails with a diagnostic on stderr.
    #[cfg(unix)]
    pub fn install_failing_converter(&self, message: &str, code: i32) -> PathBuf {
        let script = self.write_script(
            "bin/pandoc",
            &format!("echo '{}' >&2\nexit {}", message, code),
        );
        self.use_converter(&script);
        script
    }

    /// Installs a fake mermaid CLI that writes a stub PNG to its `-o` path.
    #[cfg(unix)]
    pub fn install_fake_mermaid(&self) -> PathBuf {
        self.write_script(
            "bin/mmdc",
            r#"while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then printf 'PNG' > "$2"; fi
  shift
done"#,
        )
    }

    /// Writes a config file selecting `converter`.
    pub fn use_converter(&self, converter: &Path) {
        self.write_config(&format!("pandoc = {:?}\n", converter.display().to_string()));
    }

    /// Writes a config file selecting both fake tools.
    pub fn use_tools(&self, converter: &Path, mmdc: &Path) {
        self.write_config(&format!(
            "pandoc = {:?}\nmmdc = {:?}\n",
            converter.display().to_string(),
            mmdc.display().to_string()
        ));
    }

    /// Returns the arguments recorded by the fake converter.
    pub fn converter_args(&self) -> Vec<String> {
        self.read("converter.args").lines().map(str::to_string).collect()
    }

    /// Whether the fake converter ran at all.
    pub fn converter_ran(&self) -> bool {
        self.root.join("converter.args").exists()
    }

    /// Creates an MdnoteCommand configured for this test environment.
    pub fn cmd(&self) -> MdnoteCommand {
        MdnoteCommand::new(&self.config_path()).current_dir(&self.root)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
