//! File system checks and staging helpers.

use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Why a path failed the readable-file check.
#[derive(Debug)]
pub enum FileCheckError {
    NotFound,
    NotAFile,
    Unreadable(io::Error),
}

/// Checks that `path` names an existing regular file that can be opened
/// for reading.
///
/// Symlinks are followed.
pub fn check_readable_file(path: &Path) -> Result<(), FileCheckError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FileCheckError::NotFound,
        _ => FileCheckError::Unreadable(e),
    })?;

    if !metadata.is_file() {
        return Err(FileCheckError::NotAFile);
    }

    File::open(path).map(drop).map_err(FileCheckError::Unreadable)
}

/// Creates the parent directory of `path` if it doesn't exist yet.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}
