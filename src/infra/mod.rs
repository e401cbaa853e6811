//! File checks and content hashing

mod content_hash;
mod fs;

pub use content_hash::ContentHash;
pub use fs::{FileCheckError, check_readable_file, ensure_parent_dir};
