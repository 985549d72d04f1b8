//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::{ForgeError, ForgeResult};

/// Ensure a directory exists, creating it and its parents if necessary.
pub fn ensure_dir(path: &Path) -> ForgeResult<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)
            .map_err(|e| ForgeError::io("failed to create directory", path, e))?;
    }
    Ok(())
}

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> ForgeResult<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).map_err(|e| ForgeError::io("failed to remove directory", path, e))?;
    Ok(true)
}

/// Copy `src` into `dest_dir` under `file_name`, replacing any existing file.
pub fn copy_into(src: &Path, dest_dir: &Path, file_name: &str) -> ForgeResult<PathBuf> {
    let dest = dest_dir.join(file_name);
    fs::copy(src, &dest).map_err(|e| ForgeError::Copy {
        from: src.to_path_buf(),
        to: dest.clone(),
        source: e,
    })?;
    Ok(dest)
}

/// Whether both paths exist and name the same file after resolving links and `..`.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// First regular file named `file_name` under `root`, in directory walk order.
///
/// Unreadable entries are skipped.
pub fn find_file_named(root: &Path, file_name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {}", e);
                None
            }
        })
        .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
        .map(|entry| entry.into_path())
}
