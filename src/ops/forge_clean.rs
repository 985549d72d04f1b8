//! The `vdbforge clean` operation.

use std::path::{Path, PathBuf};

use crate::core::settings::BUILD_DIR_NAME;
use crate::core::ForgeResult;
use crate::util::fs::remove_dir_all_if_exists;

/// Remove `<repo_root>/build-ue-full`. Returns the path if something was removed.
pub fn clean(repo_root: &Path) -> ForgeResult<Option<PathBuf>> {
    let build_dir = repo_root.join(BUILD_DIR_NAME);
    if remove_dir_all_if_exists(&build_dir)? {
        Ok(Some(build_dir))
    } else {
        Ok(None)
    }
}
