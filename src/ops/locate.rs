//! Find the built shared library.
//!
//! Multi-config generators put it at `<build>/<BuildType>/VdbBridge.dll`.
//! When it is not there, the build tree is searched for the file name.

use std::path::{Path, PathBuf};

use crate::core::settings::ARTIFACT_NAME;
use crate::core::{BuildType, ForgeError, ForgeResult};
use crate::util::fs::find_file_named;

/// `<build>/<BuildType>/VdbBridge.dll`
pub fn expected_artifact_path(build_dir: &Path, build_type: BuildType) -> PathBuf {
    build_dir.join(build_type.as_str()).join(ARTIFACT_NAME)
}

/// Locate the artifact, preferring the conventional path over a tree search.
///
/// With several matches elsewhere in the tree, which one the search returns
/// depends on directory enumeration order.
pub fn locate_artifact(build_dir: &Path, build_type: BuildType) -> ForgeResult<PathBuf> {
    let expected = expected_artifact_path(build_dir, build_type);
    if expected.is_file() {
        return Ok(expected);
    }

    tracing::debug!(
        "{} not at {}, searching {}",
        ARTIFACT_NAME,
        expected.display(),
        build_dir.display()
    );

    match find_file_named(build_dir, ARTIFACT_NAME) {
        Some(found) => {
            tracing::info!("found {} at {}", ARTIFACT_NAME, found.display());
            Ok(found)
        }
        None => Err(ForgeError::ArtifactNotFound {
            artifact: ARTIFACT_NAME.to_string(),
            build_dir: build_dir.to_path_buf(),
        }),
    }
}
