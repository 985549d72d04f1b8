//! Copy the built library to its destinations.

use std::path::{Path, PathBuf};

use crate::core::settings::{plugin_deploy_dir, ARTIFACT_NAME};
use crate::core::ForgeResult;
use crate::util::fs::{copy_into, ensure_dir, is_same_file};
use crate::util::shell::{Shell, Status};

/// Copy `artifact` into `output_dir` and, when given, into
/// `<plugin_dir>/ThirdParty/VdbBridge/DLL`. Existing files are overwritten.
///
/// Both copies must succeed. A destination that already is the artifact is
/// left untouched. Returns the destination paths in copy order.
pub fn deploy(
    artifact: &Path,
    output_dir: &Path,
    plugin_dir: Option<&Path>,
    shell: &Shell,
) -> ForgeResult<Vec<PathBuf>> {
    let mut targets = vec![output_dir.to_path_buf()];
    targets.extend(plugin_dir.map(plugin_deploy_dir));

    let mut deployed = Vec::with_capacity(targets.len());
    for dir in targets {
        ensure_dir(&dir)?;
        let dest = dir.join(ARTIFACT_NAME);
        if is_same_file(artifact, &dest) {
            // Copying a file onto itself truncates it.
            tracing::debug!("{} is already in place", dest.display());
        } else {
            copy_into(artifact, &dir, ARTIFACT_NAME)?;
        }
        shell.status(Status::Deployed, dest.display());
        deployed.push(dest);
    }
    Ok(deployed)
}
