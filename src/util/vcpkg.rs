//! Vcpkg layout helpers.
//!
//! ```text
//! <vcpkg-root>/
//! ├── vcpkg[.exe]
//! └── scripts/buildsystems/vcpkg.cmake   # CMake toolchain file
//! ```

use std::path::{Path, PathBuf};

use crate::core::settings::TOOLCHAIN_SUBPATH;

fn vcpkg_exe() -> &'static str {
    if cfg!(windows) {
        "vcpkg.exe"
    } else {
        "vcpkg"
    }
}

/// Path to the vcpkg binary inside `root`.
pub fn vcpkg_binary(root: &Path) -> PathBuf {
    root.join(vcpkg_exe())
}

/// Path to the CMake toolchain file inside `root`.
pub fn toolchain_file(root: &Path) -> PathBuf {
    TOOLCHAIN_SUBPATH
        .split('/')
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// The vcpkg executable to launch.
///
/// Prefers the binary under `root` when it exists, otherwise the bare command
/// name so the OS resolves it through PATH.
pub fn resolve_executable(root: Option<&Path>) -> PathBuf {
    if let Some(binary) = root.map(vcpkg_binary).filter(|b| b.is_file()) {
        return binary;
    }
    PathBuf::from(vcpkg_exe())
}

/// Find vcpkg in PATH and derive its root from the binary location.
pub fn detect_from_path() -> Option<PathBuf> {
    let vcpkg_path = which::which(vcpkg_exe()).ok()?;

    // vcpkg binary is at <root>/vcpkg[.exe]
    let root = vcpkg_path.parent()?;

    if is_valid_vcpkg_root(root) {
        tracing::debug!("Found vcpkg in PATH: {}", root.display());
        return Some(root.to_path_buf());
    }

    None
}

/// Validate that a directory is a valid vcpkg root.
pub fn is_valid_vcpkg_root(path: &Path) -> bool {
    // Marker file created by vcpkg bootstrap
    if path.join(".vcpkg-root").exists() {
        return true;
    }

    vcpkg_binary(path).exists() && path.join("scripts").is_dir()
}
