//! Resolved build settings and the fixed layout conventions of the project.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

/// Environment variable naming the vcpkg installation root.
pub const VCPKG_ROOT_ENV: &str = "VCPKG_ROOT";

/// Toolchain file location relative to the vcpkg root.
pub const TOOLCHAIN_SUBPATH: &str = "scripts/buildsystems/vcpkg.cmake";

/// Build tree directory name, relative to the repository root.
pub const BUILD_DIR_NAME: &str = "build-ue-full";

/// The single CMake target this tool builds.
pub const BUILD_TARGET: &str = "VdbBridge";

/// File name of the produced shared library.
pub const ARTIFACT_NAME: &str = "VdbBridge.dll";

/// Plugin-relative directory that receives the secondary copy.
pub const PLUGIN_SUBDIR: [&str; 3] = ["ThirdParty", BUILD_TARGET, "DLL"];

pub const DEFAULT_TRIPLET: &str = "x64-windows-static-md";
pub const DEFAULT_GENERATOR: &str = "Visual Studio 17 2022";
pub const DEFAULT_ARCH: &str = "x64";
pub const DEFAULT_CMAKE: &str = "cmake";

/// How third-party libraries are provided to the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackagingMode {
    /// Dependencies come from vcpkg through its CMake toolchain file.
    #[default]
    Vcpkg,
}

impl PackagingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackagingMode::Vcpkg => "vcpkg",
        }
    }
}

impl FromStr for PackagingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vcpkg" => Ok(PackagingMode::Vcpkg),
            _ => Err(format!("unsupported mode '{}'; expected 'vcpkg'", s)),
        }
    }
}

impl fmt::Display for PackagingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BuildType {
    #[default]
    Release,
    Debug,
}

impl BuildType {
    /// Name as understood by CMake (`CMAKE_BUILD_TYPE`, `--config`).
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Release => "Release",
            BuildType::Debug => "Debug",
        }
    }

    pub fn is_optimized(&self) -> bool {
        matches!(self, BuildType::Release)
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "release" => Ok(BuildType::Release),
            "debug" => Ok(BuildType::Debug),
            _ => Err(format!(
                "invalid build type '{}'; expected 'Release' or 'Debug'",
                s
            )),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved settings for one pipeline run.
///
/// Produced once by [`crate::ops::resolve::resolve`] and never mutated. All
/// directory fields are absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub mode: PackagingMode,
    /// Existing vcpkg toolchain file.
    pub toolchain: PathBuf,
    pub triplet: String,
    pub generator: String,
    pub arch: String,
    pub build_type: BuildType,
    /// Keep CMake from finding TBB.
    pub disable_tbb: bool,
    pub skip_deps: bool,
    /// Remove the build tree before configuring.
    pub clean: bool,
    pub output_dir: PathBuf,
    pub plugin_dir: Option<PathBuf>,
    pub repo_root: PathBuf,
    pub build_dir: PathBuf,
    /// vcpkg root taken from the environment, used to locate the vcpkg binary.
    pub vcpkg_root: Option<PathBuf>,
    /// CMake executable (bare name resolved through PATH, or a path).
    pub cmake: PathBuf,
}

impl Configuration {
    /// Directory inside the plugin that receives the secondary copy.
    pub fn plugin_deploy_dir(&self) -> Option<PathBuf> {
        self.plugin_dir.as_deref().map(plugin_deploy_dir)
    }
}

/// `<plugin>/ThirdParty/VdbBridge/DLL`
pub fn plugin_deploy_dir(plugin_dir: &Path) -> PathBuf {
    PLUGIN_SUBDIR
        .iter()
        .fold(plugin_dir.to_path_buf(), |dir, segment| dir.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_type_parse() {
        assert_eq!("Release".parse::<BuildType>(), Ok(BuildType::Release));
        assert_eq!("debug".parse::<BuildType>(), Ok(BuildType::Debug));
        assert!("RelWithDebInfo".parse::<BuildType>().is_err());
        assert_eq!(BuildType::default(), BuildType::Release);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("vcpkg".parse::<PackagingMode>(), Ok(PackagingMode::Vcpkg));
        assert!("conan".parse::<PackagingMode>().is_err());
    }

    #[test]
    fn test_plugin_deploy_dir() {
        let dir = plugin_deploy_dir(Path::new("/plugins/Vdb"));
        assert_eq!(dir, PathBuf::from("/plugins/Vdb/ThirdParty/VdbBridge/DLL"));
    }
}
