//! Configuration file support.
//!
//! Two optional locations are read:
//! - Global: `~/.vdbforge/config.toml` - user-wide defaults
//! - Project: `<repo>/.vdbforge/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{ForgeError, ForgeResult};

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".vdbforge";

/// vdbforge configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,
}

/// Build-related configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Packaging mode (only `vcpkg` is supported)
    pub mode: Option<String>,

    /// Path to the vcpkg CMake toolchain file
    pub toolchain: Option<PathBuf>,

    /// vcpkg target triplet (e.g., x64-windows-static-md)
    pub triplet: Option<String>,

    /// CMake generator
    pub generator: Option<String>,

    /// CMake platform (`-A`)
    pub arch: Option<String>,

    /// `Release` or `Debug`
    pub build_type: Option<String>,

    /// Keep CMake from finding TBB
    pub disable_tbb: Option<bool>,

    /// Skip `vcpkg install`
    pub skip_deps: Option<bool>,

    /// Primary output directory
    pub output_dir: Option<PathBuf>,

    /// Unreal plugin directory for the secondary copy
    pub plugin_dir: Option<PathBuf>,

    /// CMake executable
    pub cmake: Option<PathBuf>,
}

impl BuildConfig {
    /// Make relative paths absolute against `base`.
    ///
    /// Empty paths are left alone, as is a bare `cmake` program name, which
    /// is looked up through PATH.
    pub fn rebase_paths(&mut self, base: &Path) {
        for path in [&mut self.toolchain, &mut self.output_dir, &mut self.plugin_dir]
            .into_iter()
            .flatten()
        {
            rebase(base, path);
        }
        if let Some(cmake) = self.cmake.as_mut() {
            if cmake.components().count() > 1 {
                rebase(base, cmake);
            }
        }
    }
}

fn rebase(base: &Path, path: &mut PathBuf) {
    if !path.as_os_str().is_empty() && path.is_relative() {
        *path = base.join(&*path);
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> ForgeResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ForgeError::io("failed to read config file", path, e))?;

        toml::from_str(&contents).map_err(|e| ForgeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let build = other.build;
        if build.mode.is_some() {
            self.build.mode = build.mode;
        }
        if build.toolchain.is_some() {
            self.build.toolchain = build.toolchain;
        }
        if build.triplet.is_some() {
            self.build.triplet = build.triplet;
        }
        if build.generator.is_some() {
            self.build.generator = build.generator;
        }
        if build.arch.is_some() {
            self.build.arch = build.arch;
        }
        if build.build_type.is_some() {
            self.build.build_type = build.build_type;
        }
        if build.disable_tbb.is_some() {
            self.build.disable_tbb = build.disable_tbb;
        }
        if build.skip_deps.is_some() {
            self.build.skip_deps = build.skip_deps;
        }
        if build.output_dir.is_some() {
            self.build.output_dir = build.output_dir;
        }
        if build.plugin_dir.is_some() {
            self.build.plugin_dir = build.plugin_dir;
        }
        if build.cmake.is_some() {
            self.build.cmake = build.cmake;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.vdbforge/config.toml)
/// 2. Global config (~/.vdbforge/config.toml)
/// 3. Defaults
///
/// Relative paths in each file are resolved against the directory that file
/// describes (see [`config_base_dir`]).
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(load_rebased(global_path));
    }

    config.merge(load_rebased(project_path));

    config
}

fn load_rebased(path: &Path) -> Config {
    let mut config = Config::load_or_default(path);
    if let Some(base) = config_base_dir(path) {
        config.build.rebase_paths(base);
    }
    config
}

/// Directory a config file describes: the parent of `.vdbforge/` for
/// `<dir>/.vdbforge/config.toml`, otherwise the file's own directory.
pub fn config_base_dir(path: &Path) -> Option<&Path> {
    let parent = path.parent()?;
    if parent.file_name().is_some_and(|name| name == CONFIG_DIR_NAME) {
        parent.parent()
    } else {
        Some(parent)
    }
}

/// Get the global config directory (~/.vdbforge).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path (~/.vdbforge/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (<repo>/.vdbforge/config.toml).
pub fn project_config_path(repo_root: &Path) -> PathBuf {
    repo_root.join(CONFIG_DIR_NAME).join("config.toml")
}
