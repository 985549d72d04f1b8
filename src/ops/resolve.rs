//! Turn user input into a validated [`Configuration`].
//!
//! Resolution itself only reads the filesystem (to check the toolchain file).
//! Creating the directories later stages write to is a separate step,
//! [`ensure_directories`].

use std::path::{Path, PathBuf};

use crate::core::settings::{
    BUILD_DIR_NAME, DEFAULT_ARCH, DEFAULT_CMAKE, DEFAULT_GENERATOR, DEFAULT_TRIPLET,
    VCPKG_ROOT_ENV,
};
use crate::core::{BuildType, Configuration, ForgeError, ForgeResult, PackagingMode};
use crate::util::config::Config;
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};
use crate::util::vcpkg;

/// Unvalidated build settings, as collected from the command line and config files.
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub mode: Option<String>,
    pub toolchain: Option<PathBuf>,
    pub triplet: Option<String>,
    pub generator: Option<String>,
    pub arch: Option<String>,
    pub build_type: Option<String>,
    /// `None` when neither `--disable-tbb` nor `--no-disable-tbb` was given.
    pub disable_tbb: Option<bool>,
    pub skip_deps: Option<bool>,
    pub clean: bool,
    pub output_dir: Option<PathBuf>,
    pub plugin_dir: Option<PathBuf>,
    pub repo_root: Option<PathBuf>,
    pub cmake: Option<PathBuf>,
}

impl BuildRequest {
    /// Fill every setting not given explicitly from the config file.
    pub fn with_config(mut self, config: &Config) -> Self {
        let build = &config.build;
        self.mode = self.mode.or_else(|| build.mode.clone());
        self.toolchain = self.toolchain.or_else(|| build.toolchain.clone());
        self.triplet = self.triplet.or_else(|| build.triplet.clone());
        self.generator = self.generator.or_else(|| build.generator.clone());
        self.arch = self.arch.or_else(|| build.arch.clone());
        self.build_type = self.build_type.or_else(|| build.build_type.clone());
        self.disable_tbb = self.disable_tbb.or(build.disable_tbb);
        self.skip_deps = self.skip_deps.or(build.skip_deps);
        self.output_dir = self.output_dir.or_else(|| build.output_dir.clone());
        self.plugin_dir = self.plugin_dir.or_else(|| build.plugin_dir.clone());
        self.cmake = self.cmake.or_else(|| build.cmake.clone());
        self
    }
}

/// Process-level inputs, captured once so resolution stays deterministic.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Value of `VCPKG_ROOT`, if set and non-empty.
    pub vcpkg_root: Option<PathBuf>,
    /// Directory containing the running executable; the default output directory.
    pub entry_dir: PathBuf,
    /// Base for relative paths and the default repository root.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Read the real process environment.
    pub fn capture() -> ForgeResult<Self> {
        let current_dir = std::env::current_dir()
            .map_err(|e| ForgeError::io("failed to read current directory", ".", e))?;
        let entry_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| current_dir.clone());
        let vcpkg_root = std::env::var_os(VCPKG_ROOT_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Environment {
            vcpkg_root,
            entry_dir,
            current_dir,
        })
    }
}

/// Validate `request` and apply defaults and the `VCPKG_ROOT` fallback.
pub fn resolve(request: &BuildRequest, env: &Environment) -> ForgeResult<Configuration> {
    let mode = match request.mode.as_deref() {
        Some(mode) => mode
            .parse::<PackagingMode>()
            .map_err(|e| ForgeError::validation("mode", e))?,
        None => PackagingMode::default(),
    };

    let build_type = match request.build_type.as_deref() {
        Some(bt) => bt
            .parse::<BuildType>()
            .map_err(|e| ForgeError::validation("build_type", e))?,
        None => BuildType::default(),
    };

    let triplet = non_empty("triplet", request.triplet.as_deref(), DEFAULT_TRIPLET)?;
    let generator = non_empty("generator", request.generator.as_deref(), DEFAULT_GENERATOR)?;
    let arch = non_empty("arch", request.arch.as_deref(), DEFAULT_ARCH)?;

    let base = &env.current_dir;
    let repo_root = request
        .repo_root
        .as_deref()
        .map(|p| absolutize(base, p))
        .unwrap_or_else(|| base.clone());
    let build_dir = repo_root.join(BUILD_DIR_NAME);
    let output_dir = request
        .output_dir
        .as_deref()
        .map(|p| absolutize(base, p))
        .unwrap_or_else(|| env.entry_dir.clone());
    let plugin_dir = request.plugin_dir.as_deref().map(|p| absolutize(base, p));

    let explicit_toolchain = request
        .toolchain
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| absolutize(base, p));
    let toolchain = resolve_toolchain(mode, explicit_toolchain.as_deref(), env.vcpkg_root.as_deref())?;

    let cmake = request
        .cmake
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CMAKE));

    let config = Configuration {
        mode,
        toolchain,
        triplet,
        generator,
        arch,
        build_type,
        disable_tbb: request.disable_tbb.unwrap_or(false),
        skip_deps: request.skip_deps.unwrap_or(false),
        clean: request.clean,
        output_dir,
        plugin_dir,
        repo_root,
        build_dir,
        vcpkg_root: env.vcpkg_root.clone(),
        cmake,
    };
    tracing::debug!("resolved configuration: {:?}", config);
    Ok(config)
}

/// Locate the vcpkg toolchain file.
///
/// An explicit path must exist. Without one, `<vcpkg_root>/scripts/buildsystems/vcpkg.cmake`
/// is used when present. Vcpkg mode cannot run without a toolchain file.
pub fn resolve_toolchain(
    mode: PackagingMode,
    explicit: Option<&Path>,
    vcpkg_root: Option<&Path>,
) -> ForgeResult<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ForgeError::ToolchainNotFound {
                path: path.to_path_buf(),
            });
        }
        return Ok(path.to_path_buf());
    }

    if let Some(root) = vcpkg_root {
        let candidate = vcpkg::toolchain_file(root);
        if candidate.is_file() {
            tracing::debug!("using toolchain from {}: {}", VCPKG_ROOT_ENV, candidate.display());
            return Ok(candidate);
        }
        tracing::debug!("no toolchain file at {}", candidate.display());
    }

    Err(ForgeError::Configuration(format!(
        "{} mode requires the vcpkg toolchain file; pass --toolchain or set {} to a vcpkg installation",
        mode, VCPKG_ROOT_ENV
    )))
}

/// Create every directory the run writes to.
///
/// With `clean` set, an existing build tree is removed first so the configure
/// step starts from an empty directory.
pub fn ensure_directories(config: &Configuration) -> ForgeResult<()> {
    if config.clean && remove_dir_all_if_exists(&config.build_dir)? {
        tracing::info!("removed build tree {}", config.build_dir.display());
    }

    ensure_dir(&config.build_dir)?;
    ensure_dir(&config.output_dir)?;
    if let Some(dir) = config.plugin_deploy_dir() {
        ensure_dir(&dir)?;
    }
    Ok(())
}

fn non_empty(field: &'static str, value: Option<&str>, default: &str) -> ForgeResult<String> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if v.trim().is_empty() => Err(ForgeError::validation(field, "must not be empty")),
        Some(v) => Ok(v.trim().to_string()),
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fake_vcpkg_root, test_env};
    use std::fs;
    use tempfile::TempDir;

    fn request_with_toolchain(tmp: &TempDir) -> BuildRequest {
        let toolchain = tmp.path().join("vcpkg.cmake");
        fs::write(&toolchain, "").unwrap();
        BuildRequest {
            toolchain: Some(toolchain),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let tmp = TempDir::new().unwrap();
        let env = test_env(tmp.path(), None);
        let config = resolve(&request_with_toolchain(&tmp), &env).unwrap();

        assert_eq!(config.mode, PackagingMode::Vcpkg);
        assert_eq!(config.build_type, BuildType::Release);
        assert_eq!(config.triplet, DEFAULT_TRIPLET);
        assert_eq!(config.generator, DEFAULT_GENERATOR);
        assert_eq!(config.arch, DEFAULT_ARCH);
        assert_eq!(config.cmake, PathBuf::from("cmake"));
        assert!(!config.disable_tbb && !config.skip_deps && !config.clean);
        assert_eq!(config.repo_root, env.current_dir);
        assert_eq!(config.build_dir, env.current_dir.join("build-ue-full"));
        assert_eq!(config.output_dir, env.entry_dir);
        assert_eq!(config.plugin_dir, None);
    }

    #[test]
    fn test_relative_paths_become_absolute() {
        let tmp = TempDir::new().unwrap();
        let env = test_env(tmp.path(), None);
        let request = BuildRequest {
            repo_root: Some(PathBuf::from("repo")),
            output_dir: Some(PathBuf::from("out")),
            plugin_dir: Some(PathBuf::from("Plugins/Vdb")),
            ..request_with_toolchain(&tmp)
        };

        let config = resolve(&request, &env).unwrap();
        assert!(config.repo_root.is_absolute());
        assert_eq!(config.repo_root, env.current_dir.join("repo"));
        assert_eq!(config.build_dir, env.current_dir.join("repo").join("build-ue-full"));
        assert_eq!(config.output_dir, env.current_dir.join("out"));
        assert_eq!(config.plugin_dir, Some(env.current_dir.join("Plugins/Vdb")));
    }

    #[test]
    fn test_invalid_mode() {
        let tmp = TempDir::new().unwrap();
        let request = BuildRequest {
            mode: Some("conan".into()),
            ..request_with_toolchain(&tmp)
        };
        let err = resolve(&request, &test_env(tmp.path(), None)).unwrap_err();
        assert!(matches!(err, ForgeError::Validation { field: "mode", .. }));
    }

    #[test]
    fn test_invalid_build_type() {
        let tmp = TempDir::new().unwrap();
        let request = BuildRequest {
            build_type: Some("MinSizeRel".into()),
            ..request_with_toolchain(&tmp)
        };
        let err = resolve(&request, &test_env(tmp.path(), None)).unwrap_err();
        assert!(matches!(err, ForgeError::Validation { field: "build_type", .. }));
    }

    #[test]
    fn test_debug_build_type() {
        let tmp = TempDir::new().unwrap();
        let request = BuildRequest {
            build_type: Some("debug".into()),
            ..request_with_toolchain(&tmp)
        };
        let config = resolve(&request, &test_env(tmp.path(), None)).unwrap();
        assert_eq!(config.build_type, BuildType::Debug);
    }

    #[test]
    fn test_empty_triplet_rejected() {
        let tmp = TempDir::new().unwrap();
        let request = BuildRequest {
            triplet: Some("   ".into()),
            ..request_with_toolchain(&tmp)
        };
        let err = resolve(&request, &test_env(tmp.path(), None)).unwrap_err();
        assert!(matches!(err, ForgeError::Validation { field: "triplet", .. }));
    }

    #[test]
    fn test_explicit_toolchain_missing() {
        let tmp = TempDir::new().unwrap();
        let root = fake_vcpkg_root(tmp.path());
        let request = BuildRequest {
            toolchain: Some(tmp.path().join("missing.cmake")),
            ..Default::default()
        };
        // An explicit path is never silently replaced by the environment fallback.
        let err = resolve(&request, &test_env(tmp.path(), Some(root))).unwrap_err();
        assert!(matches!(err, ForgeError::ToolchainNotFound { .. }));
    }

    #[test]
    fn test_toolchain_from_vcpkg_root() {
        let tmp = TempDir::new().unwrap();
        let root = fake_vcpkg_root(tmp.path());
        let env = test_env(tmp.path(), Some(root.clone()));

        let config = resolve(&BuildRequest::default(), &env).unwrap();
        assert_eq!(config.toolchain, vcpkg::toolchain_file(&root));
        assert_eq!(config.vcpkg_root, Some(root));
    }

    #[test]
    fn test_empty_toolchain_uses_fallback() {
        let tmp = TempDir::new().unwrap();
        let root = fake_vcpkg_root(tmp.path());
        let request = BuildRequest {
            toolchain: Some(PathBuf::new()),
            ..Default::default()
        };
        let config = resolve(&request, &test_env(tmp.path(), Some(root.clone()))).unwrap();
        assert_eq!(config.toolchain, vcpkg::toolchain_file(&root));
    }

    #[test]
    fn test_vcpkg_root_without_toolchain_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("empty-vcpkg");
        fs::create_dir_all(&root).unwrap();

        let err = resolve(&BuildRequest::default(), &test_env(tmp.path(), Some(root))).unwrap_err();
        assert!(matches!(err, ForgeError::Configuration(_)));
        assert!(err.to_string().contains("VCPKG_ROOT"));
    }

    #[test]
    fn test_no_toolchain_anywhere() {
        let tmp = TempDir::new().unwrap();
        let err = resolve(&BuildRequest::default(), &test_env(tmp.path(), None)).unwrap_err();
        assert!(matches!(err, ForgeError::Configuration(_)));
    }

    #[test]
    fn test_request_with_config_precedence() {
        let mut config = Config::default();
        config.build.triplet = Some("x64-windows".into());
        config.build.generator = Some("Ninja".into());
        config.build.skip_deps = Some(true);

        let request = BuildRequest {
            triplet: Some("x64-windows-static".into()),
            ..Default::default()
        }
        .with_config(&config);

        assert_eq!(request.triplet.as_deref(), Some("x64-windows-static"));
        assert_eq!(request.generator.as_deref(), Some("Ninja"));
        assert_eq!(request.skip_deps, Some(true));
    }

    #[test]
    fn test_command_line_false_beats_config_true() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.build.skip_deps = Some(true);
        config.build.disable_tbb = Some(true);

        let request = BuildRequest {
            skip_deps: Some(false),
            ..request_with_toolchain(&tmp)
        }
        .with_config(&config);
        let resolved = resolve(&request, &test_env(tmp.path(), None)).unwrap();

        assert!(!resolved.skip_deps);
        assert!(resolved.disable_tbb);
    }

    #[test]
    fn test_ensure_directories_creates_tree() {
        let tmp = TempDir::new().unwrap();
        let request = BuildRequest {
            output_dir: Some(tmp.path().join("out").join("bin")),
            plugin_dir: Some(tmp.path().join("Plugin")),
            ..request_with_toolchain(&tmp)
        };
        let config = resolve(&request, &test_env(tmp.path(), None)).unwrap();
        assert!(!config.build_dir.exists());

        ensure_directories(&config).unwrap();
        assert!(config.build_dir.is_dir());
        assert!(config.output_dir.is_dir());
        assert!(tmp
            .path()
            .join("Plugin/ThirdParty/VdbBridge/DLL")
            .is_dir());
    }

    #[test]
    fn test_clean_empties_existing_build_tree() {
        let tmp = TempDir::new().unwrap();
        let request = BuildRequest {
            clean: true,
            ..request_with_toolchain(&tmp)
        };
        let config = resolve(&request, &test_env(tmp.path(), None)).unwrap();
        fs::create_dir_all(config.build_dir.join("Release")).unwrap();
        fs::write(config.build_dir.join("CMakeCache.txt"), "stale").unwrap();

        ensure_directories(&config).unwrap();
        assert!(config.build_dir.is_dir());
        assert_eq!(fs::read_dir(&config.build_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_without_clean_keeps_build_tree() {
        let tmp = TempDir::new().unwrap();
        let config = resolve(&request_with_toolchain(&tmp), &test_env(tmp.path(), None)).unwrap();
        fs::create_dir_all(&config.build_dir).unwrap();
        fs::write(config.build_dir.join("CMakeCache.txt"), "cached").unwrap();

        ensure_directories(&config).unwrap();
        assert!(config.build_dir.join("CMakeCache.txt").exists());
    }
}
