//! Environment health checks.
//!
//! `vdbforge doctor` verifies that the external tools the pipeline needs can
//! be found before a long build is started:
//!
//! - CMake (required)
//! - vcpkg (required unless dependencies are installed some other way)
//! - the vcpkg CMake toolchain file (required)

use std::path::PathBuf;

use crate::core::settings::{DEFAULT_CMAKE, VCPKG_ROOT_ENV};
use crate::core::PackagingMode;
use crate::ops::resolve::{resolve_toolchain, Environment};
use crate::util::process::find_executable;
use crate::util::vcpkg;

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool or file (if found)
    pub path: Option<PathBuf>,

    /// Whether this check is required or optional
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            required: true,
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Whether every required check passed.
    pub fn is_healthy(&self) -> bool {
        self.checks.iter().all(|c| c.passed || !c.required)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed && c.required)
    }
}

/// Inputs that influence the checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorOptions {
    pub cmake: Option<PathBuf>,
    pub toolchain: Option<PathBuf>,
}

/// Run all checks.
pub fn run_doctor(env: &Environment, opts: &DoctorOptions) -> DoctorReport {
    DoctorReport {
        checks: vec![
            check_cmake(opts),
            check_vcpkg_root(env),
            check_vcpkg(env),
            check_toolchain(env, opts),
        ],
    }
}

fn check_cmake(opts: &DoctorOptions) -> CheckResult {
    let cmake = opts
        .cmake
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CMAKE));
    match find_executable(&cmake) {
        Some(path) => CheckResult::pass("cmake", "found").with_path(path),
        None => CheckResult::fail(
            "cmake",
            format!("`{}` not found; install CMake and add it to PATH", cmake.display()),
        ),
    }
}

fn check_vcpkg_root(env: &Environment) -> CheckResult {
    match &env.vcpkg_root {
        Some(root) if vcpkg::is_valid_vcpkg_root(root) => {
            CheckResult::pass(VCPKG_ROOT_ENV, "set").with_path(root.clone())
        }
        Some(root) => CheckResult::fail(
            VCPKG_ROOT_ENV,
            format!("{} does not look like a vcpkg installation", root.display()),
        )
        .optional(),
        None => match vcpkg::detect_from_path() {
            Some(root) => CheckResult::fail(VCPKG_ROOT_ENV, "not set; vcpkg found in PATH")
                .optional()
                .with_path(root),
            None => CheckResult::fail(VCPKG_ROOT_ENV, "not set").optional(),
        },
    }
}

fn check_vcpkg(env: &Environment) -> CheckResult {
    let exe = vcpkg::resolve_executable(env.vcpkg_root.as_deref());
    if exe.is_absolute() {
        return CheckResult::pass("vcpkg", "found under VCPKG_ROOT").with_path(exe);
    }
    match find_executable(&exe) {
        Some(path) => CheckResult::pass("vcpkg", "found in PATH").with_path(path),
        None => CheckResult::fail(
            "vcpkg",
            "not found; set VCPKG_ROOT or add vcpkg to PATH (not needed with --skip-deps)",
        ),
    }
}

fn check_toolchain(env: &Environment, opts: &DoctorOptions) -> CheckResult {
    let explicit = opts
        .toolchain
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| env.current_dir.join(p));
    match resolve_toolchain(
        PackagingMode::default(),
        explicit.as_deref(),
        env.vcpkg_root.as_deref(),
    ) {
        Ok(path) => CheckResult::pass("toolchain", "found").with_path(path),
        Err(e) => CheckResult::fail("toolchain", e.to_string()),
    }
}
