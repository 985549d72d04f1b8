//! CMake configure step.

use crate::core::{Configuration, ForgeError, ForgeResult, PackagingMode};
use crate::util::process::{Invocation, ProcessRunner};
use crate::util::shell::{Shell, Status};

/// Compiler flags for optimized builds: `/O2`, whole-program analysis, function-level linking.
pub const RELEASE_COMPILE_FLAGS: &str = "/O2 /GL /Gy";

/// Linker flags for optimized builds: link-time codegen, drop unreferenced code, fold identical COMDATs.
pub const RELEASE_LINK_FLAGS: &str = "/LTCG /OPT:REF /OPT:ICF";

/// Dynamic CRT for every configuration (`/MD`, `/MDd` in Debug).
const MSVC_RUNTIME: &str = "MultiThreaded$<$<CONFIG:Debug>:Debug>DLL";

/// OpenVDB options for a core-only static build.
const OPENVDB_CORE_ONLY: &[&str] = &[
    "-DOPENVDB_CORE_SHARED=OFF",
    "-DBLOSC_USE_STATIC_LIBS=OFF",
    "-DOPENVDB_BUILD_BINARIES=OFF",
    "-DOPENVDB_BUILD_UNITTESTS=OFF",
    "-DOPENVDB_BUILD_PYTHON_MODULE=OFF",
    "-DOPENVDB_BUILD_DOCS=OFF",
];

/// All `-G`/`-A`/`-D` options for the configure step.
pub fn configure_flags(config: &Configuration) -> Vec<String> {
    let mut flags = vec![
        "-G".to_string(),
        config.generator.clone(),
        "-A".to_string(),
        config.arch.clone(),
        format!("-DCMAKE_BUILD_TYPE={}", config.build_type),
        format!("-DCMAKE_MSVC_RUNTIME_LIBRARY={}", MSVC_RUNTIME),
        "-DBUILD_SHARED_LIBS=OFF".to_string(),
    ];
    flags.extend(OPENVDB_CORE_ONLY.iter().map(|s| s.to_string()));

    if config.build_type.is_optimized() {
        flags.push("-DCMAKE_INTERPROCEDURAL_OPTIMIZATION=ON".to_string());
        flags.push(format!("-DCMAKE_C_FLAGS_RELEASE={}", RELEASE_COMPILE_FLAGS));
        flags.push(format!("-DCMAKE_CXX_FLAGS_RELEASE={}", RELEASE_COMPILE_FLAGS));
        flags.push(format!("-DCMAKE_SHARED_LINKER_FLAGS_RELEASE={}", RELEASE_LINK_FLAGS));
    }

    if config.disable_tbb {
        flags.push("-DCMAKE_DISABLE_FIND_PACKAGE_TBB=ON".to_string());
    }

    match config.mode {
        PackagingMode::Vcpkg => {
            flags.push("-DUSE_VCPKG=ON".to_string());
            flags.push(format!("-DCMAKE_TOOLCHAIN_FILE={}", config.toolchain.display()));
            flags.push(format!("-DVCPKG_TARGET_TRIPLET={}", config.triplet));
        }
    }

    flags
}

/// `cmake -S <repo> -B <build> <flags...>`, run from the repository root.
pub fn configure_invocation(config: &Configuration) -> ForgeResult<Invocation> {
    let mut args = vec![
        "-S".to_string(),
        config.repo_root.display().to_string(),
        "-B".to_string(),
        config.build_dir.display().to_string(),
    ];
    args.extend(configure_flags(config));
    Invocation::new(&config.cmake, args, &config.repo_root)
}

/// Run the configure step.
pub fn configure(
    config: &Configuration,
    runner: &mut dyn ProcessRunner,
    shell: &Shell,
) -> ForgeResult<()> {
    shell.status(
        Status::Configuring,
        format!("{} ({}, {})", config.build_dir.display(), config.build_type, config.generator),
    );

    let invocation = configure_invocation(config)?;
    runner
        .run(&invocation)
        .map_err(|e| ForgeError::Configure(Box::new(e)))
}
