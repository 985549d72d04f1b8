//! The `vdbforge build` pipeline.
//!
//! Stages run strictly in order and the first error ends the run:
//!
//! ```text
//! ensure directories -> vcpkg install (optional) -> cmake configure
//!     -> cmake --build -> locate artifact -> deploy
//! ```
//!
//! Nothing is cleaned up on failure; rerunning (optionally with `--clean`)
//! is the recovery path.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::{Configuration, ForgeResult, DEPENDENCIES};
use crate::ops::compile::compile;
use crate::ops::configure::configure;
use crate::ops::deploy::deploy;
use crate::ops::install::install_dependencies;
use crate::ops::locate::{expected_artifact_path, locate_artifact};
use crate::ops::resolve::ensure_directories;
use crate::util::process::{Invocation, PlanRunner, ProcessRunner};
use crate::util::shell::{Shell, Status};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Number of `vcpkg install` calls made.
    pub installed: usize,
    /// The artifact as found in the build tree.
    pub artifact: PathBuf,
    /// Copies made, primary output first.
    pub deployed: Vec<PathBuf>,
}

/// Run the whole pipeline for `config`.
pub fn forge_build(
    config: &Configuration,
    runner: &mut dyn ProcessRunner,
    shell: &Shell,
) -> ForgeResult<BuildOutcome> {
    ensure_directories(config)?;

    let installed = install_dependencies(config, DEPENDENCIES, runner, shell)?;
    configure(config, runner, shell)?;
    compile(config, runner, shell)?;

    shell.status(Status::Locating, config.build_dir.display());
    let artifact = locate_artifact(&config.build_dir, config.build_type)?;
    let deployed = deploy(
        &artifact,
        &config.output_dir,
        config.plugin_dir.as_deref(),
        shell,
    )?;

    Ok(BuildOutcome {
        installed,
        artifact,
        deployed,
    })
}

/// Machine-readable description of what `forge_build` would do.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub configuration: Configuration,
    /// External commands, in execution order.
    pub invocations: Vec<Invocation>,
    /// Where the artifact is looked for first.
    pub expected_artifact: PathBuf,
    /// Directories the artifact is copied into.
    pub destinations: Vec<PathBuf>,
}

/// Compute the plan without launching processes or touching the filesystem.
pub fn plan(config: &Configuration) -> ForgeResult<BuildPlan> {
    let shell = Shell::quiet();
    let mut runner = PlanRunner::new();

    install_dependencies(config, DEPENDENCIES, &mut runner, &shell)?;
    configure(config, &mut runner, &shell)?;
    compile(config, &mut runner, &shell)?;

    let mut destinations = vec![config.output_dir.clone()];
    destinations.extend(config.plugin_deploy_dir());

    Ok(BuildPlan {
        configuration: config.clone(),
        invocations: runner.into_invocations(),
        expected_artifact: expected_artifact_path(&config.build_dir, config.build_type),
        destinations,
    })
}
