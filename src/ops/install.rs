//! Install the vcpkg ports the build depends on.

use crate::core::dependency::install_spec;
use crate::core::{Configuration, ForgeError, ForgeResult};
use crate::util::process::{Invocation, ProcessRunner};
use crate::util::shell::{Shell, Status};
use crate::util::vcpkg;

/// Run `vcpkg install <name>:<triplet> --recurse` for each dependency, in order.
///
/// Does nothing when `skip_deps` is set. Stops at the first failure; ports
/// already installed stay installed. Returns the number of installs run.
pub fn install_dependencies(
    config: &Configuration,
    dependencies: &[&str],
    runner: &mut dyn ProcessRunner,
    shell: &Shell,
) -> ForgeResult<usize> {
    if config.skip_deps {
        shell.status(Status::Skipped, "dependency installation (--skip-deps)");
        return Ok(0);
    }

    let vcpkg = vcpkg::resolve_executable(config.vcpkg_root.as_deref());
    tracing::debug!("using vcpkg at {}", vcpkg.display());

    for name in dependencies {
        let spec = install_spec(name, &config.triplet);
        shell.status(Status::Installing, &spec);

        let invocation = Invocation::new(&vcpkg, ["install", spec.as_str(), "--recurse"], &config.repo_root)?;
        runner.run(&invocation).map_err(|e| ForgeError::Install {
            name: name.to_string(),
            source: Box::new(e),
        })?;
    }

    Ok(dependencies.len())
}
