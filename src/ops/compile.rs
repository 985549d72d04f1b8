//! CMake build step.

use crate::core::settings::BUILD_TARGET;
use crate::core::{Configuration, ForgeError, ForgeResult};
use crate::util::process::{Invocation, ProcessRunner};
use crate::util::shell::{Shell, Status};

/// `cmake --build <build> --target VdbBridge --config <build type>`, run from the repository root.
pub fn build_invocation(config: &Configuration) -> ForgeResult<Invocation> {
    let build_dir = config.build_dir.display().to_string();
    Invocation::new(
        &config.cmake,
        [
            "--build",
            build_dir.as_str(),
            "--target",
            BUILD_TARGET,
            "--config",
            config.build_type.as_str(),
        ],
        &config.repo_root,
    )
}

/// Build the single artifact-producing target.
pub fn compile(
    config: &Configuration,
    runner: &mut dyn ProcessRunner,
    shell: &Shell,
) -> ForgeResult<()> {
    shell.status(
        Status::Building,
        format!("{} ({})", BUILD_TARGET, config.build_type),
    );

    let invocation = build_invocation(config)?;
    runner
        .run(&invocation)
        .map_err(|e| ForgeError::Build(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuildType;
    use crate::test_support::{test_config, RecordingRunner};
    use tempfile::TempDir;

    #[test]
    fn test_build_invocation() {
        let tmp = TempDir::new().unwrap();
        let mut config = test_config(tmp.path());
        config.build_type = BuildType::Debug;

        let inv = build_invocation(&config).unwrap();
        assert_eq!(
            inv.args(),
            [
                "--build".to_string(),
                config.build_dir.display().to_string(),
                "--target".to_string(),
                "VdbBridge".to_string(),
                "--config".to_string(),
                "Debug".to_string(),
            ]
        );
        assert_eq!(inv.cwd(), config.repo_root);
    }

    #[test]
    fn test_failure_is_build_error() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(tmp.path());
        let mut runner = RecordingRunner::new();
        runner.fail_on_call(0, 1);

        let err = compile(&config, &mut runner, &Shell::quiet()).unwrap_err();
        assert!(matches!(err, ForgeError::Build(_)));
        assert_eq!(runner.calls().len(), 1);
    }
}
