//! `vdbforge build` command

use anyhow::{Context, Result};

use crate::cli::BuildArgs;
use vdbforge::ops::{forge_build, plan, resolve, BuildRequest, Environment};
use vdbforge::util::config::{global_config_path, load_config, project_config_path};
use vdbforge::util::{Shell, Status, SystemRunner};

pub fn execute(args: BuildArgs, shell: &Shell) -> Result<()> {
    let env = Environment::capture()?;

    let repo_root = args
        .repo_root
        .as_deref()
        .map(|p| env.current_dir.join(p))
        .unwrap_or_else(|| env.current_dir.clone());
    let config_file = load_config(
        global_config_path().as_deref(),
        &project_config_path(&repo_root),
    );

    let disable_tbb = args.disable_tbb();
    let skip_deps = args.skip_deps();
    let request = BuildRequest {
        mode: args.mode,
        toolchain: args.toolchain,
        triplet: args.triplet,
        generator: args.generator,
        arch: args.arch,
        build_type: args.build_type,
        disable_tbb,
        skip_deps,
        clean: args.clean,
        output_dir: args.output_dir,
        plugin_dir: args.plugin_dir,
        repo_root: Some(repo_root),
        cmake: args.cmake,
    }
    .with_config(&config_file);

    let config = resolve(&request, &env)?;

    if args.plan {
        let plan = plan(&config)?;
        let json = serde_json::to_string_pretty(&plan).context("failed to serialize build plan")?;
        println!("{}", json);
        return Ok(());
    }

    let outcome = forge_build(&config, &mut SystemRunner, shell)?;

    shell.status(
        Status::Finished,
        format!(
            "{} build of {}",
            config.build_type,
            outcome.artifact.display()
        ),
    );
    for path in &outcome.deployed {
        println!("{}", path.display());
    }

    Ok(())
}
