//! `vdbforge clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use vdbforge::ops::forge_clean::clean;
use vdbforge::ops::Environment;
use vdbforge::util::{Shell, Status};

pub fn execute(args: CleanArgs, shell: &Shell) -> Result<()> {
    let env = Environment::capture()?;
    let repo_root = args
        .repo_root
        .as_deref()
        .map(|p| env.current_dir.join(p))
        .unwrap_or(env.current_dir);

    match clean(&repo_root)? {
        Some(removed) => shell.status(Status::Removed, removed.display()),
        None => shell.note("nothing to clean"),
    }

    Ok(())
}
