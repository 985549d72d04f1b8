//! High-level operations: the build pipeline stages and the commands built on them.

pub mod compile;
pub mod configure;
pub mod deploy;
pub mod doctor;
pub mod forge_build;
pub mod forge_clean;
pub mod install;
pub mod locate;
pub mod resolve;

pub use forge_build::{forge_build, plan, BuildOutcome, BuildPlan};
pub use resolve::{ensure_directories, resolve, BuildRequest, Environment};
