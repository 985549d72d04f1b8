//! Shared utilities

pub mod config;
pub mod fs;
pub mod process;
pub mod shell;
pub mod vcpkg;

pub use config::Config;
pub use process::{Invocation, PlanRunner, ProcessRunner, SystemRunner};
pub use shell::{Shell, Status};
