//! Core data types: resolved settings, the dependency list and errors.

pub mod dependency;
pub mod error;
pub mod settings;

pub use dependency::DEPENDENCIES;
pub use error::{ForgeError, ForgeResult};
pub use settings::{BuildType, Configuration, PackagingMode};
