//! vdbforge - builds the VdbBridge shared library and deploys it into an Unreal plugin.
//!
//! The pipeline installs the vcpkg ports the library depends on, configures
//! and builds it with CMake, finds the produced DLL and copies it to the
//! output directory and the plugin's `ThirdParty` folder.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for vdbforge unit tests.
///
/// Only compiled for tests. Provides a recording process runner and
/// filesystem fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{BuildType, Configuration, ForgeError, ForgeResult, PackagingMode};
pub use util::Shell;
