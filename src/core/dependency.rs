//! Third-party ports required by the VdbBridge build.

/// vcpkg ports installed before configuring, in install order.
pub const DEPENDENCIES: &[&str] = &["zlib", "blosc", "boost-iostreams", "tbb", "openvdb"];

/// Triplet-qualified package spec passed to `vcpkg install` (e.g. `zlib:x64-windows-static-md`).
pub fn install_spec(name: &str, triplet: &str) -> String {
    format!("{}:{}", name, triplet)
}
