//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vdbforge::util::shell::ColorChoice;

/// vdbforge - build VdbBridge with vcpkg + CMake and deploy it into an Unreal plugin
#[derive(Parser)]
#[command(name = "vdbforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install dependencies, configure, build and deploy VdbBridge
    Build(BuildArgs),

    /// Remove the build tree
    Clean(CleanArgs),

    /// Check that cmake, vcpkg and the toolchain file can be found
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Packaging mode (only `vcpkg` is supported)
    #[arg(long)]
    pub mode: Option<String>,

    /// Path to the vcpkg CMake toolchain file [default: $VCPKG_ROOT/scripts/buildsystems/vcpkg.cmake]
    #[arg(long)]
    pub toolchain: Option<PathBuf>,

    /// vcpkg target triplet [default: x64-windows-static-md]
    #[arg(long)]
    pub triplet: Option<String>,

    /// CMake generator [default: Visual Studio 17 2022]
    #[arg(short = 'G', long)]
    pub generator: Option<String>,

    /// CMake target platform [default: x64]
    #[arg(short = 'A', long)]
    pub arch: Option<String>,

    /// Release or Debug [default: Release]
    #[arg(long)]
    pub build_type: Option<String>,

    /// Keep CMake from finding TBB
    #[arg(long, overrides_with = "no_disable_tbb")]
    pub disable_tbb: bool,

    /// Let CMake find TBB, overriding `disable_tbb` from config files
    #[arg(long, overrides_with = "disable_tbb")]
    pub no_disable_tbb: bool,

    /// Remove the build tree before configuring
    #[arg(long)]
    pub clean: bool,

    /// Directory receiving the built DLL [default: directory of this executable]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Unreal plugin directory; the DLL is also copied to ThirdParty/VdbBridge/DLL inside it
    #[arg(long)]
    pub plugin_dir: Option<PathBuf>,

    /// Skip `vcpkg install`
    #[arg(long, overrides_with = "no_skip_deps")]
    pub skip_deps: bool,

    /// Run `vcpkg install`, overriding `skip_deps` from config files
    #[arg(long, overrides_with = "skip_deps")]
    pub no_skip_deps: bool,

    /// Repository root containing CMakeLists.txt [default: current directory]
    #[arg(long)]
    pub repo_root: Option<PathBuf>,

    /// CMake executable
    #[arg(long)]
    pub cmake: Option<PathBuf>,

    /// Print the build plan as JSON and exit without running anything
    #[arg(long)]
    pub plan: bool,
}

impl BuildArgs {
    pub fn disable_tbb(&self) -> Option<bool> {
        resolve_flag(self.disable_tbb, self.no_disable_tbb)
    }

    pub fn skip_deps(&self) -> Option<bool> {
        resolve_flag(self.skip_deps, self.no_skip_deps)
    }
}

/// `Some` only when the flag or its `--no-` form was given.
fn resolve_flag(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[derive(Args)]
pub struct CleanArgs {
    /// Repository root [default: current directory]
    #[arg(long)]
    pub repo_root: Option<PathBuf>,
}

#[derive(Args)]
pub struct DoctorArgs {
    /// Toolchain file to check instead of the VCPKG_ROOT default
    #[arg(long)]
    pub toolchain: Option<PathBuf>,

    /// CMake executable to check
    #[arg(long)]
    pub cmake: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
