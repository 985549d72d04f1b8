//! Test utilities and mocks for vdbforge unit tests.
//!
//! [`RecordingRunner`] stands in for real process execution: it records every
//! [`Invocation`] and can be told to fail a given call. Fixture helpers build
//! configurations and fake vcpkg installations inside temporary directories.

use std::path::{Path, PathBuf};

use crate::core::settings::{
    BUILD_DIR_NAME, DEFAULT_ARCH, DEFAULT_GENERATOR, DEFAULT_TRIPLET, TOOLCHAIN_SUBPATH,
};
use crate::core::{BuildType, Configuration, ForgeError, ForgeResult, PackagingMode};
use crate::ops::resolve::Environment;
use crate::util::process::{Invocation, ProcessRunner};

type Effect = Box<dyn FnMut(&Invocation)>;

/// Mock process runner that records invocations instead of launching them.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Vec<Invocation>,
    /// (call index, exit code) to fail with.
    failure: Option<(usize, i32)>,
    effect: Option<Effect>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `index`-th call (0-based) exit with `code`.
    pub fn fail_on_call(&mut self, index: usize, code: i32) -> &mut Self {
        self.failure = Some((index, code));
        self
    }

    /// Run `effect` for every successful call, e.g. to create build outputs.
    pub fn with_effect(mut self, effect: impl FnMut(&Invocation) + 'static) -> Self {
        self.effect = Some(Box::new(effect));
        self
    }

    /// Get all invocations that were run.
    pub fn calls(&self) -> &[Invocation] {
        &self.calls
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> ForgeResult<()> {
        let index = self.calls.len();
        self.calls.push(invocation.clone());

        if let Some((fail_at, code)) = self.failure {
            if fail_at == index {
                return Err(ForgeError::ProcessFailed {
                    program: invocation.program_name(),
                    code,
                });
            }
        }

        if let Some(effect) = self.effect.as_mut() {
            effect(invocation);
        }
        Ok(())
    }
}

/// Create `<base>/vcpkg` with a bootstrap marker and toolchain file.
pub fn fake_vcpkg_root(base: &Path) -> PathBuf {
    let root = base.join("vcpkg");
    let toolchain = root.join(TOOLCHAIN_SUBPATH);
    std::fs::create_dir_all(toolchain.parent().unwrap()).unwrap();
    std::fs::write(&toolchain, "# vcpkg toolchain\n").unwrap();
    std::fs::write(root.join(".vcpkg-root"), "").unwrap();
    root
}

/// Environment rooted at `base`; the entry directory is `<base>/entry`.
pub fn test_env(base: &Path, vcpkg_root: Option<PathBuf>) -> Environment {
    Environment {
        vcpkg_root,
        entry_dir: base.join("entry"),
        current_dir: base.to_path_buf(),
    }
}

/// A resolved Release configuration under `base`. Only the toolchain file is created.
pub fn test_config(base: &Path) -> Configuration {
    let toolchain = base.join("vcpkg.cmake");
    std::fs::write(&toolchain, "").unwrap();
    let repo_root = base.join("repo");

    Configuration {
        mode: PackagingMode::Vcpkg,
        toolchain,
        triplet: DEFAULT_TRIPLET.to_string(),
        generator: DEFAULT_GENERATOR.to_string(),
        arch: DEFAULT_ARCH.to_string(),
        build_type: BuildType::Release,
        disable_tbb: false,
        skip_deps: false,
        clean: false,
        output_dir: base.join("out"),
        plugin_dir: None,
        build_dir: repo_root.join(BUILD_DIR_NAME),
        repo_root,
        vcpkg_root: None,
        cmake: PathBuf::from("cmake"),
    }
}

/// Split a command line the way a POSIX shell does for double-quoted words.
///
/// Handles whitespace separation, `"..."` grouping and `\"` inside quotes,
/// which is everything `join_command_line` produces for backslash-free input.
pub fn split_command_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            '\\' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command_line() {
        assert_eq!(
            split_command_line(r#"-G "Visual Studio 17" "a \"b\"" x"#),
            vec!["-G", "Visual Studio 17", "a \"b\"", "x"]
        );
    }

    #[test]
    fn test_recording_runner_failure() {
        let mut runner = RecordingRunner::new();
        runner.fail_on_call(1, 7);
        let inv = Invocation::new("cmake", ["--version"], ".").unwrap();
        assert!(runner.run(&inv).is_ok());
        let err = runner.run(&inv).unwrap_err();
        assert_eq!(err.exit_code(), Some(7));
        assert_eq!(runner.calls().len(), 2);
    }
}
