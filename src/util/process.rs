//! Subprocess execution utilities.
//!
//! Every external tool (vcpkg, cmake) is launched through an [`Invocation`]:
//! the argument list is sanitized and quoted once, and a [`ProcessRunner`]
//! decides what to do with it. [`SystemRunner`] really launches it,
//! [`PlanRunner`] only records it.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use crate::core::{ForgeError, ForgeResult};

/// One external program call: executable, sanitized arguments, working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    cwd: PathBuf,
}

impl Invocation {
    /// Create an invocation, dropping empty and whitespace-only arguments.
    ///
    /// Fails with [`ForgeError::Internal`] when nothing is left, since every
    /// caller passes at least one real argument.
    pub fn new<I, S>(program: impl AsRef<Path>, args: I, cwd: impl AsRef<Path>) -> ForgeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = program.as_ref().to_path_buf();
        let args = sanitize_args(args);
        if args.is_empty() {
            return Err(ForgeError::Internal(format!(
                "no arguments left for `{}` after dropping empty values",
                program.display()
            )));
        }

        Ok(Invocation {
            program,
            args,
            cwd: cwd.as_ref().to_path_buf(),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Program name as shown in errors (`cmake`, `vcpkg.exe`).
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Quoted arguments joined into one command line.
    pub fn command_line(&self) -> String {
        join_command_line(&self.args)
    }

    /// Display the full command for logs and error messages.
    pub fn display_command(&self) -> String {
        format!("{} {}", self.program.display(), self.command_line())
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;

            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.raw_arg(self.command_line());
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        #[cfg(not(windows))]
        cmd.args(&self.args);

        cmd.current_dir(&self.cwd);
        cmd
    }
}

/// Drop arguments that are empty or only whitespace. Kept values are not trimmed.
pub fn sanitize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .map(|s| s.as_ref().to_string_lossy().into_owned())
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Quote an argument containing whitespace or `"`; embedded quotes become `\"`.
pub fn quote_arg(arg: &str) -> Cow<'_, str> {
    if !arg.chars().any(|c| c.is_whitespace() || c == '"') {
        return Cow::Borrowed(arg);
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if c == '"' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Quote each argument and join with single spaces.
pub fn join_command_line<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| quote_arg(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Something that can carry out an [`Invocation`].
pub trait ProcessRunner {
    /// Run to completion. A non-zero exit is an error.
    fn run(&mut self, invocation: &Invocation) -> ForgeResult<()>;
}

/// Launches processes for real, blocking until each one exits.
///
/// Child output goes straight to the terminal. There is no timeout.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> ForgeResult<()> {
        tracing::debug!(
            "running `{}` in {}",
            invocation.display_command(),
            invocation.cwd().display()
        );

        let status = invocation
            .build_command()
            .status()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ForgeError::ToolNotFound {
                    tool: invocation.program().display().to_string(),
                },
                _ => ForgeError::Spawn {
                    program: invocation.program_name(),
                    source: e,
                },
            })?;

        if !status.success() {
            // Killed by a signal: no exit code.
            let code = status.code().unwrap_or(-1);
            return Err(ForgeError::ProcessFailed {
                program: invocation.program_name(),
                code,
            });
        }

        Ok(())
    }
}

/// Records invocations without launching anything.
#[derive(Debug, Default)]
pub struct PlanRunner {
    invocations: Vec<Invocation>,
}

impl PlanRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_invocations(self) -> Vec<Invocation> {
        self.invocations
    }
}

impl ProcessRunner for PlanRunner {
    fn run(&mut self, invocation: &Invocation) -> ForgeResult<()> {
        self.invocations.push(invocation.clone());
        Ok(())
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    which::which(name).ok()
}
