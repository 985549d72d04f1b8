//! Error types for the build pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the library.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Error raised by any pipeline stage.
///
/// Every variant is fatal to the run. Stage wrappers (`Install`, `Configure`,
/// `Build`) keep the underlying process error as their source so the printed
/// chain names both the stage and the failing executable.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("invalid value for `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("{0}")]
    Configuration(String),

    #[error("toolchain file not found: {}", path.display())]
    ToolchainNotFound { path: PathBuf },

    #[error("`{tool}` not found; install it or make sure it is on PATH")]
    ToolNotFound { tool: String },

    #[error("internal error: {0}")]
    Internal(String),

    #[error("failed to launch `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with code {code}")]
    ProcessFailed { program: String, code: i32 },

    #[error("failed to install dependency `{name}`")]
    Install {
        name: String,
        #[source]
        source: Box<ForgeError>,
    },

    #[error("configure step failed")]
    Configure(#[source] Box<ForgeError>),

    #[error("build step failed")]
    Build(#[source] Box<ForgeError>),

    #[error("`{artifact}` not found in build directory {}", build_dir.display())]
    ArtifactNotFound {
        artifact: String,
        build_dir: PathBuf,
    },

    #[error("failed to copy {} to {}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl ForgeError {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ForgeError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Wrap a filesystem error with the action and path that caused it.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ForgeError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// The exit code of the failing child process, looking through stage wrappers.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ForgeError::ProcessFailed { code, .. } => Some(*code),
            ForgeError::Install { source, .. } => source.exit_code(),
            ForgeError::Configure(inner) | ForgeError::Build(inner) => inner.exit_code(),
            _ => None,
        }
    }
}
