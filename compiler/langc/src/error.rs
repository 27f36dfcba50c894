//! Host-level failures. Script errors are values inside the interpreter and
//! never reach this type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot find file '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied reading '{}'", .0.display())]
    PermissionDenied(PathBuf),

    #[error("'{}' contains invalid UTF-8 data", .0.display())]
    InvalidUtf8(PathBuf),

    #[error("error reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("missing file path")]
    MissingPath,

    #[error("invalid value for {option}: '{value}'")]
    InvalidOption { option: &'static str, value: String },

    #[error("unknown option '{0}'")]
    UnknownOption(String),
}

impl CliError {
    /// Classify an I/O error from reading `path`.
    pub fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => CliError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => CliError::PermissionDenied(path),
            std::io::ErrorKind::InvalidData => CliError::InvalidUtf8(path),
            _ => CliError::Io {
                path,
                source: error,
            },
        }
    }
}
