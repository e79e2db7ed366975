//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: field error (unsupported mode, bad raster size)
//! - 11: I/O error (file read/write, snapshot)
//! - 12: input error (bad color, unreadable seed file)
//! - 13: serialization error

use dot_field_core::FieldError;
use thiserror::Error;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Unsupported mode or bad raster size.
    #[error(transparent)]
    Field(FieldError),
    /// File read/write or snapshot failure.
    #[error("{0}")]
    Io(String),
    /// Bad color, malformed seed file.
    #[error("{0}")]
    Input(String),
    /// JSON output failure.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Field(_) => 10,
            Self::Io(_) => 11,
            Self::Input(_) => 12,
            Self::Serialization(_) => 13,
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => Self::Io(msg),
            FieldError::InvalidColor(msg) => Self::Input(format!("invalid color: {msg}")),
            other => Self::Field(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
