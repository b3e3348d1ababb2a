//! Temporary directory error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Temporary directory allocation errors
#[derive(Error, Debug)]
pub enum TempDirError {
    /// The filesystem refused to create a directory
    #[error("failed to create directory {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Every attempted name was already taken
    #[error(
        "no free directory name under {} with prefix `{prefix}` after {attempts} attempts",
        base_dir.display()
    )]
    Exhausted {
        base_dir: PathBuf,
        prefix: String,
        attempts: usize,
    },

    /// The directory was created but the confirmation line could not be written
    #[error("created {} but failed to report it", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TempDirError {
    /// Directory that exists on disk despite the error, if any
    pub fn created_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Report { path, .. } => Some(path),
            Self::Create { .. } | Self::Exhausted { .. } => None,
        }
    }
}

/// Alias for Result<T, TempDirError>
pub type Result<T> = std::result::Result<T, TempDirError>;
