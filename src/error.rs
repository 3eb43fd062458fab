use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the emoji-chaos library.
///
/// The text transformation itself never fails; these errors come from the
/// file, confirmation and configuration layers around it.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// IO error with context about the file path.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The file to process does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// No backup exists for the file being restored.
    #[error("Backup not found: {path}")]
    BackupNotFound {
        /// Expected backup location
        path: PathBuf,
    },

    /// Invalid UTF-8 encountered in file.
    #[error("Invalid UTF-8 encoding in file '{path}'. File may be binary or use unsupported encoding.")]
    InvalidUtf8 {
        /// Path to file with encoding issues
        path: PathBuf,
    },

    /// Chaos level outside of 1..=10.
    #[error("Invalid chaos level {level}: must be between 1 and 10")]
    InvalidChaosLevel {
        /// The rejected level
        level: u8,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },

    /// JSON serialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },
}

impl Error {
    /// Creates an IO error with path context.
    ///
    /// `NotFound` is mapped to [`Error::FileNotFound`] so callers can tell a
    /// missing file apart from other IO failures.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::FileNotFound { path };
        }
        Self::Io {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a file not found error.
    #[must_use]
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a backup not found error.
    #[must_use]
    pub fn backup_not_found(path: impl Into<PathBuf>) -> Self {
        Self::BackupNotFound { path: path.into() }
    }

    /// Creates an invalid UTF-8 error.
    #[must_use]
    pub fn invalid_utf8(path: impl Into<PathBuf>) -> Self {
        Self::InvalidUtf8 { path: path.into() }
    }

    /// Creates an invalid chaos level error.
    #[must_use]
    pub const fn invalid_chaos_level(level: u8) -> Self {
        Self::InvalidChaosLevel { level }
    }

    /// Returns true if the error means a file or backup is missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::BackupNotFound { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}
