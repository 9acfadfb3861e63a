//! Error types for trajview.
//!
//! This module provides error handling following the thiserror pattern.
//! Error types are designed to be informative, actionable, and suitable for both
//! programmatic handling and user-facing display.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for trajview operations.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// A trajectory folder name does not follow the `traj<N>` convention.
    ///
    /// Fatal to store construction: skipping the folder would shift every
    /// later group to the wrong index.
    #[error("Malformed trajectory folder name '{name}' (expected traj<N>)")]
    MalformedName {
        /// The offending folder name.
        name: String,
    },

    /// An evaluation file could not be read or decoded.
    #[error("Invalid evaluation file {path}: {message}")]
    Format {
        /// Path to the evaluation file.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
        /// Underlying serde_json error, if available.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// Path to the missing directory.
        path: PathBuf,
    },

    /// Permission denied when accessing a file or directory.
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path where access was denied.
        path: PathBuf,
    },

    /// Requested trajectory group does not exist.
    #[error("Trajectory group not found: {selector}")]
    GroupNotFound {
        /// Index or name that was requested.
        selector: String,
    },

    /// Export error.
    #[error("Export failed: {message}")]
    ExportError {
        /// Human-readable error message.
        message: String,
        /// Underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Human-readable error message.
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    IoError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {context}")]
    SerializationError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
    },

    /// TUI error.
    #[error("TUI error: {message}")]
    TuiError {
        /// Human-readable error message.
        message: String,
    },

    /// Unsupported operation or feature.
    #[error("Unsupported: {feature}")]
    Unsupported {
        /// Name of the unsupported feature.
        feature: String,
    },

    /// Invalid argument.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the invalid argument.
        name: String,
        /// Reason why the argument is invalid.
        reason: String,
    },

    /// Interrupted operation.
    #[error("Operation interrupted")]
    Interrupted,
}

impl ViewerError {
    /// Create a new malformed-name error.
    #[must_use]
    pub fn malformed_name(name: impl Into<String>) -> Self {
        Self::MalformedName { name: name.into() }
    }

    /// Create a new evaluation format error.
    #[must_use]
    pub fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a new evaluation format error with source.
    #[must_use]
    pub fn format_with_source(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            source,
        }
    }

    /// Classify an I/O failure on `path` into the most specific variant.
    #[must_use]
    pub fn from_io_at(path: impl Into<PathBuf>, context: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::io(context, source),
        }
    }

    /// Create a new export error.
    #[must_use]
    pub fn export(message: impl Into<String>) -> Self {
        Self::ExportError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new unsupported error.
    #[must_use]
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }

    /// Get the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedName { .. } | Self::Format { .. } => exit_codes::EXIT_DATA_ERROR,
            Self::FileNotFound { .. }
            | Self::DirectoryNotFound { .. }
            | Self::GroupNotFound { .. } => exit_codes::EXIT_FILE_NOT_FOUND,
            Self::PermissionDenied { .. } => exit_codes::EXIT_PERMISSION_DENIED,
            Self::ConfigError { .. } | Self::InvalidConfig { .. } => exit_codes::EXIT_CONFIG_ERROR,
            Self::ExportError { .. } => exit_codes::EXIT_EXPORT_ERROR,
            Self::InvalidArgument { .. } => exit_codes::EXIT_USAGE_ERROR,
            Self::Interrupted => exit_codes::EXIT_INTERRUPTED,
            Self::IoError { .. } => exit_codes::EXIT_IO_ERROR,
            _ => exit_codes::EXIT_GENERAL_ERROR,
        }
    }
}

/// Result type alias for trajview operations.
pub type Result<T> = std::result::Result<T, ViewerError>;

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            context: "I/O operation failed".to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            context: "JSON operation failed".to_string(),
            source: err,
        }
    }
}

/// Exit codes for CLI operations.
pub mod exit_codes {
    /// Operation completed successfully.
    pub const EXIT_SUCCESS: i32 = 0;
    /// General/unspecified error.
    pub const EXIT_GENERAL_ERROR: i32 = 1;
    /// Specified file, directory or group not found.
    pub const EXIT_FILE_NOT_FOUND: i32 = 3;
    /// Insufficient permissions.
    pub const EXIT_PERMISSION_DENIED: i32 = 4;
    /// Invalid configuration.
    pub const EXIT_CONFIG_ERROR: i32 = 5;
    /// Export operation failed.
    pub const EXIT_EXPORT_ERROR: i32 = 6;
    /// Invalid command-line usage (BSD standard).
    pub const EXIT_USAGE_ERROR: i32 = 64;
    /// Input data format error (BSD standard).
    pub const EXIT_DATA_ERROR: i32 = 65;
    /// I/O error (BSD standard).
    pub const EXIT_IO_ERROR: i32 = 74;
    /// Terminated by Ctrl+C (128 + SIGINT).
    pub const EXIT_INTERRUPTED: i32 = 130;
}
