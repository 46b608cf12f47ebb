//! Error handling for the IEGM toolkit
//!
//! One error type covers manifest parsing, recording loading, filter design
//! and configuration problems so every library crate can return
//! [`IegmResult`].

use std::fmt;
use std::path::PathBuf;

/// Result type alias for IEGM operations
pub type IegmResult<T> = Result<T, IegmError>;

/// Error type for all IEGM operations
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum IegmError {
    /// Invalid configuration value
    InvalidConfig {
        /// Description of the configuration error
        reason: String,
    },

    /// A required input file (manifest, config) does not exist
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// A recording listed in a manifest has no backing file
    MissingRecording {
        /// Path of the absent recording
        path: PathBuf,
    },

    /// I/O failure while reading a file
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// Malformed manifest CSV
    Manifest {
        /// Manifest file
        path: PathBuf,
        /// 1-based record number, when the problem is tied to one record
        record: Option<u64>,
        /// Description of the problem
        reason: String,
    },

    /// File name does not follow the `<PatientID>-<Label>-...` convention
    InvalidFileName {
        /// Offending file name
        name: String,
    },

    /// A sample value could not be parsed as a number
    SampleParse {
        /// Recording file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Token that failed to parse
        value: String,
    },

    /// Recording length differs from the configured segment size
    SampleCountMismatch {
        /// Recording file
        path: PathBuf,
        /// Configured segment size
        expected: usize,
        /// Number of samples found
        actual: usize,
    },

    /// Filter parameters cannot produce a stable design
    FilterDesign {
        /// Description of the design problem
        reason: String,
    },

    /// Signal too short for the requested operation
    SignalTooShort {
        /// Signal length in samples
        length: usize,
        /// Minimum length required (exclusive)
        required: usize,
    },
}

impl fmt::Display for IegmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IegmError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            IegmError::FileNotFound { path } => {
                write!(f, "File not found: {}", path.display())
            }
            IegmError::MissingRecording { path } => {
                write!(f, "Recording does not exist: {}", path.display())
            }
            IegmError::Io { path, message } => {
                write!(f, "I/O error reading {}: {}", path.display(), message)
            }
            IegmError::Manifest { path, record: Some(record), reason } => {
                write!(f, "Manifest error in {} (record {}): {}",
                       path.display(), record, reason)
            }
            IegmError::Manifest { path, record: None, reason } => {
                write!(f, "Manifest error in {}: {}", path.display(), reason)
            }
            IegmError::InvalidFileName { name } => {
                write!(f, "File name '{}' does not match <PatientID>-<Label>-...", name)
            }
            IegmError::SampleParse { path, line, value } => {
                write!(f, "Cannot parse sample '{}' at {}:{}",
                       value, path.display(), line)
            }
            IegmError::SampleCountMismatch { path, expected, actual } => {
                write!(f, "Recording {} has {} samples, expected {}",
                       path.display(), actual, expected)
            }
            IegmError::FilterDesign { reason } => {
                write!(f, "Filter design error: {}", reason)
            }
            IegmError::SignalTooShort { length, required } => {
                write!(f, "Signal too short: {} samples, need more than {}",
                       length, required)
            }
        }
    }
}

impl std::error::Error for IegmError {}

/// Convenience macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::error::IegmError::InvalidConfig {
            reason: format!($($arg)*),
        }
    };
}

/// Convenience macro for creating filter design errors
#[macro_export]
macro_rules! design_error {
    ($($arg:tt)*) => {
        $crate::error::IegmError::FilterDesign {
            reason: format!($($arg)*),
        }
    };
}
