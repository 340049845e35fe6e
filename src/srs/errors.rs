//! Custom error types for spatial reference processing

use std::fmt;
use std::io;

/// Spatial reference error types
#[derive(Debug)]
pub enum SrsError {
    /// I/O error
    IoError(io::Error),
    /// A registry table that has no fallback could not be opened
    MissingRegistryFile(String),
    /// Unknown projection, method code or dialect keyword
    UnsupportedFormat(String),
    /// Input text could not be parsed
    MalformedInput {
        /// Description of the problem
        message: String,
        /// Character offset of the problem, when known
        position: Option<usize>,
    },
    /// A lookup failed after every fallback was tried
    NotFound(String),
    /// Configuration file could not be used
    InvalidConfig(String),
    /// Generic error with message
    GenericError(String),
}

impl SrsError {
    /// Shorthand for a malformed-input error at a known position
    pub fn malformed_at(message: impl Into<String>, position: usize) -> Self {
        SrsError::MalformedInput {
            message: message.into(),
            position: Some(position),
        }
    }

    /// Shorthand for a malformed-input error without a position
    pub fn malformed(message: impl Into<String>) -> Self {
        SrsError::MalformedInput {
            message: message.into(),
            position: None,
        }
    }
}

impl fmt::Display for SrsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SrsError::IoError(e) => write!(f, "I/O error: {}", e),
            SrsError::MissingRegistryFile(path) => write!(f, "Missing registry file: {}", path),
            SrsError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            SrsError::MalformedInput { message, position: Some(pos) } => {
                write!(f, "Malformed input at offset {}: {}", pos, message)
            },
            SrsError::MalformedInput { message, position: None } => {
                write!(f, "Malformed input: {}", message)
            },
            SrsError::NotFound(msg) => write!(f, "Not found: {}", msg),
            SrsError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            SrsError::GenericError(msg) => write!(f, "SRS error: {}", msg),
        }
    }
}

impl std::error::Error for SrsError {}

impl From<io::Error> for SrsError {
    fn from(error: io::Error) -> Self {
        SrsError::IoError(error)
    }
}

/// Result type for spatial reference operations
pub type SrsResult<T> = Result<T, SrsError>;

impl From<String> for SrsError {
    fn from(msg: String) -> Self {
        SrsError::GenericError(msg)
    }
}
