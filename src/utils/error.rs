//! Error handling for texassist
//!
//! The engine itself is made of total functions; errors only surface at the
//! boundaries: invalid offsets handed in by the host, catalog and
//! configuration loading, and measurement failures relayed by the bindings.

use std::fmt;

/// Assistance error type
#[derive(Debug, Clone, PartialEq)]
pub enum AssistError {
    /// Offset lies beyond the end of the text (UTF-16 code units)
    OffsetOutOfRange { offset: usize, len: usize },
    /// Offset falls between the two halves of a surrogate pair
    SplitSurrogate { offset: usize },
    /// Catalog entry or catalog file is unusable
    InvalidCatalog {
        message: String,
        entry: Option<String>,
    },
    /// Configuration could not be parsed
    ConfigError { message: String },
    /// Host text measurement failed
    MeasureError { message: String },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for AssistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistError::OffsetOutOfRange { offset, len } => {
                write!(f, "Offset {} is out of range for text of length {}", offset, len)
            }
            AssistError::SplitSurrogate { offset } => {
                write!(f, "Offset {} splits a surrogate pair", offset)
            }
            AssistError::InvalidCatalog { message, entry } => {
                if let Some(entry) = entry {
                    write!(f, "Invalid catalog entry '{}': {}", entry, message)
                } else {
                    write!(f, "Invalid catalog: {}", message)
                }
            }
            AssistError::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            AssistError::MeasureError { message } => {
                write!(f, "Text measurement failed: {}", message)
            }
            AssistError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for AssistError {}

impl From<std::io::Error> for AssistError {
    fn from(err: std::io::Error) -> Self {
        AssistError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AssistError {
    fn from(err: serde_json::Error) -> Self {
        AssistError::InvalidCatalog {
            message: err.to_string(),
            entry: None,
        }
    }
}

impl From<toml::de::Error> for AssistError {
    fn from(err: toml::de::Error) -> Self {
        AssistError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for assistance operations
pub type AssistResult<T> = Result<T, AssistError>;

// Convenience constructors for errors
impl AssistError {
    pub fn out_of_range(offset: usize, len: usize) -> Self {
        AssistError::OffsetOutOfRange { offset, len }
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        AssistError::InvalidCatalog {
            message: message.into(),
            entry: None,
        }
    }

    pub fn catalog_entry(message: impl Into<String>, entry: impl Into<String>) -> Self {
        AssistError::InvalidCatalog {
            message: message.into(),
            entry: Some(entry.into()),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AssistError::ConfigError {
            message: message.into(),
        }
    }

    pub fn measure(message: impl Into<String>) -> Self {
        AssistError::MeasureError {
            message: message.into(),
        }
    }
}
