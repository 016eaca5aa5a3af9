// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for pgcodec.
//!
//! Every failure raised by the marshalling layer falls into one of three
//! categories:
//! - invalid arguments handed to a public operation
//! - unsupported types (no registered codec matched)
//! - invalid values (wire-valid input that cannot become the requested value)
//!
//! Buffer underflow and configuration failures are reported separately.

use thiserror::Error;

/// Errors that can occur while encoding or decoding values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// A required argument was unusable.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// No registered codec can handle the requested type.
    #[error("Cannot {operation} of type {type_name}")]
    UnsupportedType {
        /// Operation that found no codec (e.g. "decode value")
        operation: &'static str,
        /// Type that could not be handled
        type_name: String,
    },

    /// Input was routed to a codec but cannot be translated.
    #[error("Invalid {type_name} value: {message}")]
    InvalidValue {
        /// Native or wire type being produced
        type_name: String,
        /// Error message
        message: String,
    },

    /// Buffer too short for requested read
    #[error(
        "Buffer too short: requested {requested} bytes at position {position}, but only {available} bytes available"
    )]
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        position: usize,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl CodecError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CodecError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an unsupported type error.
    pub fn unsupported_type(operation: &'static str, type_name: impl Into<String>) -> Self {
        CodecError::UnsupportedType {
            operation,
            type_name: type_name.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::InvalidValue {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, position: usize) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            position,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CodecError::Config {
            message: message.into(),
        }
    }

    /// Check if this error reports a missing codec.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, CodecError::UnsupportedType { .. })
    }

    /// Check if this error reports an untranslatable value.
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, CodecError::InvalidValue { .. })
    }

    /// Check if this error reports an unusable argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CodecError::InvalidArgument { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::InvalidArgument { message } => vec![("message", message.clone())],
            CodecError::UnsupportedType {
                operation,
                type_name,
            } => vec![
                ("operation", (*operation).to_string()),
                ("type", type_name.clone()),
            ],
            CodecError::InvalidValue { type_name, message } => {
                vec![("type", type_name.clone()), ("message", message.clone())]
            }
            CodecError::BufferTooShort {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::Config { message } => vec![("message", message.clone())],
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::config(err.to_string())
    }
}

impl From<toml::de::Error> for CodecError {
    fn from(err: toml::de::Error) -> Self {
        CodecError::config(err.to_string())
    }
}

/// Result type for pgcodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = CodecError::invalid_argument("unknown type oid 4242");
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Invalid argument: unknown type oid 4242");
    }

    #[test]
    fn test_unsupported_type_error() {
        let err = CodecError::unsupported_type("decode value", "uuid");
        assert!(err.is_unsupported_type());
        assert_eq!(err.to_string(), "Cannot decode value of type uuid");
    }

    #[test]
    fn test_invalid_value_error() {
        let err = CodecError::invalid_value("int2", "70000 is out of range");
        assert!(err.is_invalid_value());
        assert_eq!(err.to_string(), "Invalid int2 value: 70000 is out of range");
    }

    #[test]
    fn test_buffer_too_short_error() {
        let err = CodecError::buffer_too_short(8, 3, 2);
        assert_eq!(
            err.to_string(),
            "Buffer too short: requested 8 bytes at position 2, but only 3 bytes available"
        );
    }

    #[test]
    fn test_log_fields_unsupported_type() {
        let err = CodecError::unsupported_type("encode parameter", "json");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("operation", "encode parameter".to_string()));
        assert_eq!(fields[1], ("type", "json".to_string()));
    }

    #[test]
    fn test_log_fields_buffer_too_short() {
        let err = CodecError::buffer_too_short(100, 50, 10);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].1, "100");
        assert_eq!(fields[1].1, "50");
        assert_eq!(fields[2].1, "10");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CodecError = io_err.into();
        assert!(matches!(err, CodecError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: file not found");
    }
}
