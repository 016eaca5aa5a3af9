// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout pgcodec.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error taxonomy shared by all codecs
//! - [`Value`] / [`ValueType`] - Native values and their categories
//! - [`PgType`] - Well-known wire type identifiers
//! - [`Parameter`] - Encoded, wire-ready values
//! - [`Format`] - Text or binary wire format

pub mod error;
pub mod parameter;
pub mod types;
pub mod value;

pub use error::{CodecError, Result};
pub use parameter::Parameter;
pub use types::{Oid, PgType};
pub use value::{EnumType, EnumValue, FromValue, Value, ValueType};

/// Wire format of an encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Textual representation (format code 0)
    Text,
    /// Binary representation (format code 1)
    Binary,
}

/// Error returned when parsing a `Format` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFormatError {
    _private: (),
}

impl std::fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid format name, expected 'text' or 'binary'")
    }
}

impl std::error::Error for ParseFormatError {}

impl std::str::FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "binary" => Ok(Format::Binary),
            _ => Err(ParseFormatError { _private: () }),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Format {
    /// Resolve a protocol format code.
    pub fn from_code(code: i16) -> Result<Self> {
        match code {
            0 => Ok(Format::Text),
            1 => Ok(Format::Binary),
            other => Err(CodecError::invalid_argument(format!(
                "unknown format code {other}"
            ))),
        }
    }

    /// Protocol format code.
    pub fn code(&self) -> i16 {
        match self {
            Format::Text => 0,
            Format::Binary => 1,
        }
    }

    /// Check if this is the text format.
    pub fn is_text(&self) -> bool {
        matches!(self, Format::Text)
    }

    /// Check if this is the binary format.
    pub fn is_binary(&self) -> bool {
        matches!(self, Format::Binary)
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Binary => "binary",
        }
    }
}
