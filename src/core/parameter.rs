// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire-ready encoded parameters.

use std::fmt;

use super::types::{Oid, PgType};
use super::Format;

/// An encoded bind parameter: format, type OID, and payload.
///
/// A `None` payload is the SQL NULL marker. Parameters are produced by codecs
/// and never mutated afterwards.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    format: Format,
    oid: Oid,
    payload: Option<Vec<u8>>,
}

impl Parameter {
    /// Create a parameter carrying a value.
    pub fn new(format: Format, oid: Oid, payload: Vec<u8>) -> Self {
        Self {
            format,
            oid,
            payload: Some(payload),
        }
    }

    /// Create a parameter carrying SQL NULL.
    pub fn null(format: Format, oid: Oid) -> Self {
        Self {
            format,
            oid,
            payload: None,
        }
    }

    /// Wire format of the payload.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Type OID announced to the server.
    pub fn oid(&self) -> Oid {
        self.oid
    }

    /// Resolved type, if the OID is well known.
    pub fn pg_type(&self) -> Option<PgType> {
        PgType::from_oid(self.oid)
    }

    /// Encoded bytes, or `None` for NULL.
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Check if this parameter is NULL.
    pub fn is_null(&self) -> bool {
        self.payload.is_none()
    }

    /// Take the payload storage, e.g. to hand it back to a
    /// [`ByteAllocator`](crate::buffer::ByteAllocator) after it was written out.
    pub fn into_payload(self) -> Option<Vec<u8>> {
        self.payload
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Parameter");
        s.field("format", &self.format);
        match self.pg_type() {
            Some(ty) => s.field("type", &ty),
            None => s.field("oid", &self.oid),
        };
        match &self.payload {
            Some(bytes) => s.field("payload", &hex::encode(bytes)),
            None => s.field("payload", &"NULL"),
        };
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parameter() {
        let param = Parameter::new(Format::Binary, PgType::Int4.oid(), vec![0, 0, 0, 42]);
        assert_eq!(param.format(), Format::Binary);
        assert_eq!(param.pg_type(), Some(PgType::Int4));
        assert_eq!(param.payload(), Some(&[0u8, 0, 0, 42][..]));
        assert!(!param.is_null());
    }

    #[test]
    fn test_null_parameter() {
        let param = Parameter::null(Format::Text, PgType::Varchar.oid());
        assert!(param.is_null());
        assert_eq!(param.payload(), None);
        assert_eq!(param.into_payload(), None);
    }

    #[test]
    fn test_debug_shows_hex_payload() {
        let param = Parameter::new(Format::Text, PgType::Varchar.oid(), b"hi".to_vec());
        let debug = format!("{param:?}");
        assert!(debug.contains("Varchar"));
        assert!(debug.contains("6869"));
    }
}
