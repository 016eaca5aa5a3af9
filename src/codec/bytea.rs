// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec for `bytea`.
//!
//! The text format is either the hex form (`\x` followed by hex digits) or
//! the legacy escape form, where non-printable bytes are written as `\nnn`
//! octal triples and backslashes are doubled.

use std::sync::Arc;

use super::{unexpected_value, Codec};
use crate::buffer::{write_bytes, ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

fn decode_escaped(text: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        if text[i] != b'\\' {
            out.push(text[i]);
            i += 1;
            continue;
        }
        match text.get(i + 1..i + 4) {
            Some(&[b'\\', ..]) => {
                out.push(b'\\');
                i += 2;
            }
            Some(&[a @ b'0'..=b'3', b @ b'0'..=b'7', c @ b'0'..=b'7']) => {
                out.push((a - b'0') * 64 + (b - b'0') * 8 + (c - b'0'));
                i += 4;
            }
            _ if text.get(i + 1) == Some(&b'\\') => {
                out.push(b'\\');
                i += 2;
            }
            _ => {
                return Err(CodecError::invalid_value(
                    PgType::Bytea.name(),
                    format!("invalid escape sequence at position {i}"),
                ))
            }
        }
    }
    Ok(out)
}

/// Codec for [`Value::Bytes`], encoded as binary `bytea`.
pub struct BytesCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl BytesCodec {
    /// Create a bytea codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for BytesCodec {
    fn name(&self) -> &str {
        "bytea"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Bytes
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty == PgType::Bytea
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        let raw = buffer.read_remaining();
        let bytes = match format {
            Format::Binary => raw.to_vec(),
            Format::Text => match raw.strip_prefix(b"\\x") {
                Some(digits) => hex::decode(digits).map_err(|e| {
                    CodecError::invalid_value(ty.name(), format!("invalid hex: {e}"))
                })?,
                None => decode_escaped(raw)?,
            },
        };
        Ok(Value::Bytes(bytes))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Bytes(v) => Ok(Parameter::new(
                Format::Binary,
                PgType::Bytea.oid(),
                write_bytes(self.allocator.as_ref(), v),
            )),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Binary, PgType::Bytea.oid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::heap;

    fn decode(bytes: &[u8], format: Format) -> Result<Value> {
        let mut cursor = ByteCursor::new(bytes);
        BytesCodec::new(heap()).decode_value(&mut cursor, PgType::Bytea, format, &ValueType::Bytes)
    }

    #[test]
    fn test_decode_hex_text() {
        assert_eq!(
            decode(b"\\xdeadBEEF", Format::Text).unwrap(),
            Value::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF])
        );
        assert!(decode(b"\\xzz", Format::Text).unwrap_err().is_invalid_value());
    }

    #[test]
    fn test_decode_escape_text() {
        assert_eq!(
            decode(b"a\\000b\\\\c\\377", Format::Text).unwrap(),
            Value::Bytes(vec![b'a', 0, b'b', b'\\', b'c', 0xFF])
        );
        assert!(decode(b"\\9", Format::Text).unwrap_err().is_invalid_value());
    }

    #[test]
    fn test_decode_binary_is_raw() {
        assert_eq!(
            decode(&[0, 1, 2], Format::Binary).unwrap(),
            Value::Bytes(vec![0, 1, 2])
        );
    }

    #[test]
    fn test_encode_binary() {
        let param = BytesCodec::new(heap())
            .encode(&Value::Bytes(vec![9, 8]))
            .unwrap();
        assert_eq!(param.format(), Format::Binary);
        assert_eq!(param.pg_type(), Some(PgType::Bytea));
        assert_eq!(param.payload(), Some(&[9u8, 8][..]));
    }
}
