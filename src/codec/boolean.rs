// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec for `bool`.

use std::sync::Arc;

use super::{expect_end, unexpected_value, Codec};
use crate::buffer::{write_bytes, ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

/// Codec for [`Value::Bool`], encoded as a one-byte binary `bool`.
pub struct BoolCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl BoolCodec {
    /// Create a boolean codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for BoolCodec {
    fn name(&self) -> &str {
        "bool"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Bool
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty == PgType::Bool
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        match format {
            Format::Binary => {
                let byte = buffer.read_u8()?;
                expect_end(buffer, ty)?;
                Ok(Value::Bool(byte != 0))
            }
            Format::Text => {
                let text = buffer.read_str()?.trim();
                match text.to_ascii_lowercase().as_str() {
                    "t" | "true" | "y" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
                    "f" | "false" | "n" | "no" | "off" | "0" => Ok(Value::Bool(false)),
                    _ => Err(CodecError::invalid_value(
                        ty.name(),
                        format!("cannot parse '{text}'"),
                    )),
                }
            }
        }
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Bool(v) => Ok(Parameter::new(
                Format::Binary,
                PgType::Bool.oid(),
                write_bytes(self.allocator.as_ref(), &[u8::from(*v)]),
            )),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Binary, PgType::Bool.oid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::heap;

    fn decode(bytes: &[u8], format: Format) -> Result<Value> {
        let mut cursor = ByteCursor::new(bytes);
        BoolCodec::new(heap()).decode_value(&mut cursor, PgType::Bool, format, &ValueType::Bool)
    }

    #[test]
    fn test_decode_text() {
        assert_eq!(decode(b"t", Format::Text).unwrap(), Value::Bool(true));
        assert_eq!(decode(b"FALSE", Format::Text).unwrap(), Value::Bool(false));
        assert!(decode(b"maybe", Format::Text).unwrap_err().is_invalid_value());
    }

    #[test]
    fn test_decode_binary() {
        assert_eq!(decode(&[1], Format::Binary).unwrap(), Value::Bool(true));
        assert_eq!(decode(&[0], Format::Binary).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_encode() {
        let param = BoolCodec::new(heap()).encode(&Value::Bool(true)).unwrap();
        assert_eq!(param.format(), Format::Binary);
        assert_eq!(param.payload(), Some(&[1u8][..]));
    }
}
