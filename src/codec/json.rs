// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec for `json` and `jsonb` documents.
//!
//! Binary `jsonb` prefixes the document text with a version byte; binary
//! `json` is the document text itself.

use std::sync::Arc;

use super::{unexpected_value, Codec};
use crate::buffer::{ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

/// Version byte of the binary `jsonb` representation.
const JSONB_VERSION: u8 = 1;

/// Codec for [`Value::Json`], encoded as text `json`.
pub struct JsonCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl JsonCodec {
    /// Create a JSON codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        "json"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Json
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        matches!(ty, PgType::Json | PgType::Jsonb)
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        if format.is_binary() && ty == PgType::Jsonb {
            let version = buffer.read_u8()?;
            if version != JSONB_VERSION {
                return Err(CodecError::invalid_value(
                    ty.name(),
                    format!("unsupported jsonb version {version}"),
                ));
            }
        }
        serde_json::from_slice(buffer.read_remaining())
            .map(Value::Json)
            .map_err(|e| CodecError::invalid_value(ty.name(), e.to_string()))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        let Value::Json(document) = value else {
            return Err(unexpected_value(self.name(), value));
        };
        let mut buf = self.allocator.allocate(64);
        serde_json::to_writer(&mut buf, document)
            .map_err(|e| CodecError::invalid_value(PgType::Json.name(), e.to_string()))?;
        Ok(Parameter::new(Format::Text, PgType::Json.oid(), buf))
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, PgType::Json.oid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::heap;
    use serde_json::json;

    fn decode(bytes: &[u8], ty: PgType, format: Format) -> Result<Value> {
        let mut cursor = ByteCursor::new(bytes);
        JsonCodec::new(heap()).decode_value(&mut cursor, ty, format, &ValueType::Json)
    }

    #[test]
    fn test_decode_text_json() {
        assert_eq!(
            decode(br#"{"a": [1, 2]}"#, PgType::Json, Format::Text).unwrap(),
            Value::Json(json!({"a": [1, 2]}))
        );
    }

    #[test]
    fn test_decode_binary_jsonb_strips_version() {
        assert_eq!(
            decode(b"\x01[true]", PgType::Jsonb, Format::Binary).unwrap(),
            Value::Json(json!([true]))
        );
        assert!(decode(b"\x02[true]", PgType::Jsonb, Format::Binary)
            .unwrap_err()
            .is_invalid_value());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(decode(b"{", PgType::Json, Format::Text)
            .unwrap_err()
            .is_invalid_value());
    }

    #[test]
    fn test_encode_text() {
        let param = JsonCodec::new(heap())
            .encode(&Value::Json(json!({"k": "v"})))
            .unwrap();
        assert_eq!(param.format(), Format::Text);
        assert_eq!(param.pg_type(), Some(PgType::Json));
        assert_eq!(param.payload(), Some(&br#"{"k":"v"}"#[..]));
    }
}
