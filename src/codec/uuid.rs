// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec for `uuid`.

use std::sync::Arc;

use super::{expect_end, unexpected_value, Codec};
use crate::buffer::{write_bytes, ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

/// Codec for [`Value::Uuid`], encoded as the 16 raw bytes of binary `uuid`.
pub struct UuidCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl UuidCodec {
    /// Create a UUID codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for UuidCodec {
    fn name(&self) -> &str {
        "uuid"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Uuid
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty == PgType::Uuid
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        let parsed = match format {
            Format::Text => ::uuid::Uuid::parse_str(buffer.read_str()?.trim()),
            Format::Binary => {
                let bytes = buffer.read_bytes(16)?;
                expect_end(buffer, ty)?;
                ::uuid::Uuid::from_slice(bytes)
            }
        };
        parsed
            .map(Value::Uuid)
            .map_err(|e| CodecError::invalid_value(ty.name(), e.to_string()))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Uuid(v) => Ok(Parameter::new(
                Format::Binary,
                PgType::Uuid.oid(),
                write_bytes(self.allocator.as_ref(), v.as_bytes()),
            )),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Binary, PgType::Uuid.oid())
    }
}
