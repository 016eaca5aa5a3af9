// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec for enumerations, stored on the wire as their symbol name.
//!
//! The codec owns a [`StringCodec`] and reuses its wire logic: encoding an
//! enumeration member produces exactly the parameter the string codec would
//! produce for the member's name. Only the native boundary differs.

use std::sync::Arc;

use tracing::debug;

use super::string::StringCodec;
use super::{unexpected_value, Codec};
use crate::buffer::{ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Oid, Parameter, PgType, Result, Value, ValueType};

/// Codec for [`Value::Enum`] members of any [`EnumType`](crate::EnumType).
///
/// The concrete symbol set is chosen by the caller at decode time through
/// the target [`ValueType::Enum`].
pub struct EnumCodec {
    delegate: StringCodec,
}

impl EnumCodec {
    /// Create an enum codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self {
            delegate: StringCodec::new(allocator),
        }
    }
}

impl Codec for EnumCodec {
    fn name(&self) -> &str {
        "enum"
    }

    fn value_type(&self) -> ValueType {
        ValueType::AnyEnum
    }

    fn supports(&self, ty: PgType, format: Format) -> bool {
        self.delegate.supports(ty, format)
    }

    fn can_decode(&self, oid: Oid, format: Format, target: &ValueType) -> bool {
        (target.is_any() || target.is_enum())
            && PgType::from_oid(oid).is_some_and(|ty| self.supports(ty, format))
    }

    fn can_encode(&self, value: &Value) -> bool {
        value.is_enum()
    }

    fn can_encode_null(&self, target: &ValueType) -> bool {
        target.is_enum()
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        _ty: PgType,
        _format: Format,
        target: &ValueType,
    ) -> Result<Value> {
        let enum_type = target.enum_type().ok_or_else(|| {
            CodecError::invalid_argument(format!(
                "decoding an enum requires a concrete enum target, got {target}"
            ))
        })?;
        let name = self.delegate.decode_str(buffer)?;
        enum_type.value_of(name).map(Value::Enum).inspect_err(|_| {
            debug!(enum_type = enum_type.name(), symbol = name, "unknown enum symbol");
        })
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Enum(member) => Ok(self.delegate.encode_str(member.name())),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        self.delegate.encode_null()
    }
}
