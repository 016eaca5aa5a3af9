// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Character-string codecs.
//!
//! Text and binary formats of the character types are both the raw UTF-8
//! bytes, so the same logic serves either format.

use std::sync::Arc;

use super::{unexpected_value, Codec};
use crate::buffer::{write_str, ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

/// Whether `ty` is a character type carrying plain UTF-8.
fn is_character_type(ty: PgType) -> bool {
    matches!(
        ty,
        PgType::Bpchar
            | PgType::Char
            | PgType::Name
            | PgType::Text
            | PgType::Unknown
            | PgType::Varchar
    )
}

/// Codec for [`Value::Text`], encoded as `varchar`.
pub struct StringCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl StringCodec {
    /// Create a string codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }

    /// Read the whole value as a string slice.
    pub fn decode_str<'a>(&self, buffer: &mut ByteCursor<'a>) -> Result<&'a str> {
        buffer.read_str()
    }

    /// Encode a string slice as a text `varchar` parameter.
    pub fn encode_str(&self, value: &str) -> Parameter {
        self.encode_str_as(PgType::Varchar, value)
    }

    /// Encode a string slice as a text parameter of type `ty`.
    pub fn encode_str_as(&self, ty: PgType, value: &str) -> Parameter {
        Parameter::new(
            Format::Text,
            ty.oid(),
            write_str(self.allocator.as_ref(), value),
        )
    }
}

impl Codec for StringCodec {
    fn name(&self) -> &str {
        "string"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Text
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        is_character_type(ty)
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        _ty: PgType,
        _format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        Ok(Value::Text(self.decode_str(buffer)?.to_string()))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Text(s) => Ok(self.encode_str(s)),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, PgType::Varchar.oid())
    }
}

/// Codec for [`Value::Char`].
///
/// Decodes single-character strings and encodes the character as `varchar`.
pub struct CharCodec {
    delegate: StringCodec,
}

impl CharCodec {
    /// Create a character codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self {
            delegate: StringCodec::new(allocator),
        }
    }
}

impl Codec for CharCodec {
    fn name(&self) -> &str {
        "char"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Char
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty != PgType::Name && is_character_type(ty)
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        _format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        let text = self.delegate.decode_str(buffer)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Value::Char(c)),
            _ => Err(CodecError::invalid_value(
                ty.name(),
                format!("'{text}' is not a single character"),
            )),
        }
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Char(c) => Ok(self.delegate.encode_str(c.encode_utf8(&mut [0u8; 4]))),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        self.delegate.encode_null()
    }
}

/// Codec for [`Value::RefCursor`], the name of a cursor returned by a
/// function. Encoded as text `refcursor`.
pub struct RefCursorCodec {
    delegate: StringCodec,
}

impl RefCursorCodec {
    /// Create a cursor-name codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self {
            delegate: StringCodec::new(allocator),
        }
    }
}

impl Codec for RefCursorCodec {
    fn name(&self) -> &str {
        "refcursor"
    }

    fn value_type(&self) -> ValueType {
        ValueType::RefCursor
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty == PgType::RefCursor
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        _ty: PgType,
        _format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        Ok(Value::RefCursor(self.delegate.decode_str(buffer)?.to_string()))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::RefCursor(name) => Ok(self.delegate.encode_str_as(PgType::RefCursor, name)),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, PgType::RefCursor.oid())
    }
}

/// Decode-only codec reading `refcursor` columns into plain [`Value::Text`].
///
/// Never claims [`ValueType::Any`], which yields [`Value::RefCursor`], and
/// never encodes; text values are encoded by [`StringCodec`].
pub struct RefCursorNameCodec {
    delegate: StringCodec,
}

impl RefCursorNameCodec {
    /// Create the codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self {
            delegate: StringCodec::new(allocator),
        }
    }
}

impl Codec for RefCursorNameCodec {
    fn name(&self) -> &str {
        "refcursor_name"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Text
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty == PgType::RefCursor
    }

    fn claims_any(&self, _ty: PgType) -> bool {
        false
    }

    fn can_encode(&self, _value: &Value) -> bool {
        false
    }

    fn can_encode_null(&self, _target: &ValueType) -> bool {
        false
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        target: &ValueType,
    ) -> Result<Value> {
        self.delegate.decode_value(buffer, ty, format, target)
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        self.delegate.encode(value)
    }

    fn encode_null(&self) -> Parameter {
        self.delegate.encode_null()
    }
}
