// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Native value type system.
//!
//! [`Value`] is the client-side representation of a single non-NULL column or
//! parameter value. [`ValueType`] names the category of a value and is what
//! callers pass as the decode target; codecs declare the category they serve
//! and are matched against it by value, so no runtime type inspection is
//! needed. SQL NULL is never a `Value`: decoding yields `Option<Value>` and
//! encoding NULL goes through a separate path.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use super::error::{CodecError, Result};

/// Native value handled by the codec registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Boolean
    Bool(bool),

    // Single character
    Char(char),

    // Signed integers
    Int16(i16),
    Int32(i32),
    Int64(i64),

    // Floating point
    Float32(f32),
    Float64(f64),

    // Arbitrary-precision decimal
    Numeric(BigDecimal),

    // String (UTF-8)
    Text(String),

    // Name of a server-side cursor
    RefCursor(String),

    // Binary data
    Bytes(Vec<u8>),

    Uuid(Uuid),

    // Parsed JSON document (json and jsonb)
    Json(serde_json::Value),

    // Host address
    Inet(IpAddr),

    // Temporal types
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<FixedOffset>),

    // One-dimensional arrays, `None` elements are SQL NULL
    Int16Array(Vec<Option<i16>>),
    Int32Array(Vec<Option<i32>>),
    Int64Array(Vec<Option<i64>>),
    TextArray(Vec<Option<String>>),

    // Member of a closed symbol set
    Enum(EnumValue),
}

/// Category of a native value, used as decode target and codec declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Whatever category the matching codec prefers.
    Any,
    Bool,
    Char,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Numeric,
    Text,
    RefCursor,
    Bytes,
    Uuid,
    Json,
    Inet,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Int16Array,
    Int32Array,
    Int64Array,
    TextArray,
    /// Every enumeration, regardless of its symbol set.
    AnyEnum,
    /// One concrete enumeration.
    Enum(EnumType),
}

impl ValueType {
    /// Check if this is the generic target.
    pub fn is_any(&self) -> bool {
        matches!(self, ValueType::Any)
    }

    /// Check if this is an enumeration category, concrete or not.
    pub fn is_enum(&self) -> bool {
        matches!(self, ValueType::AnyEnum | ValueType::Enum(_))
    }

    /// The concrete symbol set, if any.
    pub fn enum_type(&self) -> Option<&EnumType> {
        match self {
            ValueType::Enum(ty) => Some(ty),
            _ => None,
        }
    }

}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Any => "any",
            ValueType::Bool => "bool",
            ValueType::Char => "char",
            ValueType::Int16 => "int16",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Float32 => "float32",
            ValueType::Float64 => "float64",
            ValueType::Numeric => "numeric",
            ValueType::Text => "text",
            ValueType::RefCursor => "refcursor",
            ValueType::Bytes => "bytes",
            ValueType::Uuid => "uuid",
            ValueType::Json => "json",
            ValueType::Inet => "inet",
            ValueType::Date => "date",
            ValueType::Time => "time",
            ValueType::Timestamp => "timestamp",
            ValueType::TimestampTz => "timestamptz",
            ValueType::Int16Array => "int16[]",
            ValueType::Int32Array => "int32[]",
            ValueType::Int64Array => "int64[]",
            ValueType::TextArray => "text[]",
            ValueType::AnyEnum => "enum",
            ValueType::Enum(ty) => return write!(f, "enum {}", ty.name()),
        };
        f.write_str(name)
    }
}

impl Value {
    /// Category of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Char(_) => ValueType::Char,
            Value::Int16(_) => ValueType::Int16,
            Value::Int32(_) => ValueType::Int32,
            Value::Int64(_) => ValueType::Int64,
            Value::Float32(_) => ValueType::Float32,
            Value::Float64(_) => ValueType::Float64,
            Value::Numeric(_) => ValueType::Numeric,
            Value::Text(_) => ValueType::Text,
            Value::RefCursor(_) => ValueType::RefCursor,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Uuid(_) => ValueType::Uuid,
            Value::Json(_) => ValueType::Json,
            Value::Inet(_) => ValueType::Inet,
            Value::Date(_) => ValueType::Date,
            Value::Time(_) => ValueType::Time,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::TimestampTz(_) => ValueType::TimestampTz,
            Value::Int16Array(_) => ValueType::Int16Array,
            Value::Int32Array(_) => ValueType::Int32Array,
            Value::Int64Array(_) => ValueType::Int64Array,
            Value::TextArray(_) => ValueType::TextArray,
            Value::Enum(v) => ValueType::Enum(v.enum_type().clone()),
        }
    }

    /// Check if this value belongs to some enumeration.
    pub fn is_enum(&self) -> bool {
        matches!(self, Value::Enum(_))
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get the inner enumeration member.
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Value::Enum(v) => Some(v),
            _ => None,
        }
    }
}

// =============================================================================
// Enumerations
// =============================================================================

/// A named, closed set of symbols, e.g. a PostgreSQL `CREATE TYPE .. AS ENUM`.
///
/// Cheap to clone; two handles are equal when name and symbols are equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    inner: Arc<EnumTypeInner>,
}

#[derive(PartialEq, Eq, Hash)]
struct EnumTypeInner {
    name: String,
    variants: Vec<String>,
}

impl EnumType {
    /// Create a symbol set from its name and ordered symbols.
    ///
    /// Duplicate symbols are dropped, keeping the first occurrence.
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for variant in variants {
            let variant = variant.into();
            if !unique.contains(&variant) {
                unique.push(variant);
            }
        }
        Self {
            inner: Arc::new(EnumTypeInner {
                name: name.into(),
                variants: unique,
            }),
        }
    }

    /// Name of the enumeration.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Symbols in declaration order.
    pub fn variants(&self) -> &[String] {
        &self.inner.variants
    }

    /// Resolve a symbol by its exact name.
    pub fn value_of(&self, name: &str) -> Result<EnumValue> {
        self.inner
            .variants
            .iter()
            .position(|v| v == name)
            .map(|index| EnumValue {
                enum_type: self.clone(),
                index,
            })
            .ok_or_else(|| {
                CodecError::invalid_value(
                    self.to_string(),
                    format!("No enum constant {}.{}", self.name(), name),
                )
            })
    }

    /// Member at the given ordinal.
    pub fn value(&self, ordinal: usize) -> Option<EnumValue> {
        (ordinal < self.inner.variants.len()).then(|| EnumValue {
            enum_type: self.clone(),
            index: ordinal,
        })
    }

    /// Category of this enumeration's members.
    pub fn value_type(&self) -> ValueType {
        ValueType::Enum(self.clone())
    }
}

impl fmt::Debug for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumType")
            .field("name", &self.inner.name)
            .field("variants", &self.inner.variants)
            .finish()
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enum {}", self.inner.name)
    }
}

/// One member of an [`EnumType`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    enum_type: EnumType,
    index: usize,
}

impl EnumValue {
    /// The symbol set this member belongs to.
    pub fn enum_type(&self) -> &EnumType {
        &self.enum_type
    }

    /// Symbolic name, as stored on the wire.
    pub fn name(&self) -> &str {
        &self.enum_type.inner.variants[self.index]
    }

    /// Position of this member in its symbol set.
    pub fn ordinal(&self) -> usize {
        self.index
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.enum_type.name(), self.name())
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Typed Conversions
// =============================================================================

/// Rust types that can be produced from a decoded [`Value`].
///
/// Used by [`CodecRegistry::decode_as`](crate::codec::CodecRegistry::decode_as)
/// to pick the decode target from the requested Rust type.
pub trait FromValue: Sized {
    /// Decode target for this type.
    fn value_type() -> ValueType;

    /// Convert a decoded value.
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch(expected: ValueType, found: &Value) -> CodecError {
    CodecError::invalid_value(
        expected.to_string(),
        format!("expected {expected}, found {}", found.value_type()),
    )
}

macro_rules! value_conversions {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl FromValue for $ty {
                fn value_type() -> ValueType {
                    ValueType::$variant
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(mismatch(ValueType::$variant, &other)),
                    }
                }
            }
        )+
    };
}

value_conversions! {
    bool => Bool,
    char => Char,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    BigDecimal => Numeric,
    String => Text,
    Vec<u8> => Bytes,
    Uuid => Uuid,
    serde_json::Value => Json,
    IpAddr => Inet,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    DateTime<FixedOffset> => TimestampTz,
    Vec<Option<i16>> => Int16Array,
    Vec<Option<i32>> => Int32Array,
    Vec<Option<i64>> => Int64Array,
    Vec<Option<String>> => TextArray,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::TimestampTz(v.fixed_offset())
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl FromValue for EnumValue {
    fn value_type() -> ValueType {
        ValueType::AnyEnum
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Enum(v) => Ok(v),
            other => Err(mismatch(ValueType::AnyEnum, &other)),
        }
    }
}

impl FromValue for Value {
    fn value_type() -> ValueType {
        ValueType::Any
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}
