// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Integer and floating-point codecs.
//!
//! Every integer codec reads `int2`, `int4` and `int8` and narrows with a
//! range check; float codecs read `float4` and `float8`. For the
//! [`ValueType::Any`] target each codec only claims its own wire width, so
//! an `int2` column decodes to [`Value::Int16`] regardless of codec order.
//! Values are encoded in binary format at their native width.

use std::sync::Arc;

use super::{expect_end, parse_text, unexpected_type, unexpected_value, Codec};
use crate::buffer::{write_with, ByteAllocator, ByteCursor, WireWrite};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

pub(super) fn decode_integer(
    buffer: &mut ByteCursor<'_>,
    ty: PgType,
    format: Format,
) -> Result<i64> {
    match format {
        Format::Text => parse_text(ty, buffer.read_str()?.trim()),
        Format::Binary => {
            let value = match ty {
                PgType::Int2 => buffer.read_i16()? as i64,
                PgType::Int4 => buffer.read_i32()? as i64,
                PgType::Int8 => buffer.read_i64()?,
                other => return Err(unexpected_type("integer", other, format)),
            };
            expect_end(buffer, ty)?;
            Ok(value)
        }
    }
}

pub(super) fn decode_float(
    buffer: &mut ByteCursor<'_>,
    ty: PgType,
    format: Format,
) -> Result<f64> {
    match format {
        Format::Text => parse_text(ty, buffer.read_str()?.trim()),
        Format::Binary => {
            let value = match ty {
                PgType::Float4 => buffer.read_f32()? as f64,
                PgType::Float8 => buffer.read_f64()?,
                other => return Err(unexpected_type("float", other, format)),
            };
            expect_end(buffer, ty)?;
            Ok(value)
        }
    }
}

fn out_of_range(value_type: ValueType, value: i64) -> CodecError {
    CodecError::invalid_value(
        value_type.to_string(),
        format!("{value} is out of range"),
    )
}

macro_rules! integer_codec {
    ($(#[$meta:meta])* $codec:ident, $name:literal, $native:ty, $variant:ident, $wire:ident, $put:ident, $width:literal) => {
        $(#[$meta])*
        pub struct $codec {
            allocator: Arc<dyn ByteAllocator>,
        }

        impl $codec {
            /// Create the codec drawing payload storage from `allocator`.
            pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
                Self { allocator }
            }
        }

        impl Codec for $codec {
            fn name(&self) -> &str {
                $name
            }

            fn value_type(&self) -> ValueType {
                ValueType::$variant
            }

            fn supports(&self, ty: PgType, _format: Format) -> bool {
                matches!(ty, PgType::Int2 | PgType::Int4 | PgType::Int8)
            }

            fn claims_any(&self, ty: PgType) -> bool {
                ty == PgType::$wire
            }

            fn decode_value(
                &self,
                buffer: &mut ByteCursor<'_>,
                ty: PgType,
                format: Format,
                _target: &ValueType,
            ) -> Result<Value> {
                let value = decode_integer(buffer, ty, format)?;
                <$native>::try_from(value)
                    .map(Value::$variant)
                    .map_err(|_| out_of_range(ValueType::$variant, value))
            }

            fn encode(&self, value: &Value) -> Result<Parameter> {
                match value {
                    Value::$variant(v) => Ok(Parameter::new(
                        Format::Binary,
                        PgType::$wire.oid(),
                        write_with(self.allocator.as_ref(), $width, |b| b.$put(*v)),
                    )),
                    other => Err(unexpected_value(self.name(), other)),
                }
            }

            fn encode_null(&self) -> Parameter {
                Parameter::null(Format::Binary, PgType::$wire.oid())
            }
        }
    };
}

macro_rules! float_codec {
    ($(#[$meta:meta])* $codec:ident, $name:literal, $native:ty, $variant:ident, $wire:ident, $put:ident, $width:literal) => {
        $(#[$meta])*
        pub struct $codec {
            allocator: Arc<dyn ByteAllocator>,
        }

        impl $codec {
            /// Create the codec drawing payload storage from `allocator`.
            pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
                Self { allocator }
            }
        }

        impl Codec for $codec {
            fn name(&self) -> &str {
                $name
            }

            fn value_type(&self) -> ValueType {
                ValueType::$variant
            }

            fn supports(&self, ty: PgType, _format: Format) -> bool {
                matches!(ty, PgType::Float4 | PgType::Float8)
            }

            fn claims_any(&self, ty: PgType) -> bool {
                ty == PgType::$wire
            }

            fn decode_value(
                &self,
                buffer: &mut ByteCursor<'_>,
                ty: PgType,
                format: Format,
                _target: &ValueType,
            ) -> Result<Value> {
                Ok(Value::$variant(decode_float(buffer, ty, format)? as $native))
            }

            fn encode(&self, value: &Value) -> Result<Parameter> {
                match value {
                    Value::$variant(v) => Ok(Parameter::new(
                        Format::Binary,
                        PgType::$wire.oid(),
                        write_with(self.allocator.as_ref(), $width, |b| b.$put(*v)),
                    )),
                    other => Err(unexpected_value(self.name(), other)),
                }
            }

            fn encode_null(&self) -> Parameter {
                Parameter::null(Format::Binary, PgType::$wire.oid())
            }
        }
    };
}

integer_codec!(
    /// Codec for [`Value::Int16`], encoded as binary `int2`.
    Int16Codec, "int2", i16, Int16, Int2, put_i16, 2
);
integer_codec!(
    /// Codec for [`Value::Int32`], encoded as binary `int4`.
    Int32Codec, "int4", i32, Int32, Int4, put_i32, 4
);
integer_codec!(
    /// Codec for [`Value::Int64`], encoded as binary `int8`.
    Int64Codec, "int8", i64, Int64, Int8, put_i64, 8
);
float_codec!(
    /// Codec for [`Value::Float32`], encoded as binary `float4`.
    ///
    /// `float8` wire values are narrowed and may lose precision.
    Float32Codec, "float4", f32, Float32, Float4, put_f32, 4
);
float_codec!(
    /// Codec for [`Value::Float64`], encoded as binary `float8`.
    Float64Codec, "float8", f64, Float64, Float8, put_f64, 8
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::heap;

    fn decode(codec: &dyn Codec, bytes: &[u8], ty: PgType, format: Format) -> Result<Value> {
        let mut cursor = ByteCursor::new(bytes);
        codec.decode_value(&mut cursor, ty, format, &codec.value_type())
    }

    #[test]
    fn test_int32_encode_binary() {
        let codec = Int32Codec::new(heap());
        let param = codec.encode(&Value::Int32(-2)).unwrap();
        assert_eq!(param.format(), Format::Binary);
        assert_eq!(param.pg_type(), Some(PgType::Int4));
        assert_eq!(param.payload(), Some(&[0xFF, 0xFF, 0xFF, 0xFE][..]));
    }

    #[test]
    fn test_int32_decodes_all_widths() {
        let codec = Int32Codec::new(heap());
        assert_eq!(
            decode(&codec, &7i16.to_be_bytes(), PgType::Int2, Format::Binary).unwrap(),
            Value::Int32(7)
        );
        assert_eq!(
            decode(&codec, &7i64.to_be_bytes(), PgType::Int8, Format::Binary).unwrap(),
            Value::Int32(7)
        );
        assert_eq!(
            decode(&codec, b" -12 ", PgType::Int4, Format::Text).unwrap(),
            Value::Int32(-12)
        );
    }

    #[test]
    fn test_int16_out_of_range() {
        let codec = Int16Codec::new(heap());
        let err = decode(&codec, b"70000", PgType::Int4, Format::Text).unwrap_err();
        assert!(err.is_invalid_value());
        assert!(err.to_string().contains("70000 is out of range"));
    }

    #[test]
    fn test_integer_rejects_garbage() {
        let codec = Int64Codec::new(heap());
        assert!(decode(&codec, b"12x", PgType::Int8, Format::Text)
            .unwrap_err()
            .is_invalid_value());
        assert!(matches!(
            decode(&codec, &[0, 1], PgType::Int8, Format::Binary).unwrap_err(),
            CodecError::BufferTooShort { .. }
        ));
        assert!(decode(&codec, &[0, 0, 0, 1, 9], PgType::Int4, Format::Binary)
            .unwrap_err()
            .is_invalid_value());
    }

    #[test]
    fn test_claims_any_only_own_width() {
        let int2 = Int16Codec::new(heap());
        let int4 = Int32Codec::new(heap());
        assert!(int2.can_decode(PgType::Int2.oid(), Format::Binary, &ValueType::Any));
        assert!(!int4.can_decode(PgType::Int2.oid(), Format::Binary, &ValueType::Any));
        assert!(int4.can_decode(PgType::Int2.oid(), Format::Binary, &ValueType::Int32));
    }

    #[test]
    fn test_float_decode_text_specials() {
        let codec = Float64Codec::new(heap());
        assert_eq!(
            decode(&codec, b"Infinity", PgType::Float8, Format::Text).unwrap(),
            Value::Float64(f64::INFINITY)
        );
        assert_eq!(
            decode(&codec, b"1.5", PgType::Float4, Format::Text).unwrap(),
            Value::Float64(1.5)
        );
    }

    #[test]
    fn test_float32_widens_from_float4_binary() {
        let codec = Float32Codec::new(heap());
        assert_eq!(
            decode(&codec, &0.25f32.to_be_bytes(), PgType::Float4, Format::Binary).unwrap(),
            Value::Float32(0.25)
        );
        assert_eq!(
            decode(&codec, &0.5f64.to_be_bytes(), PgType::Float8, Format::Binary).unwrap(),
            Value::Float32(0.5)
        );
    }

    #[test]
    fn test_encode_null_uses_own_width() {
        assert_eq!(
            Int64Codec::new(heap()).encode_null(),
            Parameter::null(Format::Binary, PgType::Int8.oid())
        );
        assert_eq!(
            Float32Codec::new(heap()).encode_null(),
            Parameter::null(Format::Binary, PgType::Float4.oid())
        );
    }
}
