// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codecs converting between [`Value`]s and their wire representation.
//!
//! ## Architecture
//!
//! - **Core trait** ([`Codec`]) - the capability contract every codec satisfies
//! - **Built-in codecs** - one module per value category
//! - **Registry** ([`CodecRegistry`]) - ordered, first-match resolution
//!
//! A codec declares the native category it serves ([`Codec::value_type`]) and
//! a compatibility table of wire types and formats ([`Codec::supports`]). The
//! provided probe methods combine both, so most codecs only implement the
//! table and the two actions.
//!
//! ## Example
//!
//! ```
//! use pgcodec::buffer::ByteCursor;
//! use pgcodec::codec::CodecRegistry;
//! use pgcodec::{Format, PgType, Value, ValueType};
//!
//! # fn main() -> pgcodec::Result<()> {
//! let registry = CodecRegistry::default();
//!
//! let param = registry.encode(&Value::Int32(42))?;
//! assert_eq!(param.pg_type(), Some(PgType::Int4));
//!
//! let mut cursor = ByteCursor::new(param.payload().unwrap_or_default());
//! let value = registry.decode(Some(&mut cursor), param.oid(), param.format(), &ValueType::Any)?;
//! assert_eq!(value, Some(Value::Int32(42)));
//! # Ok(())
//! # }
//! ```

pub mod array;
pub mod boolean;
pub mod bytea;
pub mod decimal;
pub mod enumeration;
pub mod inet;
pub mod json;
pub mod numeric;
pub mod registry;
pub mod string;
pub mod temporal;
pub mod uuid;

use std::str::FromStr;

use crate::buffer::ByteCursor;
use crate::core::{CodecError, Format, Oid, Parameter, PgType, Result, Value, ValueType};

pub use array::ArrayCodec;
pub use boolean::BoolCodec;
pub use bytea::BytesCodec;
pub use decimal::NumericCodec;
pub use enumeration::EnumCodec;
pub use inet::InetCodec;
pub use json::JsonCodec;
pub use numeric::{Float32Codec, Float64Codec, Int16Codec, Int32Codec, Int64Codec};
pub use registry::CodecRegistry;
pub use string::{CharCodec, RefCursorCodec, RefCursorNameCodec, StringCodec};
pub use temporal::{DateCodec, TimeCodec, TimestampCodec, TimestampTzCodec};
pub use self::uuid::UuidCodec;

/// Capability contract for converting one category of native values.
///
/// The `can_*` probes are side-effect free and never fail; the registry uses
/// them purely for routing. An action (`encode`, `decode`, `encode_null`) is
/// only invoked after the matching probe returned `true`.
pub trait Codec: Send + Sync {
    /// Stable identifier, used by configuration and diagnostics.
    fn name(&self) -> &str;

    /// The native category this codec declares itself responsible for.
    fn value_type(&self) -> ValueType;

    /// Compatibility table: whether `ty` in `format` can be decoded.
    fn supports(&self, ty: PgType, format: Format) -> bool;

    /// Whether this codec claims `ty` when the caller decodes into
    /// [`ValueType::Any`]. Defaults to every supported type.
    fn claims_any(&self, ty: PgType) -> bool {
        let _ = ty;
        true
    }

    /// Decode a value whose type was already resolved and checked.
    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        target: &ValueType,
    ) -> Result<Value>;

    /// Encode a value accepted by [`Codec::can_encode`].
    fn encode(&self, value: &Value) -> Result<Parameter>;

    /// Encode SQL NULL for this codec's wire type.
    fn encode_null(&self) -> Parameter;

    /// Probe: can `oid` in `format` be decoded into `target`?
    fn can_decode(&self, oid: Oid, format: Format, target: &ValueType) -> bool {
        let Some(ty) = PgType::from_oid(oid) else {
            return false;
        };
        let target_matches = if target.is_any() {
            self.claims_any(ty)
        } else {
            *target == self.value_type()
        };
        target_matches && self.supports(ty, format)
    }

    /// Probe: can `value` be encoded?
    fn can_encode(&self, value: &Value) -> bool {
        value.value_type() == self.value_type()
    }

    /// Probe: can NULL be encoded for `target`?
    fn can_encode_null(&self, target: &ValueType) -> bool {
        *target == self.value_type()
    }

    /// Decode `buffer`, resolving `oid` first.
    fn decode(
        &self,
        buffer: &mut ByteCursor<'_>,
        oid: Oid,
        format: Format,
        target: &ValueType,
    ) -> Result<Value> {
        let ty = PgType::resolve(oid)?;
        self.decode_value(buffer, ty, format, target)
    }
}

/// Error for a value handed to a codec that does not serve its category.
pub(crate) fn unexpected_value(codec: &str, value: &Value) -> CodecError {
    CodecError::invalid_argument(format!(
        "{codec} codec cannot encode a value of type {}",
        value.value_type()
    ))
}

/// Error for a wire type that slipped past a codec's compatibility table.
pub(crate) fn unexpected_type(codec: &str, ty: PgType, format: Format) -> CodecError {
    CodecError::invalid_argument(format!(
        "{codec} codec cannot decode {ty} in {format} format"
    ))
}

/// Parse a textual wire value.
pub(crate) fn parse_text<T: FromStr>(ty: PgType, text: &str) -> Result<T> {
    text.parse::<T>()
        .map_err(|_| CodecError::invalid_value(ty.name(), format!("cannot parse '{text}'")))
}

/// Fail unless the cursor consumed the whole value.
pub(crate) fn expect_end(buffer: &ByteCursor<'_>, ty: PgType) -> Result<()> {
    if buffer.is_at_end() {
        Ok(())
    } else {
        Err(CodecError::invalid_value(
            ty.name(),
            format!("{} trailing bytes", buffer.remaining()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::heap;

    #[test]
    fn test_default_probes_on_string_codec() {
        let codec = StringCodec::new(heap());
        let varchar = PgType::Varchar.oid();

        assert!(codec.can_decode(varchar, Format::Text, &ValueType::Text));
        assert!(codec.can_decode(varchar, Format::Text, &ValueType::Any));
        assert!(!codec.can_decode(varchar, Format::Text, &ValueType::Int32));
        assert!(!codec.can_decode(4242, Format::Text, &ValueType::Text));
        assert!(!codec.can_decode(PgType::Int4.oid(), Format::Text, &ValueType::Text));

        assert!(codec.can_encode(&Value::from("x")));
        assert!(!codec.can_encode(&Value::Int32(1)));

        assert!(codec.can_encode_null(&ValueType::Text));
        assert!(!codec.can_encode_null(&ValueType::Any));
    }

    #[test]
    fn test_decode_rejects_unknown_oid() {
        let codec = StringCodec::new(heap());
        let mut cursor = ByteCursor::new(b"x");
        let err = codec
            .decode(&mut cursor, 4242, Format::Text, &ValueType::Text)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_parse_text_error_names_type() {
        let err = parse_text::<i32>(PgType::Int4, "abc").unwrap_err();
        assert_eq!(err.to_string(), "Invalid int4 value: cannot parse 'abc'");
    }
}
