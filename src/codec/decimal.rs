// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Arbitrary-precision `numeric` codec.
//!
//! The binary format of `numeric` is a header followed by base-10000 digits:
//!
//! ```text
//! i16 ndigits | i16 weight | u16 sign | u16 dscale | i16 digit * ndigits
//! ```
//!
//! `weight` is the power of 10000 of the first digit and `dscale` the number
//! of decimal digits after the point. `NaN` and the infinities have no
//! [`BigDecimal`] counterpart and are rejected.

use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;

use super::numeric::{decode_float, decode_integer};
use super::{expect_end, parse_text, unexpected_value, Codec};
use crate::buffer::{write_str, ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

const SIGN_POSITIVE: u16 = 0x0000;
const SIGN_NEGATIVE: u16 = 0x4000;
const SIGN_NAN: u16 = 0xC000;
const SIGN_INFINITY: u16 = 0xD000;
const SIGN_NEG_INFINITY: u16 = 0xF000;

const DIGIT_BASE: i16 = 10_000;

fn not_finite(ty: PgType) -> CodecError {
    CodecError::invalid_value(ty.name(), "NaN and infinity are not representable")
}

fn read_numeric(buffer: &mut ByteCursor<'_>, ty: PgType) -> Result<BigDecimal> {
    let ndigits = buffer.read_i16()?;
    let weight = buffer.read_i16()?;
    let sign = buffer.read_i16()? as u16;
    let dscale = buffer.read_i16()? as u16;

    let negative = match sign {
        SIGN_POSITIVE => false,
        SIGN_NEGATIVE => true,
        SIGN_NAN | SIGN_INFINITY | SIGN_NEG_INFINITY => return Err(not_finite(ty)),
        other => {
            return Err(CodecError::invalid_value(
                ty.name(),
                format!("invalid sign 0x{other:04x}"),
            ))
        }
    };
    if ndigits < 0 {
        return Err(CodecError::invalid_value(
            ty.name(),
            format!("negative digit count {ndigits}"),
        ));
    }

    let mut mantissa = String::with_capacity(ndigits as usize * 4 + 1);
    if negative {
        mantissa.push('-');
    }
    for _ in 0..ndigits {
        let digit = buffer.read_i16()?;
        if !(0..DIGIT_BASE).contains(&digit) {
            return Err(CodecError::invalid_value(
                ty.name(),
                format!("digit {digit} out of range"),
            ));
        }
        mantissa.push_str(&format!("{digit:04}"));
    }
    expect_end(buffer, ty)?;

    let scale = i64::from(dscale);
    if ndigits == 0 {
        return Ok(BigDecimal::from(0).with_scale(scale));
    }
    let exponent = 4 * (i64::from(weight) - i64::from(ndigits) + 1);
    let value = BigDecimal::from_str(&format!("{mantissa}E{exponent}"))
        .map_err(|e| CodecError::invalid_value(ty.name(), e.to_string()))?;
    Ok(value.with_scale(scale))
}

fn from_float(value: f64, ty: PgType) -> Result<BigDecimal> {
    if !value.is_finite() {
        return Err(not_finite(ty));
    }
    // Display of f64 is the shortest exact round-trip form, never exponential
    parse_text(ty, &value.to_string())
}

/// Codec for [`Value::Numeric`], encoded as text `numeric`.
///
/// Also reads the integer and floating-point types when asked for a
/// [`ValueType::Numeric`] target. For [`ValueType::Any`] it only claims
/// `numeric` columns.
pub struct NumericCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl NumericCodec {
    /// Create a numeric codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for NumericCodec {
    fn name(&self) -> &str {
        "numeric"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Numeric
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        matches!(
            ty,
            PgType::Numeric
                | PgType::Int2
                | PgType::Int4
                | PgType::Int8
                | PgType::Float4
                | PgType::Float8
        )
    }

    fn claims_any(&self, ty: PgType) -> bool {
        ty == PgType::Numeric
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        let value = match (ty, format) {
            (_, Format::Text) => parse_text(ty, buffer.read_str()?.trim())?,
            (PgType::Numeric, Format::Binary) => read_numeric(buffer, ty)?,
            (PgType::Float4 | PgType::Float8, Format::Binary) => {
                from_float(decode_float(buffer, ty, format)?, ty)?
            }
            (_, Format::Binary) => BigDecimal::from(decode_integer(buffer, ty, format)?),
        };
        Ok(Value::Numeric(value))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Numeric(v) => Ok(Parameter::new(
                Format::Text,
                PgType::Numeric.oid(),
                write_str(self.allocator.as_ref(), &v.to_string()),
            )),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, PgType::Numeric.oid())
    }
}
