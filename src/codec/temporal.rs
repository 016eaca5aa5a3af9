// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Date and time codecs.
//!
//! Binary values count from the server epoch, 2000-01-01: `date` in days,
//! `time` in microseconds since midnight, and `timestamp`/`timestamptz` in
//! microseconds. The special values `infinity` and `-infinity` have no
//! native counterpart and are rejected. All temporal values are encoded in
//! text format.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::{expect_end, unexpected_value, Codec};
use crate::buffer::{write_str, ByteAllocator, ByteCursor};
use crate::core::{CodecError, Format, Parameter, PgType, Result, Value, ValueType};

/// 2000-01-01 counted from 0001-01-01 as day one.
const EPOCH_DAYS_FROM_CE: i32 = 730_120;
/// 2000-01-01T00:00:00Z in microseconds since the Unix epoch.
const EPOCH_UNIX_MICROS: i64 = 946_684_800_000_000;
const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

fn out_of_range(ty: PgType, raw: impl std::fmt::Display) -> CodecError {
    CodecError::invalid_value(ty.name(), format!("{raw} is out of range"))
}

fn parse_error(ty: PgType, text: &str) -> CodecError {
    CodecError::invalid_value(ty.name(), format!("cannot parse '{text}'"))
}

fn read_text<'a>(buffer: &mut ByteCursor<'a>) -> Result<&'a str> {
    Ok(buffer.read_str()?.trim())
}

fn read_micros(buffer: &mut ByteCursor<'_>, ty: PgType) -> Result<i64> {
    let micros = buffer.read_i64()?;
    expect_end(buffer, ty)?;
    if micros == i64::MAX || micros == i64::MIN {
        return Err(CodecError::invalid_value(
            ty.name(),
            "infinite timestamps are not supported",
        ));
    }
    Ok(micros)
}

fn timestamp_from_micros(micros: i64, ty: PgType) -> Result<DateTime<Utc>> {
    micros
        .checked_add(EPOCH_UNIX_MICROS)
        .and_then(DateTime::<Utc>::from_timestamp_micros)
        .ok_or_else(|| out_of_range(ty, micros))
}

fn parse_timestamp(text: &str, ty: PgType) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|_| parse_error(ty, text))
}

fn encode_text(allocator: &dyn ByteAllocator, ty: PgType, text: &str) -> Parameter {
    Parameter::new(Format::Text, ty.oid(), write_str(allocator, text))
}

/// Codec for [`Value::Date`].
pub struct DateCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl DateCodec {
    /// Create a date codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for DateCodec {
    fn name(&self) -> &str {
        "date"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Date
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty == PgType::Date
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        let date = match format {
            Format::Text => {
                let text = read_text(buffer)?;
                NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| parse_error(ty, text))?
            }
            Format::Binary => {
                let days = buffer.read_i32()?;
                expect_end(buffer, ty)?;
                if days == i32::MAX || days == i32::MIN {
                    return Err(CodecError::invalid_value(
                        ty.name(),
                        "infinite dates are not supported",
                    ));
                }
                days.checked_add(EPOCH_DAYS_FROM_CE)
                    .and_then(NaiveDate::from_num_days_from_ce_opt)
                    .ok_or_else(|| out_of_range(ty, days))?
            }
        };
        Ok(Value::Date(date))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Date(date) => Ok(encode_text(
                self.allocator.as_ref(),
                PgType::Date,
                &date.format(DATE_FORMAT).to_string(),
            )),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, PgType::Date.oid())
    }
}

/// Codec for [`Value::Time`], a time of day without zone.
pub struct TimeCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl TimeCodec {
    /// Create a time codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for TimeCodec {
    fn name(&self) -> &str {
        "time"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Time
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty == PgType::Time
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        let time = match format {
            Format::Text => {
                let text = read_text(buffer)?;
                NaiveTime::parse_from_str(text, TIME_FORMAT).map_err(|_| parse_error(ty, text))?
            }
            Format::Binary => {
                let micros = buffer.read_i64()?;
                expect_end(buffer, ty)?;
                if !(0..MICROS_PER_DAY).contains(&micros) {
                    return Err(out_of_range(ty, micros));
                }
                NaiveTime::from_num_seconds_from_midnight_opt(
                    (micros / MICROS_PER_SECOND) as u32,
                    (micros % MICROS_PER_SECOND) as u32 * 1_000,
                )
                .ok_or_else(|| out_of_range(ty, micros))?
            }
        };
        Ok(Value::Time(time))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Time(time) => Ok(encode_text(
                self.allocator.as_ref(),
                PgType::Time,
                &time.format(TIME_FORMAT).to_string(),
            )),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, PgType::Time.oid())
    }
}

/// Codec for [`Value::Timestamp`], a date and time without zone.
pub struct TimestampCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl TimestampCodec {
    /// Create a timestamp codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for TimestampCodec {
    fn name(&self) -> &str {
        "timestamp"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Timestamp
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        ty == PgType::Timestamp
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        let timestamp = match format {
            Format::Text => parse_timestamp(read_text(buffer)?, ty)?,
            Format::Binary => timestamp_from_micros(read_micros(buffer, ty)?, ty)?.naive_utc(),
        };
        Ok(Value::Timestamp(timestamp))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::Timestamp(ts) => Ok(encode_text(
                self.allocator.as_ref(),
                PgType::Timestamp,
                &ts.format(TIMESTAMP_FORMAT).to_string(),
            )),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, PgType::Timestamp.oid())
    }
}

/// Codec for [`Value::TimestampTz`], an instant with a UTC offset.
///
/// Also reads `timestamp` columns, taking the value as UTC. Binary values
/// carry no offset and decode with a zero offset.
pub struct TimestampTzCodec {
    allocator: Arc<dyn ByteAllocator>,
}

impl TimestampTzCodec {
    /// Create a zoned timestamp codec drawing payload storage from `allocator`.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self { allocator }
    }
}

impl Codec for TimestampTzCodec {
    fn name(&self) -> &str {
        "timestamptz"
    }

    fn value_type(&self) -> ValueType {
        ValueType::TimestampTz
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        matches!(ty, PgType::Timestamptz | PgType::Timestamp)
    }

    fn claims_any(&self, ty: PgType) -> bool {
        ty == PgType::Timestamptz
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        ty: PgType,
        format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        let instant = match (format, ty) {
            (Format::Binary, _) => {
                timestamp_from_micros(read_micros(buffer, ty)?, ty)?.fixed_offset()
            }
            (Format::Text, PgType::Timestamp) => {
                parse_timestamp(read_text(buffer)?, ty)?.and_utc().fixed_offset()
            }
            (Format::Text, _) => {
                let text = read_text(buffer)?;
                DateTime::<FixedOffset>::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z")
                    .or_else(|_| DateTime::parse_from_rfc3339(text))
                    .map_err(|_| parse_error(ty, text))?
            }
        };
        Ok(Value::TimestampTz(instant))
    }

    fn encode(&self, value: &Value) -> Result<Parameter> {
        match value {
            Value::TimestampTz(ts) => Ok(encode_text(
                self.allocator.as_ref(),
                PgType::Timestamptz,
                &ts.format("%Y-%m-%d %H:%M:%S%.f%:z").to_string(),
            )),
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn encode_null(&self) -> Parameter {
        Parameter::null(Format::Text, PgType::Timestamptz.oid())
    }
}
