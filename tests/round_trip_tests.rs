// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encoding a value and decoding the resulting parameter yields the value.

mod common;

use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use common::round_trip;
use pgcodec::{CodecRegistry, EnumType, Value};
use proptest::prelude::*;

fn assert_round_trip(value: Value) {
    let registry = CodecRegistry::default();
    assert_eq!(round_trip(&registry, &value), value);
}

#[test]
fn test_scalar_round_trips() {
    let values = vec![
        Value::Bool(true),
        Value::Bool(false),
        Value::Char('ß'),
        Value::from("plain text, with \"quotes\""),
        Value::from(""),
        Value::Bytes(vec![0, 1, 0xFE, 0xFF]),
        Value::Bytes(Vec::new()),
        Value::Uuid(uuid::Uuid::new_v4()),
        Value::Json(serde_json::json!({"nested": {"list": [1, null, "x"]}})),
        Value::Inet("192.0.2.7".parse().unwrap()),
        Value::Inet(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1))),
    ];
    for value in values {
        assert_round_trip(value);
    }
}

#[test]
fn test_numeric_round_trips() {
    for text in ["0", "12.50", "-0.000001", "123456789012345678901234567890.123456789"] {
        assert_round_trip(Value::Numeric(BigDecimal::from_str(text).unwrap()));
    }
}

#[test]
fn test_refcursor_round_trip() {
    assert_round_trip(Value::RefCursor("<unnamed portal 3>".to_string()));
}

#[test]
fn test_temporal_round_trips() {
    let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
    let time = NaiveTime::from_hms_micro_opt(23, 59, 58, 123_456).unwrap();
    assert_round_trip(Value::Date(date));
    assert_round_trip(Value::Time(time));
    assert_round_trip(Value::Timestamp(date.and_time(time)));
    assert_round_trip(Value::from(
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap(),
    ));

    let offset = chrono::FixedOffset::east_opt(-(3 * 3600 + 1800)).unwrap();
    assert_round_trip(Value::TimestampTz(
        date.and_time(time).and_local_timezone(offset).unwrap(),
    ));
}

#[test]
fn test_array_round_trips() {
    assert_round_trip(Value::Int16Array(vec![Some(-1), None, Some(i16::MAX)]));
    assert_round_trip(Value::Int32Array(vec![]));
    assert_round_trip(Value::Int64Array(vec![Some(i64::MIN), None]));
    assert_round_trip(Value::TextArray(vec![
        Some("a".to_string()),
        None,
        Some("NULL".to_string()),
        Some(r#"{"brace", \slash}"#.to_string()),
        Some(String::new()),
    ]));
}

#[test]
fn test_enum_round_trip() {
    let weekday = EnumType::new("weekday", ["MON", "TUE", "WED"]);
    for symbol in weekday.variants() {
        assert_round_trip(Value::Enum(weekday.value_of(symbol).unwrap()));
    }
}

proptest! {
    #[test]
    fn prop_int16_round_trip(v in any::<i16>()) {
        let registry = CodecRegistry::default();
        prop_assert_eq!(round_trip(&registry, &Value::Int16(v)), Value::Int16(v));
    }

    #[test]
    fn prop_int32_round_trip(v in any::<i32>()) {
        let registry = CodecRegistry::default();
        prop_assert_eq!(round_trip(&registry, &Value::Int32(v)), Value::Int32(v));
    }

    #[test]
    fn prop_int64_round_trip(v in any::<i64>()) {
        let registry = CodecRegistry::default();
        prop_assert_eq!(round_trip(&registry, &Value::Int64(v)), Value::Int64(v));
    }

    #[test]
    fn prop_float64_round_trip(v in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
        let registry = CodecRegistry::default();
        prop_assert_eq!(round_trip(&registry, &Value::Float64(v)), Value::Float64(v));
    }

    #[test]
    fn prop_float32_round_trip(v in proptest::num::f32::NORMAL | proptest::num::f32::ZERO) {
        let registry = CodecRegistry::default();
        prop_assert_eq!(round_trip(&registry, &Value::Float32(v)), Value::Float32(v));
    }

    #[test]
    fn prop_numeric_round_trip(mantissa in any::<i64>(), scale in 0u32..30) {
        let registry = CodecRegistry::default();
        let text = format!("{mantissa}E-{scale}");
        let value = Value::Numeric(BigDecimal::from_str(&text).unwrap());
        prop_assert_eq!(round_trip(&registry, &value), value);
    }

    #[test]
    fn prop_text_round_trip(s in "\\PC*") {
        let registry = CodecRegistry::default();
        prop_assert_eq!(round_trip(&registry, &Value::Text(s.clone())), Value::Text(s));
    }
}
