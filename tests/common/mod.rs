// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pgcodec::buffer::ByteCursor;
use pgcodec::{Codec, CodecRegistry, Format, Parameter, PgType, Result, Value, ValueType};

// ============================================================================
// Spy codec
// ============================================================================

/// Number of calls a [`SpyCodec`] received, per method.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub can_decode: AtomicUsize,
    pub decode: AtomicUsize,
    pub can_encode: AtomicUsize,
    pub encode: AtomicUsize,
    pub can_encode_null: AtomicUsize,
    pub encode_null: AtomicUsize,
}

impl CallCounts {
    /// Total number of calls across all methods.
    pub fn total(&self) -> usize {
        [
            &self.can_decode,
            &self.decode,
            &self.can_encode,
            &self.encode,
            &self.can_encode_null,
            &self.encode_null,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

/// Codec claiming `text` values that records every call it receives.
///
/// Decoding always yields `Value::Text(label)`, and encoding produces a text
/// `varchar` parameter whose payload is `label`, so tests can tell which
/// codec answered.
pub struct SpyCodec {
    label: String,
    accept: bool,
    pub calls: Arc<CallCounts>,
}

impl SpyCodec {
    /// A spy that accepts every text request.
    pub fn accepting(label: &str) -> Self {
        Self {
            label: label.to_string(),
            accept: true,
            calls: Arc::new(CallCounts::default()),
        }
    }

    /// A spy whose probes always answer `false`.
    pub fn rejecting(label: &str) -> Self {
        Self {
            accept: false,
            ..Self::accepting(label)
        }
    }
}

impl Codec for SpyCodec {
    fn name(&self) -> &str {
        &self.label
    }

    fn value_type(&self) -> ValueType {
        ValueType::Text
    }

    fn supports(&self, ty: PgType, _format: Format) -> bool {
        self.accept && matches!(ty, PgType::Text | PgType::Varchar)
    }

    fn can_decode(&self, oid: u32, format: Format, target: &ValueType) -> bool {
        bump(&self.calls.can_decode);
        (target.is_any() || *target == ValueType::Text)
            && PgType::from_oid(oid).is_some_and(|ty| self.supports(ty, format))
    }

    fn can_encode(&self, value: &Value) -> bool {
        bump(&self.calls.can_encode);
        self.accept && matches!(value, Value::Text(_))
    }

    fn can_encode_null(&self, target: &ValueType) -> bool {
        bump(&self.calls.can_encode_null);
        self.accept && *target == ValueType::Text
    }

    fn decode_value(
        &self,
        buffer: &mut ByteCursor<'_>,
        _ty: PgType,
        _format: Format,
        _target: &ValueType,
    ) -> Result<Value> {
        bump(&self.calls.decode);
        buffer.read_remaining();
        Ok(Value::Text(self.label.clone()))
    }

    fn encode(&self, _value: &Value) -> Result<Parameter> {
        bump(&self.calls.encode);
        Ok(Parameter::new(
            Format::Text,
            PgType::Varchar.oid(),
            self.label.as_bytes().to_vec(),
        ))
    }

    fn encode_null(&self) -> Parameter {
        bump(&self.calls.encode_null);
        Parameter::null(Format::Text, PgType::Varchar.oid())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Decode `bytes` through `registry`.
pub fn decode(
    registry: &CodecRegistry,
    bytes: &[u8],
    ty: PgType,
    format: Format,
    target: &ValueType,
) -> Result<Option<Value>> {
    let mut cursor = ByteCursor::new(bytes);
    registry.decode(Some(&mut cursor), ty.oid(), format, target)
}

/// Encode `value`, then decode the produced parameter back into its category.
pub fn round_trip(registry: &CodecRegistry, value: &Value) -> Value {
    let param = registry.encode(value).expect("encode");
    let payload = param.payload().expect("non-null payload");
    let mut cursor = ByteCursor::new(payload);
    registry
        .decode(
            Some(&mut cursor),
            param.oid(),
            param.format(),
            &value.value_type(),
        )
        .expect("decode")
        .expect("non-null value")
}
