// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Ordered codec registry with first-match resolution.
//!
//! The registry keeps its codecs in an immutable list behind a `RwLock`.
//! Registration copies the list, inserts the codec and swaps the new list
//! in; resolution clones the current list handle and scans it without
//! holding any lock, so readers never see a half-updated list.
//!
//! # Example
//!
//! ```
//! use pgcodec::buffer::ByteCursor;
//! use pgcodec::codec::CodecRegistry;
//! use pgcodec::{EnumType, Format, PgType, Value};
//!
//! # fn main() -> pgcodec::Result<()> {
//! let registry = CodecRegistry::default();
//! let mood = EnumType::new("mood", ["HAPPY", "SAD"]);
//!
//! let mut cursor = ByteCursor::new(b"SAD");
//! let value = registry.decode(
//!     Some(&mut cursor),
//!     PgType::Varchar.oid(),
//!     Format::Text,
//!     &mood.value_type(),
//! )?;
//! assert_eq!(value, Some(Value::Enum(mood.value_of("SAD")?)));
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, trace};

use super::{
    ArrayCodec, BoolCodec, BytesCodec, CharCodec, Codec, DateCodec, EnumCodec, Float32Codec,
    Float64Codec, InetCodec, Int16Codec, Int32Codec, Int64Codec, JsonCodec, NumericCodec,
    RefCursorCodec, RefCursorNameCodec, StringCodec, TimeCodec, TimestampCodec,
    TimestampTzCodec, UuidCodec,
};
use crate::buffer::{heap, ByteAllocator, ByteCursor};
use crate::config::CodecConfig;
use crate::core::{CodecError, Format, FromValue, Oid, Parameter, Result, Value, ValueType};

type CodecList = Arc<Vec<Arc<dyn Codec>>>;

/// Built-in codecs in their default resolution order.
pub fn builtin_codecs(allocator: &Arc<dyn ByteAllocator>) -> Vec<Arc<dyn Codec>> {
    vec![
        Arc::new(StringCodec::new(allocator.clone())),
        Arc::new(TimestampTzCodec::new(allocator.clone())),
        Arc::new(BytesCodec::new(allocator.clone())),
        Arc::new(NumericCodec::new(allocator.clone())),
        Arc::new(BoolCodec::new(allocator.clone())),
        Arc::new(CharCodec::new(allocator.clone())),
        Arc::new(Float64Codec::new(allocator.clone())),
        Arc::new(Float32Codec::new(allocator.clone())),
        Arc::new(InetCodec::new(allocator.clone())),
        Arc::new(Int32Codec::new(allocator.clone())),
        Arc::new(DateCodec::new(allocator.clone())),
        Arc::new(TimestampCodec::new(allocator.clone())),
        Arc::new(TimeCodec::new(allocator.clone())),
        Arc::new(Int64Codec::new(allocator.clone())),
        Arc::new(Int16Codec::new(allocator.clone())),
        Arc::new(UuidCodec::new(allocator.clone())),
        Arc::new(EnumCodec::new(allocator.clone())),
        Arc::new(JsonCodec::new(allocator.clone())),
        Arc::new(RefCursorCodec::new(allocator.clone())),
        Arc::new(RefCursorNameCodec::new(allocator.clone())),
        Arc::new(ArrayCodec::int16(allocator.clone())),
        Arc::new(ArrayCodec::text(allocator.clone())),
        Arc::new(ArrayCodec::int32(allocator.clone())),
        Arc::new(ArrayCodec::int64(allocator.clone())),
    ]
}

/// Ordered collection of codecs for one session.
///
/// Earlier codecs take priority: every lookup returns the first codec whose
/// probe accepts the request. Several codecs may cover the same wire type.
pub struct CodecRegistry {
    codecs: RwLock<CodecList>,
}

impl Default for CodecRegistry {
    /// Registry with the built-in codecs, allocating from the heap.
    fn default() -> Self {
        Self::new(heap())
    }
}

impl CodecRegistry {
    /// Create a registry holding the built-in codecs in default order.
    pub fn new(allocator: Arc<dyn ByteAllocator>) -> Self {
        Self::from_codecs(builtin_codecs(&allocator))
    }

    /// Create a registry without any codec.
    pub fn empty() -> Self {
        Self::from_codecs(Vec::new())
    }

    /// Create a registry from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an invalid-argument error if `disabled_codecs` names a codec
    /// that is not built in.
    pub fn with_config(config: &CodecConfig) -> Result<Self> {
        let builtins = builtin_codecs(&config.allocator());
        if let Some(unknown) = config
            .disabled_codecs
            .iter()
            .find(|name| !builtins.iter().any(|c| c.name() == name.as_str()))
        {
            return Err(CodecError::invalid_argument(format!(
                "unknown codec '{unknown}' in disabled_codecs"
            )));
        }
        let codecs: Vec<_> = builtins
            .into_iter()
            .filter(|c| !config.is_disabled(c.name()))
            .collect();
        debug!(
            codecs = codecs.len(),
            disabled = ?config.disabled_codecs,
            pooled = config.pool.enabled,
            "built codec registry from config"
        );
        Ok(Self::from_codecs(codecs))
    }

    fn from_codecs(codecs: Vec<Arc<dyn Codec>>) -> Self {
        Self {
            codecs: RwLock::new(Arc::new(codecs)),
        }
    }

    /// Current list handle. The lock is released before the caller scans.
    fn current(&self) -> CodecList {
        self.codecs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update(&self, insert: impl FnOnce(&mut Vec<Arc<dyn Codec>>)) {
        let mut guard = self.codecs.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend(guard.iter().cloned());
        insert(&mut next);
        *guard = Arc::new(next);
    }

    /// Register a codec ahead of every existing one.
    pub fn add_first(&self, codec: Arc<dyn Codec>) {
        debug!(codec = codec.name(), position = "first", "registering codec");
        self.update(|codecs| codecs.insert(0, codec));
    }

    /// Register a codec after every existing one.
    pub fn add_last(&self, codec: Arc<dyn Codec>) {
        debug!(codec = codec.name(), position = "last", "registering codec");
        self.update(|codecs| codecs.push(codec));
    }

    /// Decode a received value.
    ///
    /// A `None` buffer is SQL NULL and yields `Ok(None)` without consulting
    /// any codec. Errors raised by the selected codec are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-type error if no codec can decode `oid` in
    /// `format` into `target`.
    pub fn decode(
        &self,
        buffer: Option<&mut ByteCursor<'_>>,
        oid: Oid,
        format: Format,
        target: &ValueType,
    ) -> Result<Option<Value>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let codecs = self.current();
        match codecs.iter().find(|c| c.can_decode(oid, format, target)) {
            Some(codec) => {
                trace!(codec = codec.name(), oid, %format, %target, "decoding value");
                codec.decode(buffer, oid, format, target).map(Some)
            }
            None => {
                debug!(oid, %format, %target, "no codec can decode");
                Err(CodecError::unsupported_type("decode value", target.to_string()))
            }
        }
    }

    /// Decode a received value straight into a native Rust type.
    pub fn decode_as<T: FromValue>(
        &self,
        buffer: Option<&mut ByteCursor<'_>>,
        oid: Oid,
        format: Format,
    ) -> Result<Option<T>> {
        self.decode(buffer, oid, format, &T::value_type())?
            .map(T::from_value)
            .transpose()
    }

    /// Encode a value as a bind parameter.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-type error naming the value's category if no
    /// codec accepts it.
    pub fn encode(&self, value: &Value) -> Result<Parameter> {
        let codecs = self.current();
        match codecs.iter().find(|c| c.can_encode(value)) {
            Some(codec) => {
                trace!(codec = codec.name(), value_type = %value.value_type(), "encoding value");
                codec.encode(value)
            }
            None => {
                let value_type = value.value_type();
                debug!(%value_type, "no codec can encode");
                Err(CodecError::unsupported_type(
                    "encode parameter",
                    value_type.to_string(),
                ))
            }
        }
    }

    /// Encode SQL NULL for a declared native type.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-type error if no codec accepts `target`.
    pub fn encode_null(&self, target: &ValueType) -> Result<Parameter> {
        let codecs = self.current();
        match codecs.iter().find(|c| c.can_encode_null(target)) {
            Some(codec) => {
                trace!(codec = codec.name(), %target, "encoding null");
                Ok(codec.encode_null())
            }
            None => {
                debug!(%target, "no codec can encode null");
                Err(CodecError::unsupported_type(
                    "encode null parameter",
                    target.to_string(),
                ))
            }
        }
    }

    /// Native type a value of `oid` in `format` decodes to by default.
    pub fn preferred_type(&self, oid: Oid, format: Format) -> Option<ValueType> {
        self.current()
            .iter()
            .find(|c| c.can_decode(oid, format, &ValueType::Any))
            .map(|c| c.value_type())
    }

    /// Copy of the registered codecs in resolution order.
    ///
    /// Later registrations do not affect the returned list.
    pub fn snapshot(&self) -> Vec<Arc<dyn Codec>> {
        self.current().as_ref().clone()
    }

    /// Names of the registered codecs in resolution order.
    pub fn codec_names(&self) -> Vec<String> {
        self.current().iter().map(|c| c.name().to_string()).collect()
    }

    /// Number of registered codecs.
    pub fn len(&self) -> usize {
        self.current().len()
    }

    /// Check whether no codec is registered.
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}
