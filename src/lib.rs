// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # pgcodec
//!
//! Value marshalling for the PostgreSQL wire protocol.
//!
//! The library converts between native Rust values and the text or binary
//! wire representation of column values and bind parameters:
//! - **Codecs** for the common scalar, temporal, JSON and array types in
//!   [`codec`](crate::codec)
//! - **Codec registry** with ordered, first-match resolution in
//!   [`codec::CodecRegistry`]
//! - **Byte buffers** for reading received values and allocating encoded
//!   payloads in [`buffer`](crate::buffer)
//!
//! ## Architecture
//!
//! - `core/` - value model, wire type identifiers, parameters and errors
//! - `buffer/` - byte cursor and payload allocators
//! - `codec/` - the codec contract, built-in codecs and the registry
//! - `config` - TOML configuration for building a registry
//!
//! ## Example: Encoding and decoding
//!
//! ```rust
//! # fn main() -> pgcodec::Result<()> {
//! use pgcodec::buffer::ByteCursor;
//! use pgcodec::{CodecRegistry, Format, PgType, Value, ValueType};
//!
//! let registry = CodecRegistry::default();
//!
//! let param = registry.encode(&Value::from("hello"))?;
//! assert_eq!(param.pg_type(), Some(PgType::Varchar));
//!
//! let mut cursor = ByteCursor::new(b"hello");
//! let value = registry.decode(Some(&mut cursor), PgType::Text.oid(), Format::Text, &ValueType::Any)?;
//! assert_eq!(value, Some(Value::from("hello")));
//!
//! // SQL NULL never reaches a codec
//! assert_eq!(registry.decode(None, PgType::Text.oid(), Format::Text, &ValueType::Any)?, None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Custom codecs
//!
//! ```rust
//! # use std::sync::Arc;
//! # use pgcodec::{CodecRegistry, buffer::heap, codec::StringCodec};
//! let registry = CodecRegistry::empty();
//! registry.add_last(Arc::new(StringCodec::new(heap())));
//! assert_eq!(registry.codec_names(), vec!["string"]);
//! ```

// Core types
pub mod core;

pub use core::{
    CodecError, EnumType, EnumValue, Format, FromValue, Oid, Parameter, PgType, Result, Value,
    ValueType,
};

// Byte cursor and payload allocators
pub mod buffer;

// Codecs and registry
pub mod codec;

pub use codec::{Codec, CodecRegistry};

// Registry configuration
pub mod config;

pub use config::CodecConfig;
