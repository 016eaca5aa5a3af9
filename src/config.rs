// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry configuration.
//!
//! A session can tune its codec registry from a TOML document:
//!
//! ```toml
//! # Built-in codecs to leave out of the default ordering
//! disabled_codecs = ["json", "inet"]
//!
//! [pool]
//! enabled = true
//! buffer_capacity = 512
//! max_buffers = 32
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::buffer::pool::{DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_BUFFERS};
use crate::buffer::{ByteAllocator, HeapAllocator, PooledAllocator};
use crate::core::Result;

/// Settings for building a [`CodecRegistry`](crate::codec::CodecRegistry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Names of built-in codecs excluded from the default ordering.
    pub disabled_codecs: Vec<String>,
    /// Payload buffer pooling.
    pub pool: PoolConfig,
}

/// Payload buffer pool settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Recycle payload buffers instead of allocating fresh ones.
    pub enabled: bool,
    /// Capacity of newly allocated buffers.
    pub buffer_capacity: usize,
    /// Maximum number of idle buffers kept.
    pub max_buffers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_buffers: DEFAULT_MAX_BUFFERS,
        }
    }
}

impl CodecConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check whether a built-in codec is disabled.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_codecs.iter().any(|n| n == name)
    }

    /// Build the payload allocator described by this configuration.
    pub fn allocator(&self) -> Arc<dyn ByteAllocator> {
        if self.pool.enabled {
            Arc::new(PooledAllocator::new(
                self.pool.buffer_capacity,
                self.pool.max_buffers,
            ))
        } else {
            Arc::new(HeapAllocator)
        }
    }
}
