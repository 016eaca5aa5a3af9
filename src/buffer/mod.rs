// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte buffers exchanged with the transport.
//!
//! - [`ByteCursor`] - read access to a received value
//! - [`ByteAllocator`] - storage for encoded parameters
//! - [`HeapAllocator`] / [`PooledAllocator`] - allocator implementations

pub mod cursor;
pub mod pool;

use std::sync::Arc;

use byteorder::{BigEndian, WriteBytesExt};

pub use cursor::ByteCursor;
pub use pool::PooledAllocator;

/// Source of writable storage for encoded values.
///
/// Supplied by the transport layer; codecs never allocate payload storage on
/// their own.
pub trait ByteAllocator: Send + Sync {
    /// Get an empty buffer with at least `capacity` bytes reserved.
    fn allocate(&self, capacity: usize) -> Vec<u8>;

    /// Hand a buffer back once its contents were written out.
    fn recycle(&self, buffer: Vec<u8>) {
        drop(buffer);
    }
}

/// Allocator that always returns fresh heap storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl ByteAllocator for HeapAllocator {
    fn allocate(&self, capacity: usize) -> Vec<u8> {
        Vec::with_capacity(capacity)
    }
}

/// Shared handle to the default allocator.
pub fn heap() -> Arc<dyn ByteAllocator> {
    Arc::new(HeapAllocator)
}

/// Fill a buffer from `allocator` with a UTF-8 string.
pub(crate) fn write_str(allocator: &dyn ByteAllocator, value: &str) -> Vec<u8> {
    let mut buf = allocator.allocate(value.len());
    buf.extend_from_slice(value.as_bytes());
    buf
}

/// Fill a buffer from `allocator` with raw bytes.
pub(crate) fn write_bytes(allocator: &dyn ByteAllocator, value: &[u8]) -> Vec<u8> {
    let mut buf = allocator.allocate(value.len());
    buf.extend_from_slice(value);
    buf
}

/// Fill a buffer from `allocator` with big-endian primitives.
pub(crate) fn write_with<F>(allocator: &dyn ByteAllocator, capacity: usize, write: F) -> Vec<u8>
where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let mut buf = allocator.allocate(capacity);
    // Writes into a Vec<u8> cannot fail
    let _ = write(&mut buf);
    buf
}

/// Big-endian writes used by the binary codecs.
pub(crate) trait WireWrite: WriteBytesExt {
    fn put_i16(&mut self, v: i16) -> std::io::Result<()> {
        self.write_i16::<BigEndian>(v)
    }

    fn put_i32(&mut self, v: i32) -> std::io::Result<()> {
        self.write_i32::<BigEndian>(v)
    }

    #[cfg(test)]
    fn put_u32(&mut self, v: u32) -> std::io::Result<()> {
        self.write_u32::<BigEndian>(v)
    }

    fn put_i64(&mut self, v: i64) -> std::io::Result<()> {
        self.write_i64::<BigEndian>(v)
    }

    fn put_f32(&mut self, v: f32) -> std::io::Result<()> {
        self.write_f32::<BigEndian>(v)
    }

    fn put_f64(&mut self, v: f64) -> std::io::Result<()> {
        self.write_f64::<BigEndian>(v)
    }
}

impl WireWrite for Vec<u8> {}
