// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Position-tracked reader over a received value.
//!
//! PostgreSQL transmits every binary value in network byte order with no
//! alignment padding, so reads are plain big-endian slices.

use byteorder::{BigEndian, ByteOrder};

use crate::core::{CodecError, Result};

/// Cursor over the bytes of one column or parameter value.
///
/// The transport owns the storage; codecs only read through the cursor.
///
/// # Example
///
/// ```
/// use pgcodec::buffer::ByteCursor;
///
/// let data = [0x00, 0x00, 0x00, 0x2A, b'o', b'k'];
/// let mut cursor = ByteCursor::new(&data);
/// assert_eq!(cursor.read_i32().unwrap(), 42);
/// assert_eq!(cursor.read_str().unwrap(), "ok");
/// assert!(cursor.is_at_end());
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    /// The value bytes
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Read exactly `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::buffer_too_short(
                count,
                self.remaining(),
                self.offset,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Read everything up to the end of the buffer.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let start = self.offset.min(self.data.len());
        self.offset = self.data.len();
        &self.data[start..]
    }

    /// Read the rest of the buffer as UTF-8 text.
    pub fn read_str(&mut self) -> Result<&'a str> {
        let position = self.offset;
        let bytes = self.read_remaining();
        std::str::from_utf8(bytes).map_err(|e| {
            CodecError::invalid_value("text", format!("invalid UTF-8 at position {position}: {e}"))
        })
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read an i16 value.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.read_bytes(2)?))
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.read_bytes(4)?))
    }

    /// Read an i64 value.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.read_bytes(8)?))
    }

    /// Read an f32 value.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.read_bytes(4)?))
    }

    /// Read an f64 value.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.read_bytes(8)?))
    }
}
