// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Lock-free buffer pool for parameter payloads.
//!
//! Encoded parameters are short-lived: the transport copies them into the
//! outgoing message and drops them. [`PooledAllocator`] keeps those buffers in a
//! `crossbeam_queue::ArrayQueue` so the next encode reuses their capacity
//! instead of hitting the global allocator.

use crossbeam_queue::ArrayQueue;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::ByteAllocator;

/// Default buffer capacity (256 bytes covers most scalar and short text values)
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Default maximum number of buffers kept in the pool
pub const DEFAULT_MAX_BUFFERS: usize = 64;

/// Buffers that grew beyond this size are not pooled.
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// Inner pool state (shared via Arc).
#[derive(Debug)]
struct PoolInner {
    /// Lock-free queue of available buffers
    queue: ArrayQueue<Vec<u8>>,
    /// Default buffer capacity for new allocations
    default_capacity: usize,
    /// Total number of buffer allocations (for metrics)
    total_allocations: AtomicUsize,
}

impl PoolInner {
    #[inline]
    fn return_buffer(&self, mut buffer: Vec<u8>) {
        if buffer.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buffer.clear();
        // Pool full: the buffer is simply dropped
        let _ = self.queue.push(buffer);
    }

    #[inline]
    fn take_buffer(&self, min_capacity: usize) -> Vec<u8> {
        if let Some(mut buf) = self.queue.pop() {
            if buf.capacity() < min_capacity {
                buf.reserve(min_capacity);
            }
            return buf;
        }

        self.total_allocations.fetch_add(1, Ordering::Relaxed);
        Vec::with_capacity(min_capacity.max(self.default_capacity))
    }
}

/// [`ByteAllocator`] that recycles payload buffers.
///
/// Clones share the same pool.
///
/// # Example
///
/// ```
/// use pgcodec::buffer::{ByteAllocator, PooledAllocator};
///
/// let pool = PooledAllocator::new(128, 4);
/// let buf = pool.allocate(16);
/// pool.recycle(buf);
/// assert_eq!(pool.pooled(), 1);
///
/// let _reused = pool.allocate(16);
/// assert_eq!(pool.total_allocations(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct PooledAllocator {
    inner: Arc<PoolInner>,
}

impl PooledAllocator {
    /// Create a pool handing out buffers of `default_capacity`, keeping at
    /// most `max_buffers` idle buffers.
    pub fn new(default_capacity: usize, max_buffers: usize) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                queue: ArrayQueue::new(max_buffers.max(1)),
                default_capacity,
                total_allocations: AtomicUsize::new(0),
            }),
        }
    }

    /// Get the current number of idle buffers in the pool.
    #[inline]
    pub fn pooled(&self) -> usize {
        self.inner.queue.len()
    }

    /// Get the total number of fresh allocations (excluding pool reuses).
    #[inline]
    pub fn total_allocations(&self) -> usize {
        self.inner.total_allocations.load(Ordering::Relaxed)
    }

    /// Pre-warm the pool with buffers.
    pub fn warmup(&self, count: usize) {
        for _ in 0..count.min(self.inner.queue.capacity()) {
            let buffer = Vec::with_capacity(self.inner.default_capacity);
            if self.inner.queue.push(buffer).is_err() {
                break;
            }
        }
    }

    /// Get the default buffer capacity.
    #[inline]
    pub fn default_capacity(&self) -> usize {
        self.inner.default_capacity
    }
}

impl Default for PooledAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_BUFFERS)
    }
}

impl ByteAllocator for PooledAllocator {
    fn allocate(&self, capacity: usize) -> Vec<u8> {
        self.inner.take_buffer(capacity)
    }

    fn recycle(&self, buffer: Vec<u8>) {
        self.inner.return_buffer(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_allocate() {
        let pool = PooledAllocator::new(1024, 4);
        let buffer = pool.allocate(512);
        assert!(buffer.capacity() >= 1024);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_pool_reuse() {
        let pool = PooledAllocator::new(1024, 4);

        let mut buffer = pool.allocate(1024);
        buffer.extend_from_slice(&[1, 2, 3]);
        let capacity = buffer.capacity();
        pool.recycle(buffer);
        assert_eq!(pool.pooled(), 1);

        let buffer = pool.allocate(512);
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), capacity);
        assert_eq!(pool.total_allocations(), 1);
    }

    #[test]
    fn test_pool_grows_small_buffer() {
        let pool = PooledAllocator::new(8, 4);
        pool.warmup(1);
        let buffer = pool.allocate(100);
        assert!(buffer.capacity() >= 100);
        assert_eq!(pool.total_allocations(), 0);
    }

    #[test]
    fn test_pool_warmup() {
        let pool = PooledAllocator::new(4096, 2);
        pool.warmup(3);
        assert_eq!(pool.pooled(), 2);

        for _ in 0..2 {
            let _buffer = pool.allocate(1024);
        }
        assert_eq!(pool.total_allocations(), 0);
    }

    #[test]
    fn test_pool_drops_when_full() {
        let pool = PooledAllocator::new(16, 1);
        pool.recycle(Vec::with_capacity(16));
        pool.recycle(Vec::with_capacity(16));
        assert_eq!(pool.pooled(), 1);
    }

    #[test]
    fn test_pool_skips_oversized_buffers() {
        let pool = PooledAllocator::new(16, 4);
        pool.recycle(Vec::with_capacity(MAX_RETAINED_CAPACITY + 1));
        assert_eq!(pool.pooled(), 0);
    }

    #[test]
    fn test_pool_clone_shares_state() {
        let pool1 = PooledAllocator::new(64, 4);
        let pool2 = pool1.clone();
        pool1.recycle(pool1.allocate(8));
        assert_eq!(pool2.pooled(), 1);
    }
}
