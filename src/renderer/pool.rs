//! Buffer reuse across frames.
//!
//! A render loop asks for the same handful of buffer sizes every frame.
//! [`BufferPool`] keeps released buffers on a mutex-guarded free list and
//! hands them back out, blanked, instead of allocating fresh grids.
//!
//! Ownership is explicit: [`BufferPool::acquire`] moves a [`Buffer`] to the
//! caller and [`BufferPool::release`] moves it back. [`BufferPool::checkout`]
//! wraps the pair in a guard that returns the buffer on drop.

use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

use super::buffer::{Buffer, clamped_area};

/// Free-list bound used by [`BufferPool::default`].
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// Snapshot of pool counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Acquires served from the free list.
    pub hits: u64,
    /// Acquires that had to allocate.
    pub misses: u64,
    /// Buffers currently waiting on the free list.
    pub pooled: usize,
    /// Most buffers the free list will hold.
    pub capacity: usize,
}

/// A thread-safe free list of buffers.
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<Buffer>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl BufferPool {
    /// Create a pool that keeps at most `capacity` released buffers.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// A poisoned lock only means another thread panicked mid-push or
    /// mid-remove; the list of whole buffers is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<Buffer>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take a blank buffer of the given size.
    ///
    /// Reuses the pooled buffer with the smallest backing storage that holds
    /// `width * height` cells, or allocates when none does. Dimensions are
    /// clamped like [`Buffer::new`].
    pub fn acquire(&self, width: i32, height: i32) -> Buffer {
        let needed = clamped_area(width, height);

        let reused = {
            let mut free = self.lock();
            let best = free
                .iter()
                .enumerate()
                .filter(|(_, buf)| buf.capacity() >= needed)
                .min_by_key(|(_, buf)| buf.capacity())
                .map(|(i, _)| i);
            best.map(|i| free.swap_remove(i))
        };

        match reused {
            Some(mut buf) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(width, height, capacity = buf.capacity(), "pool hit");
                buf.reset(width, height);
                buf
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(width, height, "pool miss");
                Buffer::new(width, height)
            }
        }
    }

    /// Return a buffer for reuse.
    ///
    /// When the free list is already full the buffer is dropped.
    pub fn release(&self, buffer: Buffer) {
        let mut free = self.lock();
        if free.len() < self.capacity {
            free.push(buffer);
        } else {
            trace!(capacity = self.capacity, "pool full, dropping buffer");
        }
    }

    /// Acquire a buffer wrapped in a guard that releases it on drop.
    pub fn checkout(&self, width: i32, height: i32) -> PooledBuffer<'_> {
        PooledBuffer {
            pool: self,
            buffer: self.acquire(width, height),
        }
    }

    /// Number of buffers waiting on the free list.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every pooled buffer. Counters are kept.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            pooled: self.len(),
            capacity: self.capacity,
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

// =============================================================================
// PooledBuffer
// =============================================================================

/// A buffer on loan from a [`BufferPool`].
///
/// Derefs to [`Buffer`]; goes back to the pool when dropped.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buffer: Buffer,
}

impl PooledBuffer<'_> {
    /// Keep the buffer instead of returning it to the pool.
    pub fn into_inner(mut self) -> Buffer {
        // The stand-in owns no storage, so Drop does not pool it.
        mem::replace(&mut self.buffer, Buffer::detached())
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = Buffer;

    fn deref(&self) -> &Buffer {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        let buffer = mem::replace(&mut self.buffer, Buffer::detached());
        if buffer.capacity() > 0 {
            self.pool.release(buffer);
        }
    }
}
