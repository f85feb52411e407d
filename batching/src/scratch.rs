use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::debug;

use crate::error::{BatchError, Result};

const WORD: usize = size_of::<u64>();

/// Free-list arena of u64 buffers used as transform scratch space.
/// An optional limit caps the bytes checked out at any one time.
#[derive(Debug)]
pub struct MemoryPool {
    state: Mutex<PoolState>,
    limit: Option<usize>,
}

#[derive(Debug, Default)]
struct PoolState {
    free: Vec<Vec<u64>>,
    in_use_bytes: usize,
}

impl MemoryPool {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            state: Mutex::new(PoolState::default()),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Bytes currently checked out.
    pub fn in_use_bytes(&self) -> usize {
        self.lock().in_use_bytes
    }

    /// Released buffers kept for reuse.
    pub fn cached_buffers(&self) -> usize {
        self.lock().free.len()
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a zeroed buffer of len words.
    fn acquire(&self, len: usize) -> Result<Vec<u64>> {
        let requested: usize = len.saturating_mul(WORD);
        let mut state = self.lock();

        if let Some(limit) = self.limit {
            let available: usize = limit.saturating_sub(state.in_use_bytes);
            if requested > available {
                debug!(requested, available, "scratch pool limit reached");
                return Err(BatchError::Allocation {
                    requested,
                    available,
                });
            }
        }

        let reusable: Option<usize> = state.free.iter().position(|b| b.capacity() >= len);
        let mut buffer: Vec<u64> = match reusable {
            Some(i) => state.free.swap_remove(i),
            None => {
                let mut buffer: Vec<u64> = Vec::new();
                buffer.try_reserve_exact(len).map_err(|_| {
                    let available: usize = self
                        .limit
                        .map_or(0, |limit| limit.saturating_sub(state.in_use_bytes));
                    BatchError::Allocation {
                        requested,
                        available,
                    }
                })?;
                buffer
            }
        };

        buffer.clear();
        buffer.resize(len, 0);
        state.in_use_bytes += requested;
        Ok(buffer)
    }

    fn release(&self, buffer: Vec<u64>) {
        let mut state = self.lock();
        state.in_use_bytes = state.in_use_bytes.saturating_sub(buffer.len() * WORD);
        state.free.push(buffer);
    }
}

/// Shared handle to a [MemoryPool].
#[derive(Clone, Debug)]
pub struct MemoryPoolHandle(Arc<MemoryPool>);

impl MemoryPoolHandle {
    /// The process-wide pool, without limit.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<MemoryPoolHandle> = OnceLock::new();
        GLOBAL
            .get_or_init(|| MemoryPoolHandle(Arc::new(MemoryPool::new(None))))
            .clone()
    }

    /// A fresh pool, capped at limit bytes checked out if given.
    pub fn new_local(limit: Option<usize>) -> Self {
        Self(Arc::new(MemoryPool::new(limit)))
    }

    pub fn pool(&self) -> &MemoryPool {
        &self.0
    }

    pub fn ptr_eq(&self, other: &MemoryPoolHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Checks out a zeroed buffer of len words, returned to the pool on drop.
    pub fn checkout(&self, len: usize) -> Result<ScratchBuffer> {
        let buffer: Vec<u64> = self.0.acquire(len)?;
        Ok(ScratchBuffer {
            buffer,
            pool: self.clone(),
        })
    }
}

impl Default for MemoryPoolHandle {
    fn default() -> Self {
        Self::global()
    }
}

pub struct ScratchBuffer {
    buffer: Vec<u64>,
    pool: MemoryPoolHandle,
}

impl Deref for ScratchBuffer {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.buffer
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut [u64] {
        &mut self.buffer
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        self.pool.0.release(std::mem::take(&mut self.buffer));
    }
}
