use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Pool-unique identifier of a decoded banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerId(u64);

impl BannerId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BannerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "banner#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct PoolCounters {
    live: AtomicUsize,
    allocated: AtomicU64,
}

/// Tracks banner allocations so that releases are observable
#[derive(Debug, Clone, Default)]
pub struct BannerPool {
    counters: Arc<PoolCounters>,
}

impl BannerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of decoded RGBA pixels and wrap them in a handle
    pub(crate) fn allocate(
        &self,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> BannerHandle {
        let id = BannerId(
            self.counters.allocated.fetch_add(1, Ordering::Relaxed) + 1,
        );
        self.counters.live.fetch_add(1, Ordering::AcqRel);
        log::trace!("Allocated {} ({}x{})", id, width, height);

        BannerHandle {
            allocation: Arc::new(BannerAllocation {
                id,
                width,
                height,
                rgba,
                counters: Arc::clone(&self.counters),
            }),
        }
    }

    /// Handles allocated from this pool that have not been released yet
    pub fn live_count(&self) -> usize {
        self.counters.live.load(Ordering::Acquire)
    }

    pub fn total_allocated(&self) -> u64 {
        self.counters.allocated.load(Ordering::Relaxed)
    }
}

struct BannerAllocation {
    id: BannerId,
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    counters: Arc<PoolCounters>,
}

impl Drop for BannerAllocation {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::AcqRel);
        log::trace!("Released {}", self.id);
    }
}

/// Opaque reference to decoded banner pixels.
///
/// Clones share the same allocation; it is released when the last clone
/// is dropped.
#[derive(Clone)]
pub struct BannerHandle {
    allocation: Arc<BannerAllocation>,
}

impl BannerHandle {
    pub fn id(&self) -> BannerId {
        self.allocation.id
    }

    pub fn width(&self) -> u32 {
        self.allocation.width
    }

    pub fn height(&self) -> u32 {
        self.allocation.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.allocation.width, self.allocation.height)
    }

    /// Row-major RGBA8 pixels
    pub fn rgba(&self) -> &[u8] {
        &self.allocation.rgba
    }
}

impl PartialEq for BannerHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.allocation, &other.allocation)
    }
}

impl Eq for BannerHandle {}

impl fmt::Debug for BannerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BannerHandle")
            .field("id", &self.allocation.id)
            .field("width", &self.allocation.width)
            .field("height", &self.allocation.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_happens_on_last_clone() {
        let pool = BannerPool::new();
        let handle = pool.allocate(2, 1, vec![0; 8]);
        let copy = handle.clone();
        assert_eq!(pool.live_count(), 1);
        assert_eq!(handle, copy);

        drop(handle);
        assert_eq!(pool.live_count(), 1);
        drop(copy);
        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.total_allocated(), 1);
    }

    #[test]
    fn ids_are_unique_and_handles_distinct() {
        let pool = BannerPool::new();
        let a = pool.allocate(1, 1, vec![0; 4]);
        let b = pool.allocate(1, 1, vec![0; 4]);
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        assert_eq!(pool.live_count(), 2);
        assert_eq!(b.dimensions(), (1, 1));
        assert_eq!(b.rgba().len(), 4);
    }
}
