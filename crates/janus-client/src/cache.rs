//! Single-slot cache for the full VM list.
//!
//! One slot, no expiry: once populated the cached list is returned as-is
//! until a caller bypasses the cache (every full scan refreshes it) or
//! invalidates it explicitly.

use janus_model::Vm;
use parking_lot::Mutex;

/// Client-owned cache holding the most recent full VM scan.
#[derive(Debug, Default)]
pub struct VmCache {
    slot: Mutex<Option<Vec<Vm>>>,
}

impl VmCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached list, if populated.
    #[must_use]
    pub fn lookup(&self) -> Option<Vec<Vm>> {
        self.slot.lock().clone()
    }

    /// Replace the cached list.
    pub fn store(&self, vms: Vec<Vm>) {
        *self.slot.lock() = Some(vms);
    }

    /// Drop the cached list; the next cached call will scan the platform.
    pub fn invalidate(&self) {
        *self.slot.lock() = None;
    }

    /// Whether the slot currently holds a list.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.slot.lock().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_start_empty() {
        let cache = VmCache::new();
        assert!(!cache.is_populated());
        assert!(cache.lookup().is_none());
    }

    #[test]
    fn test_should_return_stored_list_until_invalidated() {
        let cache = VmCache::new();
        cache.store(vec![Vm::default()]);
        assert_eq!(cache.lookup().unwrap().len(), 1);

        // An empty list still counts as populated.
        cache.store(Vec::new());
        assert!(cache.is_populated());
        assert!(cache.lookup().unwrap().is_empty());

        cache.invalidate();
        assert!(cache.lookup().is_none());
    }
}
