use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Hands out shareable URLs for in-memory documents and takes them back.
///
/// In the browser build this wraps object URLs; the service uses the
/// in-process allocator below. Either way a created URL holds resources
/// until revoked.
pub trait UrlAllocator: Send + Sync {
    fn create(&self, bytes: &[u8]) -> String;
    fn revoke(&self, url: &str);
}

/// The single live preview of a generated contract.
///
/// Regenerating replaces the previous URL, revoking it first, and dropping
/// the slot revokes whatever is live, so at most one URL exists per slot at
/// any time.
pub struct PreviewSlot<U: UrlAllocator> {
    allocator: Arc<U>,
    current: Option<String>,
}

impl<U: UrlAllocator> PreviewSlot<U> {
    pub fn new(allocator: Arc<U>) -> PreviewSlot<U> {
        PreviewSlot {
            allocator,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Publishes fresh bytes, retiring the previous preview.
    pub fn publish(&mut self, bytes: &[u8]) -> &str {
        self.release();
        self.current.insert(self.allocator.create(bytes))
    }

    /// Revokes the live preview, if any.
    pub fn release(&mut self) {
        if let Some(url) = self.current.take() {
            self.allocator.revoke(&url);
        }
    }
}

impl<U: UrlAllocator> Drop for PreviewSlot<U> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Process-local allocator; also the lens tests use to watch URL lifetimes.
#[derive(Debug, Default)]
pub struct MemoryUrlAllocator {
    next_id: AtomicU64,
    live: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryUrlAllocator {
    pub fn new() -> MemoryUrlAllocator {
        MemoryUrlAllocator::default()
    }

    /// Bytes behind a live URL, or `None` once revoked.
    pub fn bytes(&self, url: &str) -> Option<Vec<u8>> {
        let live = self.live.lock().expect("preview mutex poisoned");
        live.get(url).cloned()
    }

    pub fn live_count(&self) -> usize {
        let live = self.live.lock().expect("preview mutex poisoned");
        live.len()
    }
}

impl UrlAllocator for MemoryUrlAllocator {
    fn create(&self, bytes: &[u8]) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("memory:contract/{id}");
        let mut live = self.live.lock().expect("preview mutex poisoned");
        live.insert(url.clone(), bytes.to_vec());
        url
    }

    fn revoke(&self, url: &str) {
        let mut live = self.live.lock().expect("preview mutex poisoned");
        live.remove(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn republishing_revokes_the_previous_url() {
        let allocator = Arc::new(MemoryUrlAllocator::new());
        let mut slot = PreviewSlot::new(Arc::clone(&allocator));

        let first = slot.publish(b"v1").to_string();
        assert_eq!(allocator.bytes(&first).as_deref(), Some(b"v1".as_slice()));

        let second = slot.publish(b"v2").to_string();
        assert_ne!(first, second);
        assert_eq!(allocator.live_count(), 1);
        assert!(allocator.bytes(&first).is_none());
        assert_eq!(allocator.bytes(&second).as_deref(), Some(b"v2".as_slice()));
    }

    #[test]
    fn dropping_the_slot_revokes_the_live_preview() {
        let allocator = Arc::new(MemoryUrlAllocator::new());
        {
            let mut slot = PreviewSlot::new(Arc::clone(&allocator));
            slot.publish(b"contract");
            assert_eq!(allocator.live_count(), 1);
        }
        assert_eq!(allocator.live_count(), 0);
    }

    #[test]
    fn release_is_idempotent() {
        let allocator = Arc::new(MemoryUrlAllocator::new());
        let mut slot = PreviewSlot::new(Arc::clone(&allocator));
        slot.release();
        slot.publish(b"contract");
        slot.release();
        slot.release();
        assert_eq!(allocator.live_count(), 0);
        assert_eq!(slot.current(), None);
    }
}
