//! Referer preservation.
//!
//! Redirecting to the viewer starts a fresh navigation, so the viewer's own
//! fetch of the document would go out without the original `Referer`. The
//! interceptor stores it here and the viewer takes it back by the same key.

use crate::ctx::{FrameId, InterceptedRequest, TabId};
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub trait RefererPreserver: Send + Sync {
    /// Called right before a request is redirected to the viewer.
    fn save_referer(&self, request: &InterceptedRequest);
}

/// Identity under which a referer is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefererKey {
    pub tab_id: Option<TabId>,
    pub frame_id: FrameId,
    pub url: String,
}

impl RefererKey {
    pub fn new(tab_id: Option<TabId>, frame_id: FrameId, url: impl Into<String>) -> Self {
        Self {
            tab_id,
            frame_id,
            url: url.into(),
        }
    }

    pub fn of(request: &InterceptedRequest) -> Self {
        Self::new(request.tab_id, request.frame_id, request.url.as_str())
    }
}

/// How long a saved referer waits for the viewer to take it.
pub const DEFAULT_REFERER_TTL: Duration = Duration::from_secs(60);

/// Entry count past which expired referers are pruned before inserting.
pub const DEFAULT_REFERER_CAPACITY: usize = 1024;

#[derive(Debug)]
struct SavedReferer {
    referer: String,
    saved_at: Instant,
}

/// In-memory referer store shared between interceptor and viewer glue.
///
/// Entries the viewer never takes, such as those for a tab navigation that
/// failed, expire after the TTL. The store never grows past its capacity.
#[derive(Debug)]
pub struct RefererStore {
    entries: DashMap<RefererKey, SavedReferer>,
    ttl: Duration,
    capacity: usize,
}

impl Default for RefererStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_REFERER_TTL, DEFAULT_REFERER_CAPACITY)
    }
}

impl RefererStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Removes and returns the referer recorded for `key`, unless expired.
    pub fn take(&self, key: &RefererKey) -> Option<String> {
        let (_, saved) = self.entries.remove(key)?;
        (saved.saved_at.elapsed() < self.ttl).then_some(saved.referer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn make_room(&self) {
        if self.entries.len() < self.capacity {
            return;
        }

        self.entries
            .retain(|_, saved| saved.saved_at.elapsed() < self.ttl);

        // Still full of live entries: drop the oldest.
        while self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().saved_at)
                .map(|entry| entry.key().clone());
            let Some(oldest) = oldest else { break };
            debug!(url = %oldest.url, "referer store full; evicting oldest entry");
            self.entries.remove(&oldest);
        }
    }
}

impl RefererPreserver for RefererStore {
    fn save_referer(&self, request: &InterceptedRequest) {
        let key = RefererKey::of(request);
        match &request.referer {
            Some(referer) => {
                trace!(url = %key.url, referer = %referer, "preserving referer");
                self.entries.remove(&key);
                self.make_room();
                self.entries.insert(
                    key,
                    SavedReferer {
                        referer: referer.clone(),
                        saved_at: Instant::now(),
                    },
                );
            }
            // A stale entry from an earlier load of the same URL must not leak.
            None => {
                self.entries.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::url;
    use http::Method;
    use pretty_assertions::assert_eq;

    fn request(referer: Option<&str>) -> InterceptedRequest {
        let req = InterceptedRequest::new("1", Method::GET, url("https://e.com/a.slax"))
            .with_tab(TabId(4))
            .in_frame(FrameId(2));
        match referer {
            Some(r) => req.with_referer(r),
            None => req,
        }
    }

    #[test]
    fn referer_is_taken_once_by_request_identity() {
        // Arrange
        let store = RefererStore::new();
        store.save_referer(&request(Some("https://e.com/page")));
        let key = RefererKey::new(Some(TabId(4)), FrameId(2), "https://e.com/a.slax");

        // Act
        let first = store.take(&key);
        let second = store.take(&key);

        // Assert
        assert_eq!(first.as_deref(), Some("https://e.com/page"));
        assert_eq!(second, None);
    }

    #[test]
    fn missing_referer_clears_previous_entry() {
        let store = RefererStore::new();
        store.save_referer(&request(Some("https://e.com/page")));
        store.save_referer(&request(None));

        assert!(store.is_empty());
    }

    #[test]
    fn other_frames_do_not_see_the_referer() {
        let store = RefererStore::new();
        store.save_referer(&request(Some("https://e.com/page")));

        let other = RefererKey::new(Some(TabId(4)), FrameId::TOP_LEVEL, "https://e.com/a.slax");
        assert_eq!(store.take(&other), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn expired_referers_are_not_handed_out() {
        let store = RefererStore::with_limits(Duration::ZERO, 8);
        store.save_referer(&request(Some("https://e.com/page")));
        let key = RefererKey::new(Some(TabId(4)), FrameId(2), "https://e.com/a.slax");

        assert_eq!(store.take(&key), None);
        assert!(store.is_empty());
    }

    #[test]
    fn expired_entries_are_pruned_when_full() {
        // Arrange
        let store = RefererStore::with_limits(Duration::ZERO, 2);

        // Act
        for n in 0..5 {
            let req = InterceptedRequest::new("1", Method::GET, url(&format!("https://e.com/{n}.slax")))
                .with_referer("https://e.com/page");
            store.save_referer(&req);
        }

        // Assert
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn live_entries_never_exceed_capacity() {
        // Arrange
        let store = RefererStore::with_limits(Duration::from_secs(3600), 3);

        // Act
        for n in 0..10 {
            let req = InterceptedRequest::new("1", Method::GET, url(&format!("https://e.com/{n}.slax")))
                .with_referer("https://e.com/page");
            store.save_referer(&req);
        }

        // Assert
        assert_eq!(store.len(), 3);
        let newest = RefererKey::new(None, FrameId::TOP_LEVEL, "https://e.com/9.slax");
        assert_eq!(store.take(&newest).as_deref(), Some("https://e.com/page"));
    }
}
