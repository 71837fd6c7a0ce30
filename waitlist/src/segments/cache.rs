use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;

/// Process-wide cache of resolved segment ids.
///
/// A single wall-clock timestamp gates the freshness of every entry: any
/// store revalidates the cache as a whole, and entries never expire
/// individually. An entry maps a segment name to the resolved id, or to
/// `None` once a completed listing confirmed the name is absent.
pub struct SegmentCache {
    ttl: Duration,
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Option<String>>,
    fetched_at: Option<DateTime<Utc>>,
}

impl SegmentCache {
    /// Whole-cache TTL used in production: 1 hour.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Freshness-checked lookup.
    ///
    /// `None` means the name has not been resolved within the current TTL
    /// window; `Some(None)` is a cached known-absent result.
    pub fn lookup(&self, name: &str) -> Option<Option<String>> {
        let inner = self.inner.read();
        let fetched_at = inner.fetched_at?;
        let age = Utc::now().signed_duration_since(fetched_at).to_std().ok()?;
        if age >= self.ttl {
            return None;
        }
        inner.entries.get(name).cloned()
    }

    /// Store a completed lookup result and revalidate the whole cache.
    pub fn store(&self, name: &str, segment_id: Option<String>) {
        let mut inner = self.inner.write();
        inner.entries.insert(name.to_string(), segment_id);
        inner.fetched_at = Some(Utc::now());
    }
}

impl Default for SegmentCache {
    fn default() -> Self {
        Self::new()
    }
}
