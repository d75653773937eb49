//! Layout cache keyed by `(mode, region count)`.
//!
//! Two different region sets of the same length share a key, so a lookup can
//! return a layout built from other regions. Callers that need
//! content-sensitive caching should disable the cache for those calls.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::layout::model::{LayoutMode, TerminalLayout};

/// Cache key: the layout's effective mode and its region count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub mode: LayoutMode,
    pub region_count: usize,
}

impl CacheKey {
    #[must_use]
    pub fn of<C>(layout: &TerminalLayout<C>) -> Self {
        Self {
            mode: layout.mode,
            region_count: layout.regions.len(),
        }
    }
}

#[derive(Debug)]
struct CacheEntry<C> {
    layout: Arc<TerminalLayout<C>>,
    /// `None` never expires.
    expires_at: Option<Instant>,
}

impl<C> CacheEntry<C> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// Stores the most recent layout per [`CacheKey`].
#[derive(Debug)]
pub struct LayoutCache<C> {
    entries: HashMap<CacheKey, CacheEntry<C>>,
}

impl<C> Default for LayoutCache<C> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<C> LayoutCache<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `layout`, replacing any entry under the same key. The entry
    /// expires `ttl` after `now`; `None` keeps it until replaced or cleared.
    pub fn store(&mut self, layout: Arc<TerminalLayout<C>>, ttl: Option<Duration>, now: Instant) {
        let key = CacheKey::of(&layout);
        tracing::debug!(
            target: "layout.cache",
            mode = %key.mode,
            regions = key.region_count,
            ttl_ms = ttl.map(|ttl| ttl.as_millis()),
            "stored layout"
        );
        self.entries.insert(
            key,
            CacheEntry {
                layout,
                expires_at: ttl.and_then(|ttl| now.checked_add(ttl)),
            },
        );
    }

    /// Cached layout for `key`, unless expired. An expired entry is dropped
    /// on lookup.
    pub fn get(&mut self, key: CacheKey, now: Instant) -> Option<Arc<TerminalLayout<C>>> {
        let entry = self.entries.get(&key)?;
        if entry.is_expired(now) {
            self.entries.remove(&key);
            tracing::debug!(target: "layout.cache", mode = %key.mode, regions = key.region_count, "expired");
            return None;
        }
        Some(Arc::clone(&entry.layout))
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
