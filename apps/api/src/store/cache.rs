//! Bounded lookup cache with least-recently-accessed eviction.
//!
//! Keys are the literal strings callers pass to `SkillStore::lookup`, so no
//! invalidation is needed: the backing reference data never changes after
//! startup. Interior mutability keeps `SkillStore` shareable as `Arc<_>`
//! across concurrent requests.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

use super::SkillInfo;

pub struct LookupCache {
    inner: RwLock<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    capacity: usize,
}

struct CacheEntry {
    value: SkillInfo,
    last_accessed: Instant,
}

impl LookupCache {
    pub fn new(capacity: usize) -> Self {
        LookupCache {
            inner: RwLock::new(CacheInner {
                entries: HashMap::new(),
                capacity,
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<SkillInfo> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let entry = inner.entries.get_mut(key)?;
        entry.last_accessed = Instant::now();
        Some(entry.value.clone())
    }

    pub fn insert(&self, key: &str, value: &SkillInfo) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        if inner.entries.len() >= inner.capacity && !inner.entries.contains_key(key) {
            let evict = inner
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_accessed)
                .map(|(k, _)| k.clone());
            if let Some(k) = evict {
                inner.entries.remove(&k);
            }
        }

        inner.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                last_accessed: Instant::now(),
            },
        );
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }
}
