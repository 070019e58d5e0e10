use lru::LruCache;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::CacheConfig;
use crate::models::{AnalysisResult, ItemType, ResolvedCandidate};

/// What is being cached. Each kind derives its key differently.
#[derive(Debug, Clone)]
pub enum CacheRequest {
    /// Keyed by image content hash.
    Analysis { image_hash: String },
    /// Keyed by normalized query, item type and colour.
    Search {
        query: String,
        item_type: ItemType,
        color: Option<String>,
    },
    /// Any other kind, keyed by a hash of its parameters.
    Generic { kind: String, params: Value },
}

impl CacheRequest {
    pub fn key(&self) -> String {
        match self {
            CacheRequest::Analysis { image_hash } => format!("vision:{}", image_hash.trim()),
            CacheRequest::Search {
                query,
                item_type,
                color,
            } => {
                let color = color
                    .as_deref()
                    .map(|c| c.trim().to_lowercase())
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| "any".to_string());
                format!("search:{}-{}-{}", normalize_query(query), item_type, color)
            }
            CacheRequest::Generic { kind, params } => {
                let digest = Sha256::digest(params.to_string().as_bytes());
                format!("{kind}:{digest:x}")
            }
        }
    }
}

fn normalize_query(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Analysis(Box<AnalysisResult>),
    Candidates(Vec<ResolvedCandidate>),
    Json(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_ratio: f64,
}

struct Entry {
    value: CachedValue,
    created: Instant,
}

/// In-memory TTL cache shared across requests.
///
/// Reads never refresh an entry, so the LRU end of the list is always the
/// oldest insertion. Expired entries are removed when read.
#[derive(Clone)]
pub struct ResultCache {
    entries: Arc<Mutex<LruCache<String, Entry>>>,
    max_size: usize,
    ttl: Duration,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl ResultCache {
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(LruCache::unbounded())),
            max_size: max_size.max(1),
            ttl,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_size, Duration::from_secs(config.ttl_secs))
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, request: &CacheRequest) -> Option<CachedValue> {
        let key = request.key();
        let mut entries = self.lock();

        let lookup = entries
            .peek(&key)
            .map(|entry| (entry.created.elapsed() < self.ttl).then(|| entry.value.clone()));

        let found = match lookup {
            Some(Some(value)) => Some(value),
            Some(None) => {
                entries.pop(&key);
                debug!(%key, "Cache entry expired");
                None
            }
            None => None,
        };

        match found {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a value. Inserting a new key into a full cache evicts the
    /// single oldest entry first.
    pub fn set(&self, request: &CacheRequest, value: CachedValue) {
        let key = request.key();
        let mut entries = self.lock();

        if !entries.contains(&key) && entries.len() >= self.max_size {
            if let Some((evicted, _)) = entries.pop_lru() {
                debug!(key = %evicted, "Evicted oldest cache entry");
            }
        }

        entries.put(
            key,
            Entry {
                value,
                created: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, request: &CacheRequest) -> bool {
        self.lock().pop(&request.key()).is_some()
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let size = self.lock().len();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        CacheStats {
            size,
            max_size: self.max_size,
            hits,
            misses,
            hit_ratio: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread;

    fn generic(n: u32) -> CacheRequest {
        CacheRequest::Generic {
            kind: "test".to_string(),
            params: json!({ "n": n }),
        }
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let cache = ResultCache::new(10, Duration::from_secs(60));
        cache.set(&generic(1), CachedValue::Json(json!("one")));

        assert_eq!(cache.get(&generic(1)), Some(CachedValue::Json(json!("one"))));
        assert_eq!(cache.get(&generic(2)), None);

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
        assert!((stats.hit_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_expired_entry_is_a_miss_and_removed() {
        let cache = ResultCache::new(10, Duration::from_millis(20));
        cache.set(&generic(1), CachedValue::Json(json!(1)));
        thread::sleep(Duration::from_millis(40));

        assert_eq!(cache.get(&generic(1)), None);
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_overflow_evicts_single_oldest() {
        let cache = ResultCache::new(3, Duration::from_secs(60));
        for n in 0..4 {
            cache.set(&generic(n), CachedValue::Json(json!(n)));
        }

        assert_eq!(cache.stats().size, 3);
        assert_eq!(cache.get(&generic(0)), None);
        for n in 1..4 {
            assert!(cache.get(&generic(n)).is_some());
        }
    }

    #[test]
    fn test_reads_do_not_protect_from_eviction() {
        let cache = ResultCache::new(2, Duration::from_secs(60));
        cache.set(&generic(0), CachedValue::Json(json!(0)));
        cache.set(&generic(1), CachedValue::Json(json!(1)));
        let _ = cache.get(&generic(0));
        cache.set(&generic(2), CachedValue::Json(json!(2)));

        assert_eq!(cache.get(&generic(0)), None);
        assert!(cache.get(&generic(1)).is_some());
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let cache = ResultCache::new(2, Duration::from_secs(60));
        cache.set(&generic(0), CachedValue::Json(json!(0)));
        cache.set(&generic(1), CachedValue::Json(json!(1)));
        cache.set(&generic(1), CachedValue::Json(json!("updated")));

        assert_eq!(cache.stats().size, 2);
        assert!(cache.get(&generic(0)).is_some());
    }

    #[test]
    fn test_search_key_normalization() {
        let a = CacheRequest::Search {
            query: "  Bottines   Marron ".to_string(),
            item_type: ItemType::Chaussure,
            color: Some("Marron".to_string()),
        };
        let b = CacheRequest::Search {
            query: "bottines marron".to_string(),
            item_type: ItemType::Chaussure,
            color: Some("marron".to_string()),
        };
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key(), "search:bottines marron-chaussure-marron");

        let no_color = CacheRequest::Search {
            query: "robe".to_string(),
            item_type: ItemType::Default,
            color: None,
        };
        assert_eq!(no_color.key(), "search:robe-default-any");
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = ResultCache::new(10, Duration::from_secs(60));
        let analysis = CacheRequest::Analysis {
            image_hash: "abc".to_string(),
        };
        cache.set(&analysis, CachedValue::Json(json!(1)));
        cache.set(&generic(1), CachedValue::Json(json!(1)));

        assert!(cache.invalidate(&analysis));
        assert!(!cache.invalidate(&analysis));

        cache.clear();
        let stats = cache.stats();
        assert_eq!((stats.size, stats.hits, stats.misses), (0, 0, 0));
    }

    #[test]
    fn test_concurrent_access() {
        let cache = ResultCache::new(100, Duration::from_secs(60));
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let cache = cache.clone();
                thread::spawn(move || {
                    cache.set(&generic(i), CachedValue::Json(json!(i)));
                    assert_eq!(cache.get(&generic(i)), Some(CachedValue::Json(json!(i))));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.stats().hits, 10);
    }
}
