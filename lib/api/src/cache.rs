use std::time::{Duration, Instant};

use ahash::AHashMap;
use parking_lot::Mutex;
use serde_json::Value;

/// Time-boxed memoization of rendered list responses, keyed by the request
/// query string. Entries expire after the configured TTL and the whole cache
/// is cleared on catalog writes.
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<AHashMap<String, (Instant, Value)>>,
}

impl ResponseCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(AHashMap::new()),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some((stored_at, value)) => {
                if stored_at.elapsed() < self.ttl {
                    return Some(value.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            entries.remove(key);
        }
        None
    }

    pub fn put(&self, key: String, value: Value) {
        self.entries.lock().insert(key, (Instant::now(), value));
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_hit_and_clear() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.put("key".to_string(), json!({"hit": true}));
        assert_eq!(cache.get("key"), Some(json!({"hit": true})));
        assert_eq!(cache.get("other"), None);

        cache.clear();
        assert_eq!(cache.get("key"), None);
    }

    #[test]
    fn test_cache_expiry() {
        let cache = ResponseCache::new(Duration::from_millis(10));
        cache.put("key".to_string(), json!(1));
        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(cache.get("key"), None);
    }
}
