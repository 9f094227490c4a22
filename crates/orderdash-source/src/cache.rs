//! In-process read-through cache for fetched source documents.
//!
//! Entries are keyed by a SHA-256 of the URL plus the serialized fetch
//! options, so two requests only share an entry when every option matches.
//! Expired entries are dropped lazily on lookup.

use std::collections::HashMap;
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tokio::time::Instant;

const KEY_PREFIX: &str = "import_data:";

#[derive(Debug, Clone)]
struct CacheEntry {
    document: serde_json::Value,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the cache key for `url` fetched with the serialized `options`.
    #[must_use]
    pub fn key_for(url: &str, serialized_options: &str) -> String {
        let digest = Sha256::digest(format!("{url}{serialized_options}").as_bytes());
        format!("{KEY_PREFIX}{digest:x}")
    }

    /// Returns the cached document, or `None` on a miss or an expired entry.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.document.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn put(&self, key: String, document: serde_json::Value, ttl: Duration) {
        let entry = CacheEntry {
            document,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().await.insert(key, entry);
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_depends_on_url_and_options() {
        let a = ResponseCache::key_for("https://a.example.com", r#"{"timeout_secs":30}"#);
        let b = ResponseCache::key_for("https://a.example.com", r#"{"timeout_secs":60}"#);
        let c = ResponseCache::key_for("https://b.example.com", r#"{"timeout_secs":30}"#);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with(KEY_PREFIX));
        assert_eq!(
            a,
            ResponseCache::key_for("https://a.example.com", r#"{"timeout_secs":30}"#)
        );
    }

    #[tokio::test]
    async fn returns_stored_document_within_ttl() {
        let cache = ResponseCache::new();
        cache
            .put("k".into(), json!({"orders": []}), Duration::from_secs(600))
            .await;
        assert_eq!(cache.get("k").await, Some(json!({"orders": []})));
    }

    #[tokio::test]
    async fn miss_returns_none() {
        let cache = ResponseCache::new();
        assert!(cache.get("missing").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn expired_entries_are_evicted_on_lookup() {
        let cache = ResponseCache::new();
        cache.put("k".into(), json!([1]), Duration::ZERO).await;
        assert!(cache.get("k").await.is_none());
        assert!(cache.is_empty().await);
    }
}
