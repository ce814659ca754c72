// SPDX-License-Identifier: MIT

//! In-memory key-value store for tests and local development.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::error::AppError;
use crate::store::KvStore;

struct StoredValue {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Process-local store backed by a concurrent map. TTLs are honored lazily
/// on read, matching how the store-level TTL backstops the cache layer.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, StoredValue>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        if let Some(entry) = self.entries.get(key) {
            if Utc::now() > entry.expires_at {
                drop(entry);
                self.entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), AppError> {
        let expires_at = Utc::now() + Duration::seconds(ttl_secs as i64);
        self.entries
            .insert(key.to_string(), StoredValue { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete_roundtrip() {
        let store = MemoryStore::new();

        store
            .put("k", "v".to_string(), 60)
            .await
            .expect("put should succeed");
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));

        store.delete("k").await.expect("delete should succeed");
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_treated_as_absent() {
        let store = MemoryStore::new();
        store.put("k", "v".to_string(), 0).await.unwrap();

        // ttl 0 expires immediately
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("missing").await.is_ok());
    }
}
