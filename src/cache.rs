use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

use crate::{PackwiseError, Result};

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

/// Key/value cache with per-entry TTL, persisted on disk.
///
/// Constructed once at startup and shared by reference; there is no global instance.
pub struct PersistentCache {
    _db: fjall::Database,
    store: Keyspace,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

fn now_secs() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| PackwiseError::storage(e.to_string()))
}

impl PersistentCache {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(path.as_ref()).open()?;
        let store = db.keyspace("cache", fjall::KeyspaceCreateOptions::default)?;
        Ok(PersistentCache { _db: db, store })
    }

    /// Stores a serializable value with a time-to-live (TTL).
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = now_secs()?.saturating_add(ttl.as_secs());
        let entry = StoredEntry { value, expires_at };
        let bytes = serde_json::to_vec(&entry)?;

        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(|e| PackwiseError::storage(e.to_string()))??;
        Ok(())
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key_bytes))
                .await
                .map_err(|e| PackwiseError::storage(e.to_string()))??;

        if let Some(bytes) = maybe_bytes {
            let entry: StoredEntry<T> = serde_json::from_slice(&bytes)?;

            if now_secs()? < entry.expires_at {
                tracing::debug!("Key found and still fresh");
                Ok(Some(entry.value))
            } else {
                tracing::debug!("Key found but expired");
                self.remove(key).await?;
                Ok(None)
            }
        } else {
            tracing::debug!("Key not found");
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key))
            .await
            .map_err(|e| PackwiseError::storage(e.to_string()))??;
        Ok(())
    }
}
