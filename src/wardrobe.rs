//! Wardrobe data sources
//!
//! The packing engine needs a full snapshot of the wardrobe before it can run. A failure
//! to fetch one propagates; an empty wardrobe is fine.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::cache::PersistentCache;
use crate::models::WardrobeItem;
use crate::{PackwiseError, Result};

const SNAPSHOT_KEY: &str = "wardrobe_snapshot";

#[async_trait]
pub trait WardrobeSource: Send + Sync {
    /// The complete inventory in one call
    async fn fetch_items(&self) -> Result<Vec<WardrobeItem>>;
}

#[async_trait]
impl<T: WardrobeSource + ?Sized> WardrobeSource for Arc<T> {
    async fn fetch_items(&self) -> Result<Vec<WardrobeItem>> {
        (**self).fetch_items().await
    }
}

/// Wardrobe held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticWardrobe {
    items: Vec<WardrobeItem>,
}

impl StaticWardrobe {
    pub fn new(items: Vec<WardrobeItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl WardrobeSource for StaticWardrobe {
    async fn fetch_items(&self) -> Result<Vec<WardrobeItem>> {
        Ok(self.items.clone())
    }
}

/// Wardrobe exported to a JSON file: either a bare array of items or `{"items": [...]}`
#[derive(Debug, Clone)]
pub struct JsonFileWardrobe {
    path: PathBuf,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum WardrobeFile {
    Items(Vec<WardrobeItem>),
    Wrapped { items: Vec<WardrobeItem> },
}

impl JsonFileWardrobe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WardrobeSource for JsonFileWardrobe {
    async fn fetch_items(&self) -> Result<Vec<WardrobeItem>> {
        debug!("Reading wardrobe from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await?;
        let items = match serde_json::from_slice::<WardrobeFile>(&bytes) {
            Ok(WardrobeFile::Items(items)) | Ok(WardrobeFile::Wrapped { items }) => items,
            Err(e) => {
                return Err(PackwiseError::validation(format!(
                    "{} is not a wardrobe export: {e}",
                    self.path.display()
                )));
            }
        };
        Ok(items)
    }
}

/// Remembers the last good snapshot of another source and serves it when that
/// source fails.
pub struct CachedWardrobeSource<S> {
    inner: S,
    cache: Arc<PersistentCache>,
    ttl: Duration,
}

impl<S: WardrobeSource> CachedWardrobeSource<S> {
    pub fn new(inner: S, cache: Arc<PersistentCache>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }
}

#[async_trait]
impl<S: WardrobeSource> WardrobeSource for CachedWardrobeSource<S> {
    async fn fetch_items(&self) -> Result<Vec<WardrobeItem>> {
        match self.inner.fetch_items().await {
            Ok(items) => {
                if let Err(e) = self.cache.put(SNAPSHOT_KEY, items.clone(), self.ttl).await {
                    warn!("Could not store wardrobe snapshot: {e}");
                }
                Ok(items)
            }
            Err(fetch_err) => match self.cache.get::<Vec<WardrobeItem>>(SNAPSHOT_KEY).await {
                Ok(Some(items)) => {
                    info!(
                        "Wardrobe fetch failed ({fetch_err}), using cached snapshot of {} items",
                        items.len()
                    );
                    Ok(items)
                }
                Ok(None) => Err(fetch_err),
                Err(cache_err) => {
                    warn!("Wardrobe snapshot unreadable: {cache_err}");
                    Err(fetch_err)
                }
            },
        }
    }
}
