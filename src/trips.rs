//! Saved trip persistence
//!
//! [`TripStore`] is implemented by the wardrobe backend (see [`crate::backend`]) and by
//! [`LocalTripStore`], which keeps trips in a fjall keyspace next to the cache.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use fjall::Keyspace;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tokio::task;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{NewTrip, SavedTrip, TripUpdate};
use crate::{PackwiseError, Result};

#[async_trait]
pub trait TripStore: Send + Sync {
    async fn save_trip(&self, trip: NewTrip) -> Result<SavedTrip>;

    /// Trips of one user, newest first
    async fn list_trips(&self, user_id: i64) -> Result<Vec<SavedTrip>>;

    async fn get_trip(&self, id: &str) -> Result<Option<SavedTrip>>;

    /// Fails with a validation error for an empty update and `NotFound` for an unknown id
    async fn update_trip(&self, id: &str, update: TripUpdate) -> Result<SavedTrip>;

    /// Returns whether a trip was removed
    async fn delete_trip(&self, id: &str) -> Result<bool>;
}

const INDEX_KEY: &str = "index";

fn trip_key(id: &str) -> String {
    format!("trip/{id}")
}

/// Trips stored on disk, one JSON document per trip plus an index of ids
pub struct LocalTripStore {
    _db: fjall::Database,
    store: Keyspace,
    // serializes read-modify-write of the index
    write_lock: Mutex<()>,
}

impl LocalTripStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(path.as_ref()).open()?;
        let store = db.keyspace("trips", fjall::KeyspaceCreateOptions::default)?;
        Ok(Self {
            _db: db,
            store,
            write_lock: Mutex::new(()),
        })
    }

    async fn read<T: DeserializeOwned + Send + 'static>(&self, key: String) -> Result<Option<T>> {
        let store = self.store.clone();
        let bytes = task::spawn_blocking(move || store.get(key.as_bytes()))
            .await
            .map_err(|e| PackwiseError::storage(e.to_string()))??;
        bytes
            .map(|b| serde_json::from_slice(&b).map_err(PackwiseError::from))
            .transpose()
    }

    async fn write<T: Serialize>(&self, key: String, value: &T) -> Result<()> {
        let store = self.store.clone();
        let bytes = serde_json::to_vec(value)?;
        task::spawn_blocking(move || store.insert(key.as_bytes(), bytes))
            .await
            .map_err(|e| PackwiseError::storage(e.to_string()))??;
        Ok(())
    }

    async fn erase(&self, key: String) -> Result<()> {
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key.as_bytes()))
            .await
            .map_err(|e| PackwiseError::storage(e.to_string()))??;
        Ok(())
    }

    async fn index(&self) -> Result<Vec<String>> {
        Ok(self.read(INDEX_KEY.to_string()).await?.unwrap_or_default())
    }
}

#[async_trait]
impl TripStore for LocalTripStore {
    #[tracing::instrument(level = "debug", skip(self, trip), fields(destination = %trip.destination))]
    async fn save_trip(&self, trip: NewTrip) -> Result<SavedTrip> {
        let _guard = self.write_lock.lock().await;
        let saved = trip.into_saved(Uuid::new_v4().to_string(), Utc::now());

        self.write(trip_key(&saved.id), &saved).await?;
        let mut ids = self.index().await?;
        ids.push(saved.id.clone());
        self.write(INDEX_KEY.to_string(), &ids).await?;

        info!("Saved trip {} to {}", saved.id, saved.destination);
        Ok(saved)
    }

    async fn list_trips(&self, user_id: i64) -> Result<Vec<SavedTrip>> {
        let mut trips = Vec::new();
        for id in self.index().await? {
            match self.read::<SavedTrip>(trip_key(&id)).await? {
                Some(trip) if trip.user_id == user_id => trips.push(trip),
                Some(_) => {}
                None => debug!("Index lists {id} but no trip is stored"),
            }
        }
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    async fn get_trip(&self, id: &str) -> Result<Option<SavedTrip>> {
        self.read(trip_key(id)).await
    }

    async fn update_trip(&self, id: &str, update: TripUpdate) -> Result<SavedTrip> {
        if update.is_empty() {
            return Err(PackwiseError::validation("No valid fields to update"));
        }
        let _guard = self.write_lock.lock().await;
        let mut trip = self
            .get_trip(id)
            .await?
            .ok_or_else(|| PackwiseError::not_found(format!("trip {id}")))?;

        trip.apply(update, Utc::now());
        self.write(trip_key(id), &trip).await?;
        Ok(trip)
    }

    async fn delete_trip(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut ids = self.index().await?;
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            return Ok(false);
        }

        self.erase(trip_key(id)).await?;
        self.write(INDEX_KEY.to_string(), &ids).await?;
        info!("Deleted trip {id}");
        Ok(true)
    }
}
