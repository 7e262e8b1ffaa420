//! Wardrobe backend client
//!
//! Every response body is decoded once into [`ApiEnvelope`], keyed on `status`. Reads
//! retry transient failures. Writes and the enhancement call are sent once, since a
//! write the backend committed before the response failed must not be repeated.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::BackendConfig;
use crate::models::{NewTrip, SavedTrip, TripUpdate, WardrobeItem};
use crate::planner::{Enhancement, EnhancementRequest, PackingEnhancer};
use crate::trips::TripStore;
use crate::wardrobe::WardrobeSource;
use crate::{PackwiseError, Result};

/// Response wrapper used by every backend endpoint
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiEnvelope<T> {
    Success(T),
    Error {
        #[serde(default)]
        message: String,
    },
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<T> {
        match self {
            ApiEnvelope::Success(payload) => Ok(payload),
            ApiEnvelope::Error { message } => Err(PackwiseError::api(if message.is_empty() {
                "Backend reported an error".to_string()
            } else {
                message
            })),
        }
    }
}

/// Decode a body into an envelope; anything that is not one is an API error
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice::<ApiEnvelope<T>>(body)
        .map_err(|e| PackwiseError::api(format!("Unexpected response shape: {e}")))?
        .into_result()
}

#[derive(Debug, Deserialize)]
struct ItemsPayload {
    #[serde(default)]
    items: Vec<WardrobeItem>,
}

#[derive(Debug, Deserialize)]
struct TripPayload {
    trip: SavedTrip,
}

#[derive(Debug, Deserialize)]
struct TripsPayload {
    #[serde(default)]
    trips: Vec<SavedTrip>,
}

#[derive(Debug, Deserialize)]
struct DeletedPayload {
    #[serde(default = "deleted_default")]
    deleted: bool,
}

fn deleted_default() -> bool {
    true
}

pub struct BackendClient {
    base_url: String,
    // Single attempt: writes and enhancement
    plain: Client,
    retrying: ClientWithMiddleware,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let plain = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("Packwise/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let retrying = ClientBuilder::new(plain.clone())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            plain,
            retrying,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_body(response: Response) -> Result<Vec<u8>> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let detail = String::from_utf8_lossy(&body);
            return Err(PackwiseError::api_status(
                status.as_u16(),
                format!("{status}: {}", detail.trim()),
            ));
        }
        Ok(body.to_vec())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        decode_envelope(&Self::read_body(response).await?)
    }

    /// Map a 404 to `None`
    async fn decode_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(response).await.map(Some)
    }

    #[instrument(skip(self))]
    pub async fn fetch_wardrobe(&self) -> Result<Vec<WardrobeItem>> {
        let response = self.retrying.get(self.url("/api/wardrobe/items")).send().await?;
        let payload: ItemsPayload = Self::decode(response).await?;
        debug!("Backend returned {} wardrobe items", payload.items.len());
        Ok(payload.items)
    }

    #[instrument(skip(self, request), fields(duration = request.duration))]
    pub async fn enhance_packing_list(
        &self,
        request: &EnhancementRequest<'_>,
    ) -> Result<Enhancement> {
        let response = self
            .plain
            .post(self.url("/api/trip-planner/enhanced-packing"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn health(&self) -> Result<Value> {
        let response = self.retrying.get(self.url("/health")).send().await?;
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl WardrobeSource for BackendClient {
    async fn fetch_items(&self) -> Result<Vec<WardrobeItem>> {
        self.fetch_wardrobe().await
    }
}

#[async_trait]
impl PackingEnhancer for BackendClient {
    async fn enhance(&self, request: &EnhancementRequest<'_>) -> Result<Enhancement> {
        self.enhance_packing_list(request).await
    }
}

#[async_trait]
impl TripStore for BackendClient {
    #[instrument(skip(self, trip), fields(destination = %trip.destination))]
    async fn save_trip(&self, trip: NewTrip) -> Result<SavedTrip> {
        let response = self
            .plain
            .post(self.url("/api/trips"))
            .json(&trip)
            .send()
            .await?;
        let payload: TripPayload = Self::decode(response).await?;
        Ok(payload.trip)
    }

    async fn list_trips(&self, user_id: i64) -> Result<Vec<SavedTrip>> {
        let response = self
            .retrying
            .get(self.url(&format!("/api/trips?user_id={user_id}")))
            .send()
            .await?;
        let payload: TripsPayload = Self::decode(response).await?;
        let mut trips = payload.trips;
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    async fn get_trip(&self, id: &str) -> Result<Option<SavedTrip>> {
        let response = self
            .retrying
            .get(self.url(&format!("/api/trips/{id}")))
            .send()
            .await?;
        Ok(Self::decode_optional::<TripPayload>(response)
            .await?
            .map(|payload| payload.trip))
    }

    async fn update_trip(&self, id: &str, update: TripUpdate) -> Result<SavedTrip> {
        if update.is_empty() {
            return Err(PackwiseError::validation("No valid fields to update"));
        }
        let response = self
            .plain
            .put(self.url(&format!("/api/trips/{id}")))
            .json(&update)
            .send()
            .await?;
        Self::decode_optional::<TripPayload>(response)
            .await?
            .map(|payload| payload.trip)
            .ok_or_else(|| PackwiseError::not_found(format!("trip {id}")))
    }

    async fn delete_trip(&self, id: &str) -> Result<bool> {
        let response = self
            .plain
            .delete(self.url(&format!("/api/trips/{id}")))
            .send()
            .await?;
        Ok(Self::decode_optional::<DeletedPayload>(response)
            .await?
            .is_some_and(|payload| payload.deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_envelope() {
        let body = br#"{"status": "success", "items": [{"name": "Parka", "category": "outerwear"}]}"#;
        let payload: ItemsPayload = decode_envelope(body).unwrap();
        assert_eq!(payload.items[0].name, "Parka");
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = br#"{"status": "error", "message": "wardrobe locked"}"#;
        let err = decode_envelope::<ItemsPayload>(body).unwrap_err();
        assert!(err.to_string().contains("wardrobe locked"));
    }

    #[test]
    fn test_decode_rejects_other_shapes() {
        for body in [
            &br#"{"success": true, "items": []}"#[..],
            br#"{"status": "pending"}"#,
            br#"[1, 2, 3]"#,
        ] {
            let err = decode_envelope::<ItemsPayload>(body).unwrap_err();
            assert!(matches!(err, PackwiseError::Api { status: None, .. }));
        }
    }

    #[test]
    fn test_enhancement_payload_fields_are_optional() {
        let body = br#"{"status": "success", "recommendations": ["Layer up"]}"#;
        let enhancement: Enhancement = decode_envelope(body).unwrap();
        assert!(enhancement.recommendations.is_some());
        assert!(enhancement.wardrobe_matches.is_none());
    }

    #[test]
    fn test_client_trims_base_url() {
        let config = BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..BackendConfig::default()
        };
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }
}
