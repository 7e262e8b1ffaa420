//! Trip planner service
//!
//! Composes a wardrobe source, the local packing engine, an optional backend enhancer and
//! a trip store. Built once at startup and shared; it holds no mutable state.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::Result;
use crate::models::{NewTrip, PackingResult, SavedTrip, TripDetails, WardrobeItem};
use crate::packing::create_intelligent_packing_list;
use crate::trips::TripStore;
use crate::wardrobe::WardrobeSource;

/// Body of the enhancement call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementRequest<'a> {
    pub trip_details: &'a TripDetails,
    pub wardrobe_items: &'a [WardrobeItem],
    pub duration: i64,
}

/// Extra fields a backend may lay over a local result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    #[serde(default)]
    pub recommendations: Option<Value>,
    #[serde(default)]
    pub wardrobe_matches: Option<Value>,
}

#[async_trait]
pub trait PackingEnhancer: Send + Sync {
    async fn enhance(&self, request: &EnhancementRequest<'_>) -> Result<Enhancement>;
}

/// Build a packing list from a wardrobe already in hand. Never fails.
#[must_use]
pub fn plan_locally(trip: &TripDetails, wardrobe: &[WardrobeItem]) -> PackingResult {
    let duration = trip.duration_days();
    PackingResult::local(
        create_intelligent_packing_list(trip, wardrobe, duration),
        duration,
    )
}

pub struct TripPlannerService {
    wardrobe: Arc<dyn WardrobeSource>,
    enhancer: Option<Arc<dyn PackingEnhancer>>,
    trips: Arc<dyn TripStore>,
    user_id: i64,
}

impl TripPlannerService {
    pub fn new(
        wardrobe: Arc<dyn WardrobeSource>,
        enhancer: Option<Arc<dyn PackingEnhancer>>,
        trips: Arc<dyn TripStore>,
        user_id: i64,
    ) -> Self {
        Self {
            wardrobe,
            enhancer,
            trips,
            user_id,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    #[must_use]
    pub fn trips(&self) -> &Arc<dyn TripStore> {
        &self.trips
    }

    /// Fetch the wardrobe, build the list locally and let the backend enhance it.
    ///
    /// A wardrobe fetch failure propagates. An enhancement failure is logged and the
    /// local result is returned as is.
    #[tracing::instrument(skip(self, trip), fields(destination = %trip.destination))]
    pub async fn generate_smart_packing_list(&self, trip: &TripDetails) -> Result<PackingResult> {
        let wardrobe = self.wardrobe.fetch_items().await?;
        debug!("Planning against {} wardrobe items", wardrobe.len());

        let mut result = plan_locally(trip, &wardrobe);
        info!(
            "Local packing list: {} categories, {:.0}% covered by wardrobe",
            result.categories.len(),
            result.coverage.coverage_percent
        );

        let Some(enhancer) = &self.enhancer else {
            return Ok(result);
        };

        let request = EnhancementRequest {
            trip_details: trip,
            wardrobe_items: &wardrobe,
            duration: result.duration,
        };
        match enhancer.enhance(&request).await {
            Ok(enhancement) => {
                debug!("Backend enhancement applied");
                result.recommendations = enhancement.recommendations;
                result.wardrobe_matches = enhancement.wardrobe_matches;
            }
            Err(e) => warn!("Packing list enhancement failed, using local list: {e}"),
        }
        Ok(result)
    }

    pub async fn save_trip(&self, trip: &TripDetails, result: &PackingResult) -> Result<SavedTrip> {
        self.trips
            .save_trip(NewTrip::from_plan(self.user_id, trip, result))
            .await
    }
}
