use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::models::{NewTrip, PackingResult, SavedTrip, TripDetails, TripUpdate, WardrobeItem};
use crate::planner::{TripPlannerService, plan_locally};
use crate::{PackwiseError, VERSION};

#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlannerService>,
}

impl AppState {
    pub fn new(planner: Arc<TripPlannerService>) -> Self {
        Self { planner }
    }
}

/// `{"status": "success", ...payload}`
#[derive(Serialize)]
pub struct Success<T> {
    status: &'static str,
    #[serde(flatten)]
    data: T,
}

fn success<T: Serialize>(data: T) -> Json<Success<T>> {
    Json(Success {
        status: "success",
        data,
    })
}

/// Failure rendered as `{"status": "error", "message": ...}`
pub enum ApiError {
    Service(PackwiseError),
    /// Request body or query string the extractor could not read
    Rejected { status: StatusCode, message: String },
}

impl From<PackwiseError> for ApiError {
    fn from(err: PackwiseError) -> Self {
        Self::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Service(err) => {
                let status = match &err {
                    PackwiseError::Validation { .. } => StatusCode::BAD_REQUEST,
                    PackwiseError::NotFound { .. } => StatusCode::NOT_FOUND,
                    PackwiseError::Api { .. } => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    error!("Request failed: {}", err);
                }
                (status, err.to_string())
            }
            ApiError::Rejected { status, message } => {
                debug!("Rejected request: {}", message);
                (status, message)
            }
        };
        let body = json!({ "status": "error", "message": message });
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<Success<T>>, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListRequest {
    pub trip_details: TripDetails,
    #[serde(default)]
    pub wardrobe_items: Option<Vec<WardrobeItem>>,
}

#[derive(Debug, Deserialize)]
pub struct TripsQuery {
    pub user_id: Option<i64>,
}

#[derive(Serialize)]
struct TripBody {
    trip: SavedTrip,
}

#[derive(Serialize)]
struct TripsBody {
    count: usize,
    trips: Vec<SavedTrip>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/packing-list", post(packing_list))
        .route("/trips", get(list_trips).post(save_trip))
        .route(
            "/trips/{id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .with_state(state)
}

async fn health() -> Json<Success<serde_json::Value>> {
    success(json!({ "service": "packwise", "version": VERSION }))
}

async fn packing_list(
    State(state): State<AppState>,
    request: Result<Json<PackingListRequest>, JsonRejection>,
) -> ApiResult<PackingResult> {
    let Json(request) = request?;
    let result = match request.wardrobe_items {
        Some(items) => {
            debug!("Planning with {} supplied wardrobe items", items.len());
            plan_locally(&request.trip_details, &items)
        }
        None => {
            state
                .planner
                .generate_smart_packing_list(&request.trip_details)
                .await?
        }
    };
    Ok(success(result))
}

async fn list_trips(
    State(state): State<AppState>,
    query: Result<Query<TripsQuery>, QueryRejection>,
) -> ApiResult<TripsBody> {
    let Query(query) = query?;
    let user_id = query.user_id.unwrap_or_else(|| state.planner.user_id());
    let trips = state.planner.trips().list_trips(user_id).await?;
    Ok(success(TripsBody {
        count: trips.len(),
        trips,
    }))
}

/// Takes the same record [`crate::backend::BackendClient`] posts, so one Packwise
/// server can act as the trip backend of another.
async fn save_trip(
    State(state): State<AppState>,
    trip: Result<Json<NewTrip>, JsonRejection>,
) -> Result<(StatusCode, Json<Success<TripBody>>), ApiError> {
    let Json(trip) = trip?;
    if trip.destination.trim().is_empty() {
        return Err(PackwiseError::validation("Destination is required").into());
    }
    let trip = state.planner.trips().save_trip(trip).await?;
    Ok((StatusCode::CREATED, success(TripBody { trip })))
}

async fn get_trip(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<TripBody> {
    let trip = state
        .planner
        .trips()
        .get_trip(&id)
        .await?
        .ok_or_else(|| PackwiseError::not_found(format!("trip {id}")))?;
    Ok(success(TripBody { trip }))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    update: Result<Json<TripUpdate>, JsonRejection>,
) -> ApiResult<TripBody> {
    let Json(update) = update?;
    let trip = state.planner.trips().update_trip(&id, update).await?;
    Ok(success(TripBody { trip }))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    if state.planner.trips().delete_trip(&id).await? {
        Ok(success(json!({ "deleted": true })))
    } else {
        Err(PackwiseError::not_found(format!("trip {id}")).into())
    }
}
