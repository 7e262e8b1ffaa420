//! `Packwise` - wardrobe-aware trip packing lists
//!
//! This library builds categorized, quantified packing lists from trip details and the
//! user's wardrobe, marks which items the wardrobe already covers, and persists planned
//! trips together with packing progress.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod packing;
pub mod planner;
pub mod trips;
pub mod wardrobe;
pub mod web;

// Re-export core types for public API
pub use backend::BackendClient;
pub use cache::PersistentCache;
pub use config::PackwiseConfig;
pub use error::PackwiseError;
pub use models::{
    PackingCategory, PackingListItem, PackingResult, SavedTrip, TripDetails, WardrobeItem,
};
pub use packing::create_intelligent_packing_list;
pub use planner::{PackingEnhancer, TripPlannerService, plan_locally};
pub use trips::{LocalTripStore, TripStore};
pub use wardrobe::WardrobeSource;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PackwiseError>;
