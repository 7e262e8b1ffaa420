//! Data models for Packwise
//!
//! This module contains the domain models organized by concern:
//! - Wardrobe: clothing items and their categories
//! - Trip: caller-supplied trip parameters, packing styles, activities
//! - Packing: requirement descriptors and the generated packing list
//! - Saved trip: persisted trips and packing progress

pub mod packing;
pub mod saved_trip;
pub mod trip;
pub mod wardrobe;

// Re-export all public types for convenient access
pub use packing::{
    CoverageAnalysis, ItemStatus, ItemType, PackingCategory, PackingListItem, PackingResult,
    RequirementDescriptor,
};
pub use saved_trip::{NewTrip, SavedTrip, TripUpdate};
pub use trip::{Activity, PackingStyle, StyleMultipliers, TripDetails};
pub use wardrobe::{WardrobeCategory, WardrobeItem};
