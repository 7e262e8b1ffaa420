//! Packing list generation
//!
//! Turns trip parameters and the wardrobe inventory into a categorized, quantified
//! packing list:
//! - Wardrobe categorization into the six fixed buckets
//! - Base quantities from trip duration and packing style
//! - Activity and weather rules adding specific items
//! - Wardrobe matching marking each item available or needed
//!
//! Everything here is synchronous and infallible.

pub mod activity_rules;
pub mod assembler;
pub mod categorizer;
pub mod matcher;
pub mod requirements;
pub mod weather_rules;

pub use activity_rules::{ActivityRequirements, ActivityRule, get_activity_requirements};
pub use assembler::{create_intelligent_packing_list, create_packing_list_with_matches};
pub use categorizer::{CategorizedWardrobe, categorize_wardrobe};
pub use matcher::find_wardrobe_matches;
pub use requirements::{BaseRequirements, calculate_base_requirements};
pub use weather_rules::{WeatherRequirements, get_weather_requirements};
