use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The six wardrobe buckets a clothing item can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WardrobeCategory {
    Tops,
    Bottoms,
    Dresses,
    Shoes,
    Accessories,
    Outerwear,
}

impl WardrobeCategory {
    pub const ALL: [WardrobeCategory; 6] = [
        WardrobeCategory::Tops,
        WardrobeCategory::Bottoms,
        WardrobeCategory::Dresses,
        WardrobeCategory::Shoes,
        WardrobeCategory::Accessories,
        WardrobeCategory::Outerwear,
    ];

    /// Lowercase tag as stored on wardrobe items
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WardrobeCategory::Tops => "tops",
            WardrobeCategory::Bottoms => "bottoms",
            WardrobeCategory::Dresses => "dresses",
            WardrobeCategory::Shoes => "shoes",
            WardrobeCategory::Accessories => "accessories",
            WardrobeCategory::Outerwear => "outerwear",
        }
    }

    /// Exact, case-sensitive lookup of a category tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == tag)
    }
}

impl fmt::Display for WardrobeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clothing item owned by the user, as delivered by the wardrobe source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem {
    /// Backend identifier, numeric or textual depending on the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub name: String,
    /// Lowercase category tag; anything outside the six buckets is never matched
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl WardrobeItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: category.into(),
            color: None,
        }
    }

    #[must_use]
    pub fn wardrobe_category(&self) -> Option<WardrobeCategory> {
        WardrobeCategory::from_tag(&self.category)
    }
}
