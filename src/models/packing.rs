//! Packing list output types
//!
//! A generated list borrows matched items from the caller's wardrobe. Results that
//! outlive the wardrobe snapshot (saved trips, enhanced results) are converted with
//! [`PackingCategory::into_owned`].

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::wardrobe::{WardrobeCategory, WardrobeItem};

pub const CLOTHING_ESSENTIALS: &str = "Clothing Essentials";
pub const ACTIVITY_SPECIFIC: &str = "Activity Specific";
pub const FOOTWEAR: &str = "Footwear";
pub const WEATHER_PROTECTION: &str = "Weather Protection";
pub const ACCESSORIES: &str = "Accessories";
pub const TRAVEL_ESSENTIALS: &str = "Travel Essentials";

/// Kind of item a requirement asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Tops,
    Bottoms,
    Dresses,
    Shoes,
    Accessories,
    Outerwear,
    Underwear,
    Socks,
    Special,
}

impl ItemType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Tops => "tops",
            ItemType::Bottoms => "bottoms",
            ItemType::Dresses => "dresses",
            ItemType::Shoes => "shoes",
            ItemType::Accessories => "accessories",
            ItemType::Outerwear => "outerwear",
            ItemType::Underwear => "underwear",
            ItemType::Socks => "socks",
            ItemType::Special => "special",
        }
    }

    /// Wardrobe bucket searched for this type; `None` for types nobody keeps in the wardrobe.
    #[must_use]
    pub fn wardrobe_category(&self) -> Option<WardrobeCategory> {
        match self {
            ItemType::Tops => Some(WardrobeCategory::Tops),
            ItemType::Bottoms => Some(WardrobeCategory::Bottoms),
            ItemType::Dresses => Some(WardrobeCategory::Dresses),
            ItemType::Shoes => Some(WardrobeCategory::Shoes),
            ItemType::Accessories => Some(WardrobeCategory::Accessories),
            ItemType::Outerwear => Some(WardrobeCategory::Outerwear),
            ItemType::Underwear | ItemType::Socks | ItemType::Special => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item the trip calls for, before wardrobe matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementDescriptor {
    pub name: String,
    pub item_type: ItemType,
    pub quantity: i64,
}

impl RequirementDescriptor {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            quantity: 1,
        }
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// At least one wardrobe item satisfies the requirement
    Available,
    /// Nothing in the wardrobe matches; must be acquired
    Needed,
    /// Fixed travel essential, never matched against the wardrobe
    Required,
}

impl ItemStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Needed => "needed",
            ItemStatus::Required => "required",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingListItem<'w> {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// `None` for travel essentials, which bypass matching entirely
    #[serde(default)]
    pub wardrobe_matches: Option<Vec<Cow<'w, WardrobeItem>>>,
    pub status: ItemStatus,
}

impl<'w> PackingListItem<'w> {
    /// Resolve a descriptor against its wardrobe matches.
    pub fn matched(descriptor: RequirementDescriptor, matches: Vec<&'w WardrobeItem>) -> Self {
        let status = if matches.is_empty() {
            ItemStatus::Needed
        } else {
            ItemStatus::Available
        };
        Self {
            name: descriptor.name,
            item_type: Some(descriptor.item_type),
            quantity: Some(descriptor.quantity),
            wardrobe_matches: Some(matches.into_iter().map(Cow::Borrowed).collect()),
            status,
        }
    }

    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_type: None,
            quantity: None,
            wardrobe_matches: None,
            status: ItemStatus::Required,
        }
    }

    #[must_use]
    pub fn matches(&self) -> &[Cow<'w, WardrobeItem>] {
        self.wardrobe_matches.as_deref().unwrap_or_default()
    }

    pub fn into_owned(self) -> PackingListItem<'static> {
        PackingListItem {
            name: self.name,
            item_type: self.item_type,
            quantity: self.quantity,
            wardrobe_matches: self.wardrobe_matches.map(|matches| {
                matches
                    .into_iter()
                    .map(|item| Cow::Owned(item.into_owned()))
                    .collect()
            }),
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingCategory<'w> {
    pub category: String,
    pub items: Vec<PackingListItem<'w>>,
}

impl<'w> PackingCategory<'w> {
    pub fn new(category: impl Into<String>, items: Vec<PackingListItem<'w>>) -> Self {
        Self {
            category: category.into(),
            items,
        }
    }

    pub fn into_owned(self) -> PackingCategory<'static> {
        PackingCategory {
            category: self.category,
            items: self
                .items
                .into_iter()
                .map(PackingListItem::into_owned)
                .collect(),
        }
    }
}

impl fmt::Display for PackingCategory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.category)?;
        for item in &self.items {
            let marker = match item.status {
                ItemStatus::Available => "✅",
                ItemStatus::Needed => "🛒",
                ItemStatus::Required => "📌",
            };
            match item.quantity {
                Some(quantity) if quantity != 1 => {
                    write!(f, "   {marker} {} (x{quantity})", item.name)?
                }
                _ => write!(f, "   {marker} {}", item.name)?,
            }
            let matches = item.matches();
            if !matches.is_empty() {
                let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
                write!(f, " ← {}", names.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// How much of a generated list the wardrobe already covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageAnalysis {
    pub total_items: usize,
    pub available: usize,
    pub needed: usize,
    pub required: usize,
    /// available / (available + needed), in percent; 0 when nothing is matchable
    pub coverage_percent: f64,
}

impl CoverageAnalysis {
    pub fn from_categories(categories: &[PackingCategory<'_>]) -> Self {
        let mut coverage = CoverageAnalysis::default();
        for item in categories.iter().flat_map(|c| c.items.iter()) {
            coverage.total_items += 1;
            match item.status {
                ItemStatus::Available => coverage.available += 1,
                ItemStatus::Needed => coverage.needed += 1,
                ItemStatus::Required => coverage.required += 1,
            }
        }
        let matchable = coverage.available + coverage.needed;
        if matchable > 0 {
            coverage.coverage_percent = coverage.available as f64 / matchable as f64 * 100.0;
        }
        coverage
    }
}

/// A generated packing list, optionally overlaid with backend recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingResult {
    pub categories: Vec<PackingCategory<'static>>,
    pub duration: i64,
    pub coverage: CoverageAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wardrobe_matches: Option<Value>,
}

impl PackingResult {
    pub fn local(categories: Vec<PackingCategory<'_>>, duration: i64) -> Self {
        let coverage = CoverageAnalysis::from_categories(&categories);
        Self {
            categories: categories
                .into_iter()
                .map(PackingCategory::into_owned)
                .collect(),
            duration,
            coverage,
            recommendations: None,
            wardrobe_matches: None,
        }
    }

    #[must_use]
    pub fn is_enhanced(&self) -> bool {
        self.recommendations.is_some() || self.wardrobe_matches.is_some()
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&PackingCategory<'static>> {
        self.categories.iter().find(|c| c.category == name)
    }
}
