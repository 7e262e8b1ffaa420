//! Persisted trip records and packing progress

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{CoverageAnalysis, PackingCategory, PackingResult, TripDetails};

/// Style stored when the trip did not name one
pub const DEFAULT_SAVED_STYLE: &str = "minimal";

/// A trip plus its generated list, ready to hand to a [`crate::trips::TripStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrip {
    pub user_id: i64,
    pub destination: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration: i64,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub weather_expected: String,
    #[serde(default = "default_saved_style")]
    pub packing_style: String,
    #[serde(default)]
    pub packing_list: Vec<PackingCategory<'static>>,
    #[serde(default = "empty_object")]
    pub wardrobe_matches: Value,
    #[serde(default)]
    pub coverage_analysis: CoverageAnalysis,
    #[serde(default)]
    pub notes: String,
}

fn default_saved_style() -> String {
    DEFAULT_SAVED_STYLE.to_string()
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl NewTrip {
    pub fn from_plan(user_id: i64, trip: &TripDetails, result: &PackingResult) -> Self {
        let packing_style = if trip.packing_style.is_empty() {
            DEFAULT_SAVED_STYLE.to_string()
        } else {
            trip.packing_style.clone()
        };

        Self {
            user_id,
            destination: trip.destination.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            duration: result.duration,
            activities: trip.activities.clone(),
            weather_expected: trip.weather_expected.clone(),
            packing_style,
            packing_list: result.categories.clone(),
            wardrobe_matches: result
                .wardrobe_matches
                .clone()
                .unwrap_or_else(empty_object),
            coverage_analysis: result.coverage,
            notes: String::new(),
        }
    }

    /// Stamp the draft with an id and timestamps.
    pub fn into_saved(self, id: String, now: DateTime<Utc>) -> SavedTrip {
        SavedTrip {
            id,
            user_id: self.user_id,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            duration: self.duration,
            activities: self.activities,
            weather_expected: self.weather_expected,
            packing_style: self.packing_style,
            packing_list: self.packing_list,
            wardrobe_matches: self.wardrobe_matches,
            coverage_analysis: self.coverage_analysis,
            is_completed: false,
            is_favorite: false,
            packed_items: BTreeSet::new(),
            created_at: now,
            updated_at: now,
            notes: self.notes,
        }
    }
}

/// A stored trip. Rows from the backend carry nulls for empty columns and zone-less
/// timestamps; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrip {
    /// Local stores mint uuids; the backend hands out integer ids
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub user_id: i64,
    pub destination: String,
    #[serde(deserialize_with = "utc_timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "utc_timestamp")]
    pub end_date: DateTime<Utc>,
    pub duration: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weather_expected: String,
    #[serde(default = "default_saved_style", deserialize_with = "style_or_default")]
    pub packing_style: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub packing_list: Vec<PackingCategory<'static>>,
    #[serde(default)]
    pub wardrobe_matches: Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub coverage_analysis: CoverageAnalysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,
    /// Checked-off items, keyed `"{category_index}-{item_index}"`
    #[serde(default, deserialize_with = "null_as_default")]
    pub packed_items: BTreeSet<String>,
    #[serde(deserialize_with = "utc_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "utc_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn style_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|style| !style.is_empty())
        .unwrap_or_else(default_saved_style))
}

fn utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// RFC 3339, or a timestamp without offset (`2026-01-01T10:00:00.123456`) read as UTC.
pub fn parse_utc_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .or_else(|_| raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()))
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

fn packed_key(category_index: usize, item_index: usize) -> String {
    format!("{category_index}-{item_index}")
}

impl SavedTrip {
    /// Flip the packed state of one list item. Returns the new state, or `None` when
    /// the indices do not point at an item.
    pub fn toggle_packed(&mut self, category_index: usize, item_index: usize) -> Option<bool> {
        self.packing_list
            .get(category_index)
            .and_then(|category| category.items.get(item_index))?;

        let key = packed_key(category_index, item_index);
        if self.packed_items.remove(&key) {
            Some(false)
        } else {
            self.packed_items.insert(key);
            Some(true)
        }
    }

    #[must_use]
    pub fn is_packed(&self, category_index: usize, item_index: usize) -> bool {
        self.packed_items
            .contains(&packed_key(category_index, item_index))
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.packing_list.iter().map(|c| c.items.len()).sum()
    }

    #[must_use]
    pub fn packed_count(&self) -> usize {
        self.packing_list
            .iter()
            .enumerate()
            .map(|(ci, category)| {
                (0..category.items.len())
                    .filter(|&ii| self.is_packed(ci, ii))
                    .count()
            })
            .sum()
    }

    /// `(packed, total)` for one category
    #[must_use]
    pub fn category_completion(&self, category_index: usize) -> Option<(usize, usize)> {
        let category = self.packing_list.get(category_index)?;
        let packed = (0..category.items.len())
            .filter(|&ii| self.is_packed(category_index, ii))
            .count();
        Some((packed, category.items.len()))
    }

    /// Apply a partial update. Returns false when the update carries no fields.
    pub fn apply(&mut self, update: TripUpdate, now: DateTime<Utc>) -> bool {
        if update.is_empty() {
            return false;
        }
        let TripUpdate {
            destination,
            start_date,
            end_date,
            activities,
            weather_expected,
            packing_style,
            packing_list,
            notes,
            is_completed,
            is_favorite,
            packed_items,
        } = update;

        if let Some(destination) = destination {
            self.destination = destination;
        }
        if let Some(start_date) = start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = end_date {
            self.end_date = end_date;
        }
        if let Some(activities) = activities {
            self.activities = activities;
        }
        if let Some(weather_expected) = weather_expected {
            self.weather_expected = weather_expected;
        }
        if let Some(packing_style) = packing_style {
            self.packing_style = packing_style;
        }
        if let Some(packing_list) = packing_list {
            self.packing_list = packing_list;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
        if let Some(is_completed) = is_completed {
            self.is_completed = is_completed;
        }
        if let Some(is_favorite) = is_favorite {
            self.is_favorite = is_favorite;
        }
        if let Some(packed_items) = packed_items {
            self.packed_items = packed_items;
        }
        self.updated_at = now;
        true
    }
}

/// Partial update for a saved trip; identity and timestamps are not updatable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packing_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packing_list: Option<Vec<PackingCategory<'static>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packed_items: Option<BTreeSet<String>>,
}

impl TripUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == TripUpdate::default()
    }

    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Default::default()
        }
    }

    pub fn completed(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PackingListItem, WardrobeItem};
    use crate::packing::create_intelligent_packing_list;
    use chrono::{Duration, TimeZone};

    fn sample_saved() -> SavedTrip {
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let trip = TripDetails {
            destination: "Lisbon".to_string(),
            start_date: start,
            end_date: start + Duration::days(4),
            activities: vec!["Beach/Pool".to_string()],
            weather_expected: "hot".to_string(),
            packing_style: String::new(),
        };
        let wardrobe = vec![WardrobeItem::new("Linen Shirt", "tops")];
        let result = PackingResult::local(
            create_intelligent_packing_list(&trip, &wardrobe, trip.duration_days()),
            trip.duration_days(),
        );
        NewTrip::from_plan(1, &trip, &result).into_saved("trip-1".to_string(), start)
    }

    #[test]
    fn test_from_plan_defaults() {
        let saved = sample_saved();
        assert_eq!(saved.packing_style, DEFAULT_SAVED_STYLE);
        assert_eq!(saved.wardrobe_matches, serde_json::json!({}));
        assert_eq!(saved.duration, 4);
        assert!(saved.coverage_analysis.available >= 1);
        assert!(!saved.is_completed && !saved.is_favorite);
    }

    #[test]
    fn test_packing_progress() {
        let mut saved = sample_saved();
        let total = saved.total_items();
        assert!(total > 4);
        assert_eq!(saved.packed_count(), 0);

        assert_eq!(saved.toggle_packed(0, 1), Some(true));
        assert_eq!(saved.toggle_packed(0, 2), Some(true));
        assert_eq!(saved.packed_count(), 2);
        assert_eq!(saved.category_completion(0), Some((2, 4)));

        assert_eq!(saved.toggle_packed(0, 1), Some(false));
        assert_eq!(saved.packed_count(), 1);
        assert_eq!(saved.toggle_packed(99, 0), None);
        assert_eq!(saved.category_completion(99), None);
    }

    #[test]
    fn test_apply_update() {
        let mut saved = sample_saved();
        let later = saved.updated_at + Duration::hours(2);

        assert!(!saved.apply(TripUpdate::default(), later));
        assert_eq!(saved.updated_at, saved.created_at);

        assert!(saved.apply(TripUpdate::favorite(true), later));
        assert!(saved.is_favorite);
        assert_eq!(saved.updated_at, later);
    }

    #[test]
    fn test_numeric_backend_ids_become_strings() {
        let mut value = serde_json::to_value(sample_saved()).unwrap();
        value["id"] = serde_json::json!(42);
        let trip: SavedTrip = serde_json::from_value(value).unwrap();
        assert_eq!(trip.id, "42");
    }

    #[test]
    fn test_saved_trip_round_trips_through_json() {
        let mut saved = sample_saved();
        saved.packing_list.push(crate::models::PackingCategory::new(
            "Extras",
            vec![PackingListItem::required("Travel pillow")],
        ));
        let json = serde_json::to_string(&saved).unwrap();
        let back: SavedTrip = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, saved.id);
        assert_eq!(back.packing_list, saved.packing_list);
        assert_eq!(back.coverage_analysis.needed, saved.coverage_analysis.needed);
        assert_eq!(back.created_at, saved.created_at);
    }

    #[test]
    fn test_backend_row_with_nulls_and_naive_timestamps() {
        let row = serde_json::json!({
            "id": "b5c2",
            "user_id": 1,
            "destination": "Reykjavik",
            "start_date": "2026-01-01T10:00:00.123456",
            "end_date": "2026-01-05T10:00:00",
            "duration": 4,
            "activities": [],
            "weather_expected": null,
            "packing_style": null,
            "packing_list": [],
            "wardrobe_matches": {},
            "coverage_analysis": {},
            "is_completed": false,
            "is_favorite": null,
            "created_at": "2026-01-01T09:30:00.5",
            "updated_at": "2026-01-01T09:30:00.5",
            "notes": null
        });
        let trip: SavedTrip = serde_json::from_value(row).unwrap();

        assert_eq!(trip.weather_expected, "");
        assert_eq!(trip.notes, "");
        assert_eq!(trip.packing_style, DEFAULT_SAVED_STYLE);
        assert!(!trip.is_favorite);
        assert_eq!(trip.coverage_analysis, CoverageAnalysis::default());
        assert_eq!(
            trip.start_date,
            Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap() + Duration::microseconds(123_456)
        );
        assert_eq!(trip.end_date, Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_partial_and_null_coverage() {
        let mut value = serde_json::to_value(sample_saved()).unwrap();
        value["coverage_analysis"] = serde_json::json!({ "available": 3 });
        let trip: SavedTrip = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(trip.coverage_analysis.available, 3);
        assert_eq!(trip.coverage_analysis.total_items, 0);

        value["coverage_analysis"] = serde_json::Value::Null;
        value.as_object_mut().unwrap().remove("packing_style");
        let trip: SavedTrip = serde_json::from_value(value).unwrap();
        assert_eq!(trip.coverage_analysis, CoverageAnalysis::default());
        assert_eq!(trip.packing_style, DEFAULT_SAVED_STYLE);
    }

    #[test]
    fn test_parse_utc_timestamp() {
        let offset = parse_utc_timestamp("2026-01-01T12:00:00+02:00").unwrap();
        assert_eq!(offset, Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap());
        assert!(parse_utc_timestamp("yesterday").is_err());
    }
}
