//! Trip parameters supplied by the caller

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// What the traveller told us about the trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    pub destination: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Activity tags; anything outside [`Activity::ALL`] is ignored
    #[serde(default)]
    pub activities: Vec<String>,
    /// Free text such as "cold and rainy"
    #[serde(default)]
    pub weather_expected: String,
    /// Raw style name; see [`PackingStyle::parse`]
    #[serde(default)]
    pub packing_style: String,
}

impl TripDetails {
    /// Whole days between start and end, rounded up. Not clamped: an end date
    /// before the start yields zero or a negative count.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        let millis = (self.end_date - self.start_date).num_milliseconds() as f64;
        (millis / MILLIS_PER_DAY).ceil() as i64
    }

    #[must_use]
    pub fn style(&self) -> PackingStyle {
        PackingStyle::parse(&self.packing_style)
    }
}

/// How many clothing units per day the traveller wants to bring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackingStyle {
    Minimal,
    #[default]
    Comfort,
    Fashion,
    Business,
}

/// Share of one clothing unit per trip day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleMultipliers {
    pub tops: f64,
    pub bottoms: f64,
    pub dresses: f64,
}

impl PackingStyle {
    pub const ALL: [PackingStyle; 4] = [
        PackingStyle::Minimal,
        PackingStyle::Comfort,
        PackingStyle::Fashion,
        PackingStyle::Business,
    ];

    /// Unknown names fall back to [`PackingStyle::Comfort`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "minimal" => PackingStyle::Minimal,
            "comfort" => PackingStyle::Comfort,
            "fashion" => PackingStyle::Fashion,
            "business" => PackingStyle::Business,
            _ => PackingStyle::Comfort,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PackingStyle::Minimal => "minimal",
            PackingStyle::Comfort => "comfort",
            PackingStyle::Fashion => "fashion",
            PackingStyle::Business => "business",
        }
    }

    #[must_use]
    pub fn multipliers(&self) -> StyleMultipliers {
        match self {
            PackingStyle::Minimal => StyleMultipliers {
                tops: 0.7,
                bottoms: 0.5,
                dresses: 0.3,
            },
            PackingStyle::Comfort => StyleMultipliers {
                tops: 1.0,
                bottoms: 0.6,
                dresses: 0.4,
            },
            PackingStyle::Fashion => StyleMultipliers {
                tops: 1.3,
                bottoms: 0.8,
                dresses: 0.6,
            },
            PackingStyle::Business => StyleMultipliers {
                tops: 1.1,
                bottoms: 0.7,
                dresses: 0.5,
            },
        }
    }

    /// Short description shown next to the style in the planner
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            PackingStyle::Minimal => "Pack light with versatile pieces",
            PackingStyle::Comfort => "Prioritize comfort over style",
            PackingStyle::Fashion => "Stylish outfits for every occasion",
            PackingStyle::Business => "Professional with some casual items",
        }
    }
}

impl fmt::Display for PackingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity tags the trip planner offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    BusinessMeetings,
    BeachPool,
    HikingOutdoor,
    CitySightseeing,
    FineDining,
    CasualDining,
    Nightlife,
    Shopping,
    MuseumsCultural,
    SportsExercise,
    SpaWellness,
    Photography,
}

impl Activity {
    pub const ALL: [Activity; 12] = [
        Activity::BusinessMeetings,
        Activity::BeachPool,
        Activity::HikingOutdoor,
        Activity::CitySightseeing,
        Activity::FineDining,
        Activity::CasualDining,
        Activity::Nightlife,
        Activity::Shopping,
        Activity::MuseumsCultural,
        Activity::SportsExercise,
        Activity::SpaWellness,
        Activity::Photography,
    ];

    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Activity::BusinessMeetings => "Business Meetings",
            Activity::BeachPool => "Beach/Pool",
            Activity::HikingOutdoor => "Hiking/Outdoor",
            Activity::CitySightseeing => "City Sightseeing",
            Activity::FineDining => "Fine Dining",
            Activity::CasualDining => "Casual Dining",
            Activity::Nightlife => "Nightlife",
            Activity::Shopping => "Shopping",
            Activity::MuseumsCultural => "Museums/Cultural",
            Activity::SportsExercise => "Sports/Exercise",
            Activity::SpaWellness => "Spa/Wellness",
            Activity::Photography => "Photography",
        }
    }

    /// Exact tag lookup
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|activity| activity.tag() == tag)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn trip_spanning(span: Duration) -> TripDetails {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        TripDetails {
            destination: "Paris".to_string(),
            start_date: start,
            end_date: start + span,
            activities: vec![],
            weather_expected: String::new(),
            packing_style: String::new(),
        }
    }

    #[rstest]
    #[case(Duration::days(5), 5)]
    #[case(Duration::days(5) + Duration::hours(1), 6)]
    #[case(Duration::hours(3), 1)]
    #[case(Duration::zero(), 0)]
    #[case(-Duration::days(2), -2)]
    #[case(-Duration::hours(30), -1)]
    fn test_duration_rounds_up(#[case] span: Duration, #[case] expected: i64) {
        assert_eq!(trip_spanning(span).duration_days(), expected);
    }

    #[rstest]
    #[case("minimal", PackingStyle::Minimal)]
    #[case("fashion", PackingStyle::Fashion)]
    #[case("business", PackingStyle::Business)]
    #[case("comfort", PackingStyle::Comfort)]
    #[case("Business", PackingStyle::Comfort)]
    #[case("", PackingStyle::Comfort)]
    #[case("glamping", PackingStyle::Comfort)]
    fn test_style_parse(#[case] name: &str, #[case] expected: PackingStyle) {
        assert_eq!(PackingStyle::parse(name), expected);
    }

    #[test]
    fn test_activity_vocabulary_round_trips_tags() {
        for activity in Activity::ALL {
            assert_eq!(Activity::from_tag(activity.tag()), Some(activity));
        }
        assert_eq!(Activity::from_tag("Skydiving"), None);
    }

    #[test]
    fn test_trip_details_wire_names() {
        let json = r#"{
            "destination": "Oslo",
            "startDate": "2026-01-10T00:00:00Z",
            "endDate": "2026-01-14T00:00:00Z",
            "activities": ["Hiking/Outdoor"],
            "weatherExpected": "cold",
            "packingStyle": "minimal"
        }"#;
        let trip: TripDetails = serde_json::from_str(json).unwrap();
        assert_eq!(trip.duration_days(), 4);
        assert_eq!(trip.style(), PackingStyle::Minimal);
        assert_eq!(trip.weather_expected, "cold");
    }
}
