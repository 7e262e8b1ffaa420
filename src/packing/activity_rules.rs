use serde::Serialize;

use crate::models::Activity;

/// Extra items a single activity calls for
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityRule {
    pub tops: &'static [&'static str],
    pub bottoms: &'static [&'static str],
    pub shoes: &'static [&'static str],
    pub accessories: &'static [&'static str],
    pub special: &'static [&'static str],
}

impl Activity {
    /// Item rule for this activity. Activities without specific clothing needs get an empty rule.
    #[must_use]
    pub fn rule(&self) -> ActivityRule {
        match self {
            Activity::BusinessMeetings => ActivityRule {
                tops: &["Business shirt/blouse"],
                bottoms: &["Dress pants/skirt"],
                shoes: &["Business shoes"],
                accessories: &["Belt", "Watch", "Business bag"],
                special: &[],
            },
            Activity::BeachPool => ActivityRule {
                tops: &[],
                bottoms: &[],
                shoes: &["Sandals/flip-flops"],
                accessories: &["Sun hat", "Sunglasses", "Beach bag"],
                special: &["Swimwear", "Beach cover-up"],
            },
            Activity::HikingOutdoor => ActivityRule {
                tops: &["Moisture-wicking shirts"],
                bottoms: &["Hiking pants/shorts"],
                shoes: &["Hiking boots"],
                accessories: &["Backpack", "Water bottle"],
                special: &[],
            },
            Activity::FineDining => ActivityRule {
                tops: &["Elegant shirt/blouse"],
                bottoms: &["Dress pants/elegant dress"],
                shoes: &["Dress shoes"],
                accessories: &["Nice jewelry"],
                special: &[],
            },
            Activity::Nightlife => ActivityRule {
                tops: &["Going-out tops"],
                bottoms: &["Party pants/dress"],
                shoes: &["Party shoes"],
                accessories: &[],
                special: &[],
            },
            Activity::CitySightseeing
            | Activity::CasualDining
            | Activity::Shopping
            | Activity::MuseumsCultural
            | Activity::SportsExercise
            | Activity::SpaWellness
            | Activity::Photography => ActivityRule::default(),
        }
    }
}

/// Item names contributed by the selected activities, not yet deduplicated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityRequirements {
    pub tops: Vec<String>,
    pub bottoms: Vec<String>,
    pub shoes: Vec<String>,
    pub accessories: Vec<String>,
    pub special: Vec<String>,
}

impl ActivityRequirements {
    fn extend(&mut self, rule: ActivityRule) {
        let owned = |names: &[&str]| names.iter().map(|name| name.to_string()).collect::<Vec<_>>();
        self.tops.extend(owned(rule.tops));
        self.bottoms.extend(owned(rule.bottoms));
        self.shoes.extend(owned(rule.shoes));
        self.accessories.extend(owned(rule.accessories));
        self.special.extend(owned(rule.special));
    }

    /// Whether the "Activity Specific" category has anything to show
    #[must_use]
    pub fn has_clothing(&self) -> bool {
        !(self.tops.is_empty() && self.bottoms.is_empty() && self.special.is_empty())
    }
}

/// Collect rule contributions in the order activities were given. Unknown tags are skipped.
pub fn get_activity_requirements<S: AsRef<str>>(activities: &[S]) -> ActivityRequirements {
    let mut requirements = ActivityRequirements::default();
    for tag in activities {
        match Activity::from_tag(tag.as_ref()) {
            Some(activity) => requirements.extend(activity.rule()),
            None => tracing::debug!("Ignoring unknown activity tag {:?}", tag.as_ref()),
        }
    }
    requirements
}
