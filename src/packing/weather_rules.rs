use serde::Serialize;

/// Item names contributed by the expected weather
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeatherRequirements {
    pub tops: Vec<String>,
    pub outerwear: Vec<String>,
    pub accessories: Vec<String>,
    pub special: Vec<String>,
}

struct WeatherCondition {
    tokens: &'static [&'static str],
    tops: &'static [&'static str],
    outerwear: &'static [&'static str],
    accessories: &'static [&'static str],
}

const CONDITIONS: [WeatherCondition; 3] = [
    WeatherCondition {
        tokens: &["cold", "winter"],
        tops: &[],
        outerwear: &["Warm jacket/coat", "Sweaters"],
        accessories: &["Gloves", "Scarf", "Warm hat"],
    },
    WeatherCondition {
        tokens: &["rain"],
        tops: &[],
        outerwear: &["Rain jacket"],
        accessories: &["Umbrella"],
    },
    WeatherCondition {
        tokens: &["hot", "summer"],
        tops: &["Light, breathable shirts"],
        outerwear: &[],
        accessories: &["Sun hat", "Sunglasses"],
    },
];

/// Every condition whose token appears in the (lowercased) text contributes, so
/// "cold and rainy" gets both the cold and the rain items. Unmatched text adds nothing.
pub fn get_weather_requirements(weather: &str) -> WeatherRequirements {
    let weather = weather.to_lowercase();
    let mut requirements = WeatherRequirements::default();

    for condition in &CONDITIONS {
        if !condition.tokens.iter().any(|token| weather.contains(token)) {
            continue;
        }
        requirements
            .tops
            .extend(condition.tops.iter().map(|s| s.to_string()));
        requirements
            .outerwear
            .extend(condition.outerwear.iter().map(|s| s.to_string()));
        requirements
            .accessories
            .extend(condition.accessories.iter().map(|s| s.to_string()));
    }

    requirements
}

impl WeatherRequirements {
    /// Whether the "Weather Protection" category has anything to show
    #[must_use]
    pub fn has_protection(&self) -> bool {
        !(self.outerwear.is_empty() && self.accessories.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cold")]
    #[case("Winter wonderland")]
    #[case("COLD nights")]
    fn test_cold_conditions(#[case] text: &str) {
        let requirements = get_weather_requirements(text);
        assert_eq!(requirements.outerwear, vec!["Warm jacket/coat", "Sweaters"]);
        assert_eq!(requirements.accessories, vec!["Gloves", "Scarf", "Warm hat"]);
        assert!(requirements.tops.is_empty());
    }

    #[test]
    fn test_conditions_are_unioned() {
        let requirements = get_weather_requirements("cold and rainy");
        assert_eq!(
            requirements.outerwear,
            vec!["Warm jacket/coat", "Sweaters", "Rain jacket"]
        );
        assert_eq!(
            requirements.accessories,
            vec!["Gloves", "Scarf", "Warm hat", "Umbrella"]
        );
    }

    #[test]
    fn test_hot_weather_adds_tops() {
        let requirements = get_weather_requirements("hot");
        assert_eq!(requirements.tops, vec!["Light, breathable shirts"]);
        assert_eq!(requirements.accessories, vec!["Sun hat", "Sunglasses"]);
        assert!(requirements.outerwear.is_empty());
        assert!(requirements.has_protection());
    }

    #[test]
    fn test_substring_matching_is_literal() {
        // "photo" contains "hot", "Ukraine" contains "rain"
        assert_eq!(get_weather_requirements("photo shoot").tops.len(), 1);
        assert_eq!(get_weather_requirements("Ukraine").outerwear, vec!["Rain jacket"]);
    }

    #[rstest]
    #[case("")]
    #[case("mild")]
    #[case("sunny")]
    #[case("mixed")]
    fn test_unmatched_weather_adds_nothing(#[case] text: &str) {
        let requirements = get_weather_requirements(text);
        assert_eq!(requirements, WeatherRequirements::default());
        assert!(!requirements.has_protection());
    }
}
