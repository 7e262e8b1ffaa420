use serde::Serialize;

use crate::models::PackingStyle;

/// Tops and bottoms never drop below this, however short the trip.
pub const MIN_TOPS_AND_BOTTOMS: i64 = 2;
pub const BASE_SHOES: i64 = 2;

/// Base clothing quantities for a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseRequirements {
    pub tops: i64,
    pub bottoms: i64,
    pub dresses: i64,
    pub underwear: i64,
    pub socks: i64,
    pub shoes: i64,
}

fn scaled(duration: i64, multiplier: f64) -> i64 {
    (duration as f64 * multiplier).ceil() as i64
}

/// Quantities for `duration` days in the given style. Underwear and socks are
/// `duration + 1` without clamping, so zero or negative durations carry through.
pub fn calculate_base_requirements(duration: i64, style: PackingStyle) -> BaseRequirements {
    let multipliers = style.multipliers();

    BaseRequirements {
        tops: scaled(duration, multipliers.tops).max(MIN_TOPS_AND_BOTTOMS),
        bottoms: scaled(duration, multipliers.bottoms).max(MIN_TOPS_AND_BOTTOMS),
        dresses: scaled(duration, multipliers.dresses),
        underwear: duration + 1,
        socks: duration + 1,
        shoes: BASE_SHOES,
    }
}
