use tracing::debug;

use crate::models::packing::{
    ACCESSORIES, ACTIVITY_SPECIFIC, CLOTHING_ESSENTIALS, FOOTWEAR, TRAVEL_ESSENTIALS,
    WEATHER_PROTECTION,
};
use crate::models::{
    ItemType, PackingCategory, PackingListItem, RequirementDescriptor, TripDetails, WardrobeItem,
};
use crate::packing::activity_rules::{ActivityRequirements, get_activity_requirements};
use crate::packing::categorizer::{CategorizedWardrobe, categorize_wardrobe};
use crate::packing::matcher::find_wardrobe_matches;
use crate::packing::requirements::{BaseRequirements, calculate_base_requirements};
use crate::packing::weather_rules::{WeatherRequirements, get_weather_requirements};

pub const WALKING_SHOES: &str = "Comfortable walking shoes";
pub const TRAVEL_ESSENTIAL_ITEMS: [&str; 4] =
    ["Passport/ID", "Phone charger", "Toiletries", "Medications"];

fn descriptors(names: &[String], item_type: ItemType) -> impl Iterator<Item = RequirementDescriptor> + '_ {
    names
        .iter()
        .map(move |name| RequirementDescriptor::new(name.clone(), item_type))
}

/// Run each descriptor through the match resolver.
pub fn create_items_with_matches<'w>(
    descriptors: impl IntoIterator<Item = RequirementDescriptor>,
    wardrobe: &CategorizedWardrobe<'w>,
) -> Vec<PackingListItem<'w>> {
    descriptors
        .into_iter()
        .map(|descriptor| {
            let matches = find_wardrobe_matches(&descriptor, wardrobe);
            PackingListItem::matched(descriptor, matches)
        })
        .collect()
}

/// Accessories from activities then weather, first occurrence wins.
fn merged_accessories(activity: &ActivityRequirements, weather: &WeatherRequirements) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for name in activity.accessories.iter().chain(&weather.accessories) {
        if !merged.contains(name) {
            merged.push(name.clone());
        }
    }
    merged
}

/// Assemble the categorized list. Category order is fixed: Clothing Essentials,
/// Activity Specific (if any activity clothing), Footwear, Weather Protection (if any),
/// Accessories (if any), Travel Essentials.
pub fn create_packing_list_with_matches<'w>(
    base: &BaseRequirements,
    activity: &ActivityRequirements,
    weather: &WeatherRequirements,
    wardrobe: &CategorizedWardrobe<'w>,
) -> Vec<PackingCategory<'w>> {
    let mut packing_list = Vec::with_capacity(6);

    packing_list.push(PackingCategory::new(
        CLOTHING_ESSENTIALS,
        create_items_with_matches(
            [
                RequirementDescriptor::new(format!("{} shirts/tops", base.tops), ItemType::Tops)
                    .with_quantity(base.tops),
                RequirementDescriptor::new(
                    format!("{} pants/bottoms", base.bottoms),
                    ItemType::Bottoms,
                )
                .with_quantity(base.bottoms),
                RequirementDescriptor::new(
                    format!("{} underwear", base.underwear),
                    ItemType::Underwear,
                )
                .with_quantity(base.underwear),
                RequirementDescriptor::new(format!("{} socks", base.socks), ItemType::Socks)
                    .with_quantity(base.socks),
            ],
            wardrobe,
        ),
    ));

    if activity.has_clothing() {
        packing_list.push(PackingCategory::new(
            ACTIVITY_SPECIFIC,
            create_items_with_matches(
                descriptors(&activity.tops, ItemType::Tops)
                    .chain(descriptors(&activity.bottoms, ItemType::Bottoms))
                    .chain(descriptors(&activity.special, ItemType::Special)),
                wardrobe,
            ),
        ));
    }

    packing_list.push(PackingCategory::new(
        FOOTWEAR,
        create_items_with_matches(
            std::iter::once(RequirementDescriptor::new(WALKING_SHOES, ItemType::Shoes))
                .chain(descriptors(&activity.shoes, ItemType::Shoes)),
            wardrobe,
        ),
    ));

    if weather.has_protection() {
        packing_list.push(PackingCategory::new(
            WEATHER_PROTECTION,
            create_items_with_matches(
                descriptors(&weather.outerwear, ItemType::Outerwear)
                    .chain(descriptors(&weather.accessories, ItemType::Accessories)),
                wardrobe,
            ),
        ));
    }

    let accessories = merged_accessories(activity, weather);
    if !accessories.is_empty() {
        packing_list.push(PackingCategory::new(
            ACCESSORIES,
            create_items_with_matches(descriptors(&accessories, ItemType::Accessories), wardrobe),
        ));
    }

    packing_list.push(PackingCategory::new(
        TRAVEL_ESSENTIALS,
        TRAVEL_ESSENTIAL_ITEMS
            .into_iter()
            .map(PackingListItem::required)
            .collect(),
    ));

    packing_list
}

/// Build the full packing list for a trip from the wardrobe inventory.
pub fn create_intelligent_packing_list<'w>(
    trip: &TripDetails,
    wardrobe_items: &'w [WardrobeItem],
    duration: i64,
) -> Vec<PackingCategory<'w>> {
    let wardrobe = categorize_wardrobe(wardrobe_items);
    let base = calculate_base_requirements(duration, trip.style());
    let activity = get_activity_requirements(&trip.activities);
    let weather = get_weather_requirements(&trip.weather_expected);

    debug!(
        destination = %trip.destination,
        duration,
        style = %trip.style(),
        wardrobe_items = wardrobe.len(),
        "Assembling packing list"
    );

    create_packing_list_with_matches(&base, &activity, &weather, &wardrobe)
}
