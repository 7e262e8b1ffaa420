//! Wardrobe match resolution
//!
//! Candidates come from the bucket of the descriptor's type. An item matches when its
//! category equals the type, or when any word of the descriptor name is a substring of
//! the item's name or category. Substring matching is deliberately loose: "shirt"
//! matches a "t-shirts" category.

use crate::models::{RequirementDescriptor, WardrobeItem};
use crate::packing::categorizer::CategorizedWardrobe;

/// Category-equality path
#[must_use]
pub fn category_matches(descriptor: &RequirementDescriptor, item: &WardrobeItem) -> bool {
    item.category == descriptor.item_type.as_str()
}

/// Keyword path: any whitespace-separated word of the lowercased descriptor name
/// found inside the lowercased item name or category.
#[must_use]
pub fn keyword_matches(descriptor: &RequirementDescriptor, item: &WardrobeItem) -> bool {
    let wanted = descriptor.name.to_lowercase();
    let name = item.name.to_lowercase();
    let category = item.category.to_lowercase();

    wanted
        .split_whitespace()
        .any(|keyword| name.contains(keyword) || category.contains(keyword))
}

#[must_use]
pub fn is_match(descriptor: &RequirementDescriptor, item: &WardrobeItem) -> bool {
    category_matches(descriptor, item) || keyword_matches(descriptor, item)
}

/// Matches in wardrobe order. Types without a wardrobe bucket (underwear, socks,
/// special) never match anything.
pub fn find_wardrobe_matches<'w>(
    descriptor: &RequirementDescriptor,
    wardrobe: &CategorizedWardrobe<'w>,
) -> Vec<&'w WardrobeItem> {
    let Some(category) = descriptor.item_type.wardrobe_category() else {
        return Vec::new();
    };

    wardrobe
        .bucket(category)
        .iter()
        .copied()
        .filter(|item| is_match(descriptor, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use crate::packing::categorizer::categorize_wardrobe;

    #[test]
    fn test_category_path_ignores_name_text() {
        let tee = WardrobeItem::new("Blue Cotton T-Shirt", "tops");
        let descriptor = RequirementDescriptor::new("Going-out tops", ItemType::Tops);
        assert!(category_matches(&descriptor, &tee));

        let unrelated = RequirementDescriptor::new("xyz", ItemType::Tops);
        assert!(category_matches(&unrelated, &tee));
        assert!(!keyword_matches(&unrelated, &tee));
    }

    #[test]
    fn test_category_path_requires_same_type() {
        let belt = WardrobeItem::new("Leather Belt", "accessories");
        assert!(is_match(&RequirementDescriptor::new("Belt", ItemType::Accessories), &belt));

        let shoes = RequirementDescriptor::new("Dress shoes", ItemType::Shoes);
        assert!(!category_matches(&shoes, &belt));
        assert!(!is_match(&shoes, &belt));
    }

    #[test]
    fn test_keyword_path_alone() {
        let belt = WardrobeItem::new("Leather Belt", "accessories");
        let descriptor = RequirementDescriptor::new("Belt bag", ItemType::Special);
        assert!(!category_matches(&descriptor, &belt));
        assert!(keyword_matches(&descriptor, &belt));

        let shirt = WardrobeItem::new("Plain Tee", "t-shirts");
        let descriptor = RequirementDescriptor::new("Moisture-wicking shirt", ItemType::Tops);
        assert!(!category_matches(&descriptor, &shirt));
        assert!(keyword_matches(&descriptor, &shirt));
    }

    #[test]
    fn test_keyword_path_is_case_insensitive() {
        let boots = WardrobeItem::new("Trail HIKING Boots", "shoes");
        let descriptor = RequirementDescriptor::new("Hiking boots", ItemType::Outerwear);
        assert!(keyword_matches(&descriptor, &boots));
    }

    #[test]
    fn test_find_matches_uses_descriptor_bucket() {
        let items = vec![
            WardrobeItem::new("Black Dress Pants", "bottoms"),
            WardrobeItem::new("Dress Shirt", "tops"),
            WardrobeItem::new("Denim Shorts", "bottoms"),
        ];
        let wardrobe = categorize_wardrobe(&items);

        let matches = find_wardrobe_matches(
            &RequirementDescriptor::new("Dress pants/skirt", ItemType::Bottoms),
            &wardrobe,
        );
        let names: Vec<&str> = matches.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Black Dress Pants", "Denim Shorts"]);
        assert!(std::ptr::eq(matches[0], &items[0]));
    }

    #[test]
    fn test_unbucketed_types_never_match() {
        let items = vec![
            WardrobeItem::new("Wool Socks", "socks"),
            WardrobeItem::new("Swimwear", "special"),
        ];
        let wardrobe = categorize_wardrobe(&items);
        for (name, item_type) in [
            ("3 socks", ItemType::Socks),
            ("3 underwear", ItemType::Underwear),
            ("Swimwear", ItemType::Special),
        ] {
            let descriptor = RequirementDescriptor::new(name, item_type);
            assert!(find_wardrobe_matches(&descriptor, &wardrobe).is_empty());
        }
    }
}
