use std::collections::HashMap;

use crate::models::{WardrobeCategory, WardrobeItem};

/// Wardrobe items grouped into the six fixed buckets, borrowing from the inventory.
#[derive(Debug, Clone)]
pub struct CategorizedWardrobe<'w> {
    buckets: HashMap<WardrobeCategory, Vec<&'w WardrobeItem>>,
}

impl<'w> CategorizedWardrobe<'w> {
    /// Items keep their inventory order inside each bucket. Items whose category is
    /// not exactly one of the six tags land in no bucket.
    pub fn new(items: &'w [WardrobeItem]) -> Self {
        let mut buckets: HashMap<WardrobeCategory, Vec<&'w WardrobeItem>> = WardrobeCategory::ALL
            .into_iter()
            .map(|category| (category, Vec::new()))
            .collect();

        for item in items {
            if let Some(category) = item.wardrobe_category() {
                buckets.entry(category).or_default().push(item);
            }
        }

        Self { buckets }
    }

    #[must_use]
    pub fn bucket(&self, category: WardrobeCategory) -> &[&'w WardrobeItem] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn categorize_wardrobe(items: &[WardrobeItem]) -> CategorizedWardrobe<'_> {
    CategorizedWardrobe::new(items)
}
