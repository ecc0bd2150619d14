use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::item::LineItem;

/// Catch-all bucket for items whose raw category is not in the caller's list.
pub const FALLBACK_CATEGORY: &str = "inne";

/// A line item as it appears inside a category bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedItem {
    pub name: String,
    pub price: Decimal,
}

/// One bucket of the categorized grouping, keyed by *normalized* category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBucket {
    pub category: String,
    pub items: Vec<PricedItem>,
}

/// The final output of the pipeline.
///
/// `categorized` serializes as a JSON object whose key order is bucket
/// creation order (first encounter of each normalized category).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedResult {
    pub items: Vec<LineItem>,
    #[serde(serialize_with = "buckets_as_map")]
    pub categorized: Vec<CategoryBucket>,
    pub total: Decimal,
    pub categories_used: Vec<String>,
}

/// Serialize an ordered bucket list as a `{category: [items]}` object.
pub fn buckets_as_map<S: Serializer>(
    buckets: &[CategoryBucket],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(buckets.len()))?;
    for bucket in buckets {
        map.serialize_entry(&bucket.category, &bucket.items)?;
    }
    map.end()
}

/// Group `items` by category normalized against `categories` and total them.
///
/// Normalization is an exact, case-sensitive membership test: a raw category
/// present in `categories` is kept, anything else lands in
/// [`FALLBACK_CATEGORY`]. The total sums the raw item prices (normalization
/// never changes it) and is rounded to two decimal places.
///
/// Pure function of its inputs.
pub fn aggregate(items: &[LineItem], categories: &[String]) -> CategorizedResult {
    let mut buckets: Vec<CategoryBucket> = Vec::new();
    let mut total = Decimal::ZERO;

    for item in items {
        total += item.price;

        let category = if categories.iter().any(|c| c == &item.category) {
            item.category.as_str()
        } else {
            FALLBACK_CATEGORY
        };

        let entry = PricedItem {
            name: item.name.clone(),
            price: item.price,
        };
        match buckets.iter_mut().find(|b| b.category == category) {
            Some(bucket) => bucket.items.push(entry),
            None => buckets.push(CategoryBucket {
                category: category.to_string(),
                items: vec![entry],
            }),
        }
    }

    CategorizedResult {
        items: items.to_vec(),
        categorized: buckets,
        total: total.round_dp(2),
        categories_used: categories.to_vec(),
    }
}
