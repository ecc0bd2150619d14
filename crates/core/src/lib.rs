pub mod aggregate;
pub mod item;

pub use aggregate::{
    aggregate, CategorizedResult, CategoryBucket, PricedItem, FALLBACK_CATEGORY,
};
pub use item::LineItem;
