use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry extracted from a receipt.
///
/// `category` is the label exactly as the text backend proposed it — it is
/// mapped onto the caller's vocabulary only during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    /// Raw category label, not yet normalized.
    pub category: String,
    /// Zero when no numeric value was recognized on the price line.
    pub price: Decimal,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_price_as_number() {
        let item = LineItem::new("Chleb pszenny", "pieczywo", Decimal::new(499, 2));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["name"], "Chleb pszenny");
        assert_eq!(json["price"], serde_json::json!(4.99));
    }

    #[test]
    fn zero_price_roundtrip() {
        let item = LineItem::new("Reklamówka", "inne", Decimal::ZERO);
        let json = serde_json::to_string(&item).unwrap();
        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
