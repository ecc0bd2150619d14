use axum::extract::State;
use axum::Json;
use paragon_core::{aggregate::buckets_as_map, CategorizedResult, CategoryBucket, LineItem};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ApiError;
use crate::upload::{self, ReceiptUpload};
use crate::AppState;

/// Fixed label the mobile app uses as the transaction description.
pub const RECEIPT_DESCRIPTION: &str = "Paragon sklepowy";

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    /// Line items as the parser produced them — raw categories.
    pub products: Vec<LineItem>,
    /// Normalized grouping, bucket keys ⊆ caller categories ∪ {"inne"}.
    #[serde(serialize_with = "buckets_as_map")]
    pub categorized_products: Vec<CategoryBucket>,
    pub total_price: Decimal,
    pub categories_used: Vec<String>,
    /// Duplicate of `total_price`, kept for the transaction-creation client.
    pub amount: Decimal,
    pub description: &'static str,
}

impl From<CategorizedResult> for ReceiptResponse {
    fn from(result: CategorizedResult) -> Self {
        Self {
            products: result.items,
            categorized_products: result.categorized,
            total_price: result.total,
            categories_used: result.categories_used,
            amount: result.total,
            description: RECEIPT_DESCRIPTION,
        }
    }
}

/// `POST /api/receipt` — run the full pipeline on an uploaded receipt photo.
pub async fn process_receipt(
    State(state): State<AppState>,
    request: ReceiptUpload,
) -> Result<Json<ReceiptResponse>, ApiError> {
    let file = request.file.ok_or_else(|| {
        ApiError::Validation("Brak pliku w żądaniu (oczekiwano \"receipt\")".to_string())
    })?;
    if file.filename.is_empty() {
        return Err(ApiError::Validation("Nie wybrano pliku".to_string()));
    }
    if !upload::has_allowed_extension(&file.filename) {
        return Err(ApiError::Validation(format!(
            "Niedozwolone rozszerzenie pliku. Dozwolone: {}",
            upload::ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let result = state
        .pipeline
        .process(
            &file.bytes,
            &file.extension(),
            &request.categories,
            request.api_key.as_deref(),
        )
        .await?;

    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paragon_core::aggregate;

    fn item(name: &str, category: &str, cents: i64) -> LineItem {
        LineItem::new(name, category, Decimal::new(cents, 2))
    }

    #[test]
    fn response_mirrors_the_aggregation() {
        let items = vec![item("Masło", "nabiał", 749), item("Żelki", "słodycze", 549)];
        let result = aggregate(&items, &["nabiał".to_string()]);
        let response = ReceiptResponse::from(result);

        assert_eq!(response.products.len(), 2);
        assert_eq!(response.products[1].category, "słodycze");
        assert_eq!(response.amount, response.total_price);
        assert_eq!(response.description, "Paragon sklepowy");
    }

    #[test]
    fn response_serializes_categorized_as_object() {
        let items = vec![item("Masło", "nabiał", 749)];
        let result = aggregate(&items, &["nabiał".to_string()]);
        let json = serde_json::to_value(ReceiptResponse::from(result)).unwrap();

        assert!(json["categorized_products"]["nabiał"].is_array());
        assert_eq!(json["total_price"], serde_json::json!(7.49));
    }
}
