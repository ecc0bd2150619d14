use axum::Json;
use paragon_core::{aggregate, LineItem};
use rust_decimal::Decimal;

use crate::error::ApiError;
use crate::handlers::receipt::ReceiptResponse;
use crate::upload::{ReceiptUpload, UploadedFile};

/// Fixed line items standing in for OCR + generation. Lets a client exercise
/// upload handling, category parsing, and aggregation without Tesseract or a
/// Gemini credential.
fn mock_products() -> Vec<LineItem> {
    vec![
        LineItem::new("Chleb pszenny", "Groceries", Decimal::new(499, 2)),
        LineItem::new("Masło extra", "Nabial", Decimal::new(749, 2)),
        LineItem::new("Pomidory", "Nabial", Decimal::new(899, 2)),
        LineItem::new("Jabłka", "Groceries", Decimal::new(599, 2)),
        LineItem::new("Woda mineralna", "Groceries", Decimal::new(250, 2)),
        LineItem::new("Proszek do prania", "Groceries", Decimal::new(1999, 2)),
    ]
}

/// `POST /api/test-receipt` — the real aggregation over fixed products.
///
/// An attached image, if any, is spooled and discarded; it is never OCRed.
pub async fn test_receipt(request: ReceiptUpload) -> Result<Json<ReceiptResponse>, ApiError> {
    if let Some(file) = &request.file {
        if !file.filename.is_empty() {
            spool_and_discard(file).await?;
        }
    }

    let result = aggregate(&mock_products(), &request.categories);
    Ok(Json(result.into()))
}

/// Mirror the live endpoint's temp-file handling: write the upload to a
/// named temp file, then let the guard delete it — on every path.
async fn spool_and_discard(file: &UploadedFile) -> Result<(), ApiError> {
    let temp = tempfile::Builder::new()
        .prefix("paragon-")
        .suffix(&format!(".{}", file.extension()))
        .tempfile()
        .map_err(|e| ApiError::Processing(e.to_string()))?;
    tokio::fs::write(temp.path(), &file.bytes)
        .await
        .map_err(|e| ApiError::Processing(e.to_string()))?;

    tracing::info!(path = %temp.path().display(), "test upload spooled, discarding");
    Ok(())
}
