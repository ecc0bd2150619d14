use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::pipeline::PipelineError;

/// Client-facing errors. Messages are what the mobile app shows the user,
/// hence Polish.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request rejected before any processing happened.
    #[error("{0}")]
    Validation(String),
    /// The upload could not be turned into text — covers decode failures,
    /// OCR engine faults, and empty recognition output.
    #[error("Nie udało się odczytać tekstu z obrazu")]
    Unreadable,
    /// Everything else. The underlying message is embedded in the response.
    #[error("Wystąpił błąd podczas przetwarzania: {0}")]
    Processing(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::Unreadable => StatusCode::BAD_REQUEST,
            ApiError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request processing failed");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match &err {
            PipelineError::Preprocess(_) | PipelineError::Ocr(_) | PipelineError::EmptyText => {
                tracing::warn!(error = %err, "receipt image unreadable");
                ApiError::Unreadable
            }
            PipelineError::Io(_) | PipelineError::Generation(_) => {
                ApiError::Processing(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paragon_ocr::OcrError;
    use paragon_parse::GenerationError;

    #[test]
    fn ocr_failures_map_to_unreadable() {
        let err: ApiError = PipelineError::Ocr(OcrError::Engine("boom".into())).into();
        assert!(matches!(err, ApiError::Unreadable));

        let err: ApiError = PipelineError::EmptyText.into();
        assert!(matches!(err, ApiError::Unreadable));
    }

    #[test]
    fn generation_failures_map_to_processing_with_message() {
        let err: ApiError =
            PipelineError::Generation(GenerationError::MissingApiKey).into();
        match err {
            ApiError::Processing(msg) => assert!(msg.contains("API key")),
            other => panic!("expected Processing, got {other:?}"),
        }
    }

    #[test]
    fn display_uses_polish_user_messages() {
        assert_eq!(
            ApiError::Unreadable.to_string(),
            "Nie udało się odczytać tekstu z obrazu"
        );
        assert!(ApiError::Processing("x".into())
            .to_string()
            .starts_with("Wystąpił błąd podczas przetwarzania"));
    }
}
