use axum::extract::{FromRequest, Multipart, Query, Request};
use axum::http::header;
use serde::Deserialize;

use crate::error::ApiError;

/// Multipart field carrying the receipt image.
pub const UPLOAD_FIELD: &str = "receipt";
/// Multipart field carrying a JSON array of category labels.
pub const CATEGORIES_FIELD: &str = "categories";

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Category vocabulary used when the caller supplies none.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["nabiał", "mięso", "chemia", "warzywa", "owoce"];

#[derive(Debug, Default, Deserialize)]
struct UploadQuery {
    categories: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Lowercased filename extension, `jpg` when the name has none. Used for
    /// the temp file suffix only — validation goes through
    /// [`has_allowed_extension`].
    pub fn extension(&self) -> String {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "jpg".to_string())
    }
}

/// The one normalized request struct the handlers see, whatever mix of
/// multipart fields and query parameters the client used.
///
/// Precedence: a `categories` form field (JSON array) wins over the
/// `categories` query parameter (comma-separated); neither means
/// [`DEFAULT_CATEGORIES`]. The credential only ever comes from the
/// `api_key` query parameter.
#[derive(Debug)]
pub struct ReceiptUpload {
    pub file: Option<UploadedFile>,
    pub categories: Vec<String>,
    pub api_key: Option<String>,
}

impl ReceiptUpload {
    pub fn default_categories() -> Vec<String> {
        DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
    }
}

pub fn has_allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

impl<S: Send + Sync> FromRequest<S> for ReceiptUpload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query: UploadQuery = Query::try_from_uri(req.uri())
            .map(|Query(q)| q)
            .unwrap_or_default();

        let mut file = None;
        let mut form_categories = None;

        if is_multipart(&req) {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::Validation(format!("Niepoprawne żądanie: {e}")))?;

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| ApiError::Validation(format!("Niepoprawne żądanie: {e}")))?
            {
                let name = field.name().unwrap_or_default().to_string();
                match name.as_str() {
                    UPLOAD_FIELD => {
                        let filename = field.file_name().unwrap_or_default().to_string();
                        let bytes = field.bytes().await.map_err(|e| {
                            ApiError::Validation(format!("Niepoprawne żądanie: {e}"))
                        })?;
                        file = Some(UploadedFile {
                            filename,
                            bytes: bytes.to_vec(),
                        });
                    }
                    CATEGORIES_FIELD => {
                        let raw = field.text().await.map_err(|e| {
                            ApiError::Validation(format!("Niepoprawne żądanie: {e}"))
                        })?;
                        let parsed: Vec<String> = serde_json::from_str(&raw).map_err(|_| {
                            ApiError::Validation(
                                "Niepoprawny format kategorii (oczekiwano tablicy JSON)"
                                    .to_string(),
                            )
                        })?;
                        form_categories = Some(parsed);
                    }
                    _ => {}
                }
            }
        }

        let categories = match form_categories {
            Some(from_form) => from_form,
            None => match query.categories {
                Some(raw) => raw.split(',').map(|s| s.to_string()).collect(),
                None => Self::default_categories(),
            },
        };

        Ok(Self {
            file,
            categories,
            api_key: query.api_key,
        })
    }
}
