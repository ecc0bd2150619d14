use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Narrow seam over the OCR engine.
///
/// Implementations take preprocessed PNG bytes and return whatever text the
/// engine recognized — possibly empty. Deciding what an empty result means
/// is the caller's job, not the extractor's.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

// ── Fixed backend (always available, used for tests) ─────────────────────────

/// Returns a pre-set string regardless of input — lets the pipeline and the
/// HTTP layer be exercised without Tesseract installed.
pub struct FixedTextExtractor {
    pub text: String,
}

impl FixedTextExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextExtractor for FixedTextExtractor {
    fn extract_text(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

// ── Unavailable backend ──────────────────────────────────────────────────────

/// Placeholder used when the binary was built without the `tesseract`
/// feature: every call fails with [`OcrError::NotAvailable`].
pub struct UnavailableExtractor;

impl TextExtractor for UnavailableExtractor {
    fn extract_text(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ───────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrError, TextExtractor};
    use leptess::LepTess;

    /// Default traineddata language: receipts processed here are Polish.
    pub const RECEIPT_LANG: &str = "pol";

    pub struct TesseractExtractor {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractExtractor {
        /// Extractor for Polish receipts, using the system traineddata path.
        pub fn polish() -> Self {
            Self::new(None, RECEIPT_LANG)
        }

        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self {
                data_path,
                lang: lang.to_string(),
            }
        }
    }

    impl TextExtractor for TesseractExtractor {
        fn extract_text(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut engine = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            engine
                .set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            engine
                .get_utf8_text()
                .map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_extractor_returns_preset_text() {
        let extractor = FixedTextExtractor::new("Masło extra 7,49");
        assert_eq!(
            extractor.extract_text(b"fake image data").unwrap(),
            "Masło extra 7,49"
        );
    }

    #[test]
    fn fixed_extractor_ignores_image_content() {
        let extractor = FixedTextExtractor::new("paragon");
        assert_eq!(extractor.extract_text(b"anything").unwrap(), "paragon");
        assert_eq!(extractor.extract_text(b"").unwrap(), "paragon");
    }

    #[test]
    fn unavailable_extractor_always_errors() {
        let err = UnavailableExtractor.extract_text(b"img").unwrap_err();
        assert!(matches!(err, OcrError::NotAvailable));
    }
}
