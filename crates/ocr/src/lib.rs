pub mod preprocess;
pub mod recognizer;

pub use preprocess::{prepare_for_ocr, prepare_for_ocr_from_bytes, PreprocessError};
pub use recognizer::{FixedTextExtractor, OcrError, TextExtractor, UnavailableExtractor};

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractExtractor;
