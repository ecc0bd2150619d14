use paragon_core::{aggregate, CategorizedResult};
use paragon_ocr::{preprocess, OcrError, PreprocessError, TextExtractor};
use paragon_parse::{GenerationError, LineItemParser, TextGeneration};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("No text recognized in image")]
    EmptyText,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Orchestrates one request: spool → preprocess → OCR → parse → aggregate.
///
/// Stateless between requests; both backend calls are single-shot with no
/// timeout or retry, so a hanging backend stalls that request.
pub struct ReceiptPipeline {
    extractor: Box<dyn TextExtractor>,
    parser: LineItemParser,
}

impl ReceiptPipeline {
    pub fn new(extractor: Box<dyn TextExtractor>, generator: Box<dyn TextGeneration>) -> Self {
        Self {
            extractor,
            parser: LineItemParser::new(generator),
        }
    }

    /// Process an uploaded receipt image end to end.
    ///
    /// `extension` names the upload's file type (already validated); it only
    /// affects the temp file suffix. `api_key` overrides the generator's
    /// configured credential for this request.
    pub async fn process(
        &self,
        image: &[u8],
        extension: &str,
        categories: &[String],
        api_key: Option<&str>,
    ) -> Result<CategorizedResult, PipelineError> {
        let text = self.extract_text(image, extension).await?;
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyText);
        }
        tracing::info!(chars = text.len(), "receipt text recognized");

        let items = self.parser.parse(&text, categories, api_key).await?;
        tracing::info!(items = items.len(), "line items extracted");

        Ok(aggregate(&items, categories))
    }

    /// Spool the upload to a named temp file and run preprocessing + OCR on
    /// it. The temp guard drops when this function returns, so the file is
    /// deleted on success and failure alike — before the generation call.
    async fn extract_text(&self, image: &[u8], extension: &str) -> Result<String, PipelineError> {
        let temp = tempfile::Builder::new()
            .prefix("paragon-")
            .suffix(&format!(".{extension}"))
            .tempfile()?;
        tokio::fs::write(temp.path(), image).await?;

        let prepared = preprocess::prepare_for_ocr(temp.path())?;
        Ok(self.extractor.extract_text(&prepared)?)
    }
}
