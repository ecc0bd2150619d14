use std::sync::Arc;

use paragon_parse::GeminiClient;
use paragon_server::config::ServerConfig;
use paragon_server::pipeline::ReceiptPipeline;
use paragon_server::{build_router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set — requests must pass ?api_key=");
    }

    let generator = GeminiClient::with_model(config.gemini_api_key.clone(), &config.gemini_model);
    let pipeline = ReceiptPipeline::new(build_extractor(), Box::new(generator));

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

#[cfg(feature = "tesseract")]
fn build_extractor() -> Box<dyn paragon_ocr::TextExtractor> {
    Box::new(paragon_ocr::TesseractExtractor::polish())
}

#[cfg(not(feature = "tesseract"))]
fn build_extractor() -> Box<dyn paragon_ocr::TextExtractor> {
    tracing::warn!("built without the `tesseract` feature — receipt OCR will fail");
    Box::new(paragon_ocr::UnavailableExtractor)
}
