use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured for the text-generation backend")]
    MissingApiKey,
    #[error("backend request failed: {0}")]
    Request(String),
    #[error("backend reply unusable: {0}")]
    Reply(String),
}

/// Abstraction over a generative text backend.
///
/// One method, one shot: send a prompt, get the model's reply text back.
/// `api_key` overrides whatever credential the implementation was built
/// with; passing `None` falls back to the configured one.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        api_key: Option<&str>,
    ) -> Result<String, GenerationError>;
}

// ── Fixed backend (always available, used for tests) ─────────────────────────

/// Returns a pre-set reply — lets the parsing pipeline be exercised without
/// network access or a credential.
pub struct FixedGeneration {
    pub reply: String,
}

impl FixedGeneration {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl TextGeneration for FixedGeneration {
    async fn generate(
        &self,
        _prompt: &str,
        _api_key: Option<&str>,
    ) -> Result<String, GenerationError> {
        Ok(self.reply.clone())
    }
}
