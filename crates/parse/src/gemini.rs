use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backend::{GenerationError, TextGeneration};

/// Text-generation backend using Google's Generative Language REST API.
///
/// One `generateContent` call per parse; no retry, no streaming. The
/// credential is resolved per call: an explicit override wins, otherwise
/// the key the client was constructed with is used.
pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ResponseError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseError {
    message: String,
}

impl GeminiClient {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";

    pub fn new(api_key: Option<String>) -> Self {
        Self::with_model(api_key, Self::DEFAULT_MODEL)
    }

    pub fn with_model(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            model: model.into(),
            api_key,
        }
    }

    fn request_body(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[async_trait]
impl TextGeneration for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        api_key: Option<&str>,
    ) -> Result<String, GenerationError> {
        let key = api_key
            .or(self.api_key.as_deref())
            .ok_or(GenerationError::MissingApiKey)?;

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, key
        );

        let response = self
            .http
            .post(&url)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Request(format!(
                "Gemini API error ({status}): {body}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Reply(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(GenerationError::Request(format!(
                "Gemini API error: {}",
                error.message
            )));
        }

        let text = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| GenerationError::Reply("Gemini returned no candidates".to_string()))?;

        tracing::debug!(model = %self.model, reply_len = text.len(), "generation reply received");
        Ok(text)
    }
}
