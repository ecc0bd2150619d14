use paragon_core::LineItem;

use crate::backend::{GenerationError, TextGeneration};
use crate::reply;

/// Single-shot, best-effort line-item extraction over a text backend.
pub struct LineItemParser {
    backend: Box<dyn TextGeneration>,
}

impl LineItemParser {
    pub fn new(backend: Box<dyn TextGeneration>) -> Self {
        Self { backend }
    }

    /// Prompt the backend with the receipt text and the allowed categories,
    /// then parse the reply with the fixed-stride triplet walk.
    ///
    /// Returns an empty list when the reply held fewer than three usable
    /// lines; fails only when the backend call itself fails (missing
    /// credential, network, unusable response envelope).
    pub async fn parse(
        &self,
        receipt_text: &str,
        categories: &[String],
        api_key: Option<&str>,
    ) -> Result<Vec<LineItem>, GenerationError> {
        let prompt = reply::build_prompt(receipt_text, categories);
        let raw_reply = self.backend.generate(&prompt, api_key).await?;
        Ok(reply::parse_reply(&raw_reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FixedGeneration;
    use rust_decimal::Decimal;

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn parses_backend_reply_into_items() {
        let parser = LineItemParser::new(Box::new(FixedGeneration::new(
            "Chleb pszenny\npieczywo\n4,99\nMasło extra\nnabiał\n7,49",
        )));
        let items = parser
            .parse("treść paragonu", &cats(&["nabiał"]), None)
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Chleb pszenny");
        assert_eq!(items[1].price, Decimal::new(749, 2));
    }

    #[tokio::test]
    async fn short_reply_yields_empty_list() {
        let parser = LineItemParser::new(Box::new(FixedGeneration::new("Tylko dwie\nlinie")));
        let items = parser.parse("tekst", &cats(&["nabiał"]), None).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        struct Failing;

        #[async_trait::async_trait]
        impl TextGeneration for Failing {
            async fn generate(
                &self,
                _prompt: &str,
                _api_key: Option<&str>,
            ) -> Result<String, GenerationError> {
                Err(GenerationError::MissingApiKey)
            }
        }

        let parser = LineItemParser::new(Box::new(Failing));
        let err = parser.parse("tekst", &[], None).await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey));
    }
}
