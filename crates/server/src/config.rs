use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Default credential for the text-generation backend; a per-request
    /// `api_key` query parameter overrides it.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl ServerConfig {
    /// Read configuration from the environment once, at startup. The values
    /// are handed to constructors explicitly — nothing below the boundary
    /// reads environment variables.
    pub fn from_env() -> Self {
        Self {
            bind_addr: parse_addr(std::env::var("PARAGON_ADDR").ok()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| paragon_parse::GeminiClient::DEFAULT_MODEL.to_string()),
        }
    }
}

fn parse_addr(raw: Option<String>) -> SocketAddr {
    raw.and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5000)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_defaults_to_port_5000() {
        assert_eq!(parse_addr(None), SocketAddr::from(([0, 0, 0, 0], 5000)));
    }

    #[test]
    fn addr_parses_override() {
        assert_eq!(
            parse_addr(Some("127.0.0.1:8080".to_string())),
            SocketAddr::from(([127, 0, 0, 1], 8080))
        );
    }

    #[test]
    fn unparseable_addr_falls_back_to_default() {
        assert_eq!(
            parse_addr(Some("not an address".to_string())),
            SocketAddr::from(([0, 0, 0, 0], 5000))
        );
    }
}
