pub mod backend;
pub mod gemini;
pub mod parser;
pub mod reply;

pub use backend::{FixedGeneration, GenerationError, TextGeneration};
pub use gemini::GeminiClient;
pub use parser::LineItemParser;
pub use reply::{build_prompt, extract_price, parse_reply};
