//! Imaging Flow LLM
//!
//! Provides the text-generation seam used by report drafting:
//! - `LlmProvider` trait
//! - Google Gemini (`generateContent`) implementation
//! - HTTP client factory

pub mod gemini;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use provider::LlmProvider;
pub use types::*;
