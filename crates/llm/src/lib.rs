//! Promptory LLM
//!
//! The chat-completion boundary used for description generation,
//! categorization, feedback scoring and playground runs. Every call is a
//! single request/response exchange with an OpenAI-compatible endpoint.

pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::LlmProvider;
pub use types::*;
