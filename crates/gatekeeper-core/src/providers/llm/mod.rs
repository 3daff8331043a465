//! Model invocation seam.
//!
//! The gate talks to its judge only through [`LlmClient`]; transports are
//! supplied by the embedding application.

pub mod fake;
pub mod replay;
pub mod tracing;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One judge call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmRequest {
    pub model: String,
    pub system_instruction: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub provider: String,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, request: &LlmRequest) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}
