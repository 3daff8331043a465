use super::{LlmClient, LlmRequest, LlmResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Wraps a client in a `gen_ai.client.request` span.
///
/// Prompt and reply text are never recorded on the span, only sizes.
pub struct TracingLlmClient {
    inner: Arc<dyn LlmClient>,
}

impl TracingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmClient for TracingLlmClient {
    async fn invoke(&self, request: &LlmRequest) -> anyhow::Result<LlmResponse> {
        let span = info_span!(
            "gen_ai.client.request",
            "gen_ai.system" = self.inner.provider_name(),
            "gen_ai.request.model" = request.model.as_str(),
            "gen_ai.request.temperature" = f64::from(request.temperature),
            "gen_ai.request.max_tokens" = request.max_tokens,
            "gatekeeper.prompt_chars" = request.user_prompt.len(),
            "gatekeeper.reply_chars" = tracing::field::Empty,
            "gatekeeper.duration_ms" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.invoke(request).await;
            let span = tracing::Span::current();
            span.record(
                "gatekeeper.duration_ms",
                u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            );

            match &result {
                Ok(resp) => {
                    span.record("gatekeeper.reply_chars", resp.content.len());
                }
                Err(e) => {
                    span.record("error", true);
                    span.record("error.message", e.to_string().as_str());
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}
