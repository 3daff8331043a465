use super::{LlmClient, LlmRequest, LlmResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum FakeStep {
    Reply(String),
    Fail(String),
    /// Reply after sleeping; long delays simulate a hung judge.
    Delayed(Duration, String),
}

/// Deterministic judge for tests and offline runs.
///
/// Scripted steps are consumed in order; once exhausted every call gets the
/// fallback reply, or an error when none is set.
#[derive(Debug, Default)]
pub struct FakeClient {
    steps: Mutex<VecDeque<FakeStep>>,
    fallback: Option<String>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answers with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(reply.into()),
            ..Self::default()
        }
    }

    pub fn scripted(steps: impl IntoIterator<Item = FakeStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, reply: impl Into<String>) -> Self {
        self.fallback = Some(reply.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn next_step(&self) -> Option<FakeStep> {
        self.steps.lock().ok().and_then(|mut s| s.pop_front())
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn invoke(&self, request: &LlmRequest) -> anyhow::Result<LlmResponse> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }

        let content = match self.next_step() {
            Some(FakeStep::Reply(text)) => text,
            Some(FakeStep::Fail(msg)) => anyhow::bail!("{}", msg),
            Some(FakeStep::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                text
            }
            None => match &self.fallback {
                Some(text) => text.clone(),
                None => anyhow::bail!("fake judge has no scripted reply left"),
            },
        };

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            provider: "fake".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
