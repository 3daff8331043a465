use crate::errors::GateError;
use crate::judge::JudgeGate;
use crate::providers::llm::{LlmRequest, LlmResponse};
use tokio::time::{sleep, timeout, Duration};

/// One judge call bounded by `timeout_ms`, retried up to `max_retries` times.
pub(crate) async fn call_judge_impl(
    gate: &JudgeGate,
    request: &LlmRequest,
) -> Result<LlmResponse, GateError> {
    let cfg = &gate.config;
    let max_attempts = cfg.max_retries.saturating_add(1);
    let budget = Duration::from_millis(cfg.timeout_ms);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let err = match timeout(budget, gate.client.invoke(request)).await {
            Ok(Ok(resp)) => {
                tracing::debug!(
                    gate = %cfg.gate_name,
                    provider = gate.client.provider_name(),
                    attempt,
                    "judge replied"
                );
                return Ok(resp);
            }
            Ok(Err(source)) => GateError::ModelInvocation {
                attempts: attempt,
                source,
            },
            Err(_) => GateError::Timeout {
                attempts: attempt,
                timeout_ms: cfg.timeout_ms,
            },
        };

        if attempt >= max_attempts {
            return Err(err);
        }
        tracing::debug!(
            gate = %cfg.gate_name,
            attempt,
            max_attempts,
            error = %err,
            "judge call failed; retrying"
        );
        if cfg.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(cfg.retry_backoff_ms)).await;
        }
    }
}
