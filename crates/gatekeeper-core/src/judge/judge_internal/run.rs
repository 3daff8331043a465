use crate::errors::GateError;
use crate::judge::policy::VerdictFormat;
use crate::judge::{JudgeGate, ParsedVerdict};
use crate::model::{CandidateOutput, GateResult, Task};
use crate::providers::llm::LlmRequest;

pub(crate) async fn validate_impl(
    gate: &JudgeGate,
    task: &Task,
    output: &CandidateOutput,
) -> GateResult {
    match judge_impl(gate, task, output).await {
        Ok(verdict) => GateResult::from_verdict(gate.name(), verdict.passed, verdict.reason),
        Err(e) => {
            // Reported at warn by the pipeline that aggregates results.
            tracing::debug!(
                gate = %gate.name(),
                task = task.id.as_deref().unwrap_or(task.title.as_str()),
                failure = e.kind().as_str(),
                attempts = e.attempts(),
                error = %e,
                "judge unavailable; failing open"
            );
            GateResult::unavailable(gate.name(), e.kind(), &e)
        }
    }
}

async fn judge_impl(
    gate: &JudgeGate,
    task: &Task,
    output: &CandidateOutput,
) -> Result<ParsedVerdict, GateError> {
    let cfg = &gate.config;
    let persona = gate
        .personas
        .load_persona(&cfg.persona)
        .await
        .map_err(|e| GateError::persona_load(&cfg.persona, e))?;

    let request = LlmRequest {
        model: cfg.model.clone(),
        system_instruction: persona,
        user_prompt: super::prompt::build_prompt_impl(task, output, cfg.verdict_format),
        temperature: cfg.temperature,
        max_tokens: cfg.max_tokens,
    };
    let resp = super::client::call_judge_impl(gate, &request).await?;

    let verdict = match cfg.verdict_format {
        VerdictFormat::Prefix => super::verdict::parse_prefix_impl(&resp.content, cfg.on_unparseable),
        VerdictFormat::Json => {
            super::verdict::parse_structured_impl(&resp.content, cfg.on_unparseable)
        }
    };
    tracing::debug!(
        gate = %cfg.gate_name,
        passed = verdict.passed,
        model = %resp.model,
        "judge verdict parsed"
    );
    Ok(verdict)
}
