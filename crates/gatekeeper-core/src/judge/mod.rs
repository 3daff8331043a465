mod judge_internal;
pub mod policy;

use crate::config::GateConfig;
use crate::model::{CandidateOutput, GateResult, Task};
use crate::persona::PersonaStore;
use crate::providers::llm::LlmClient;
use policy::{UnparseablePolicy, VerdictFormat};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Structured form of a judge reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedVerdict {
    pub passed: bool,
    pub reason: String,
}

/// LLM-as-judge gate.
///
/// Stateless apart from its configuration and injected collaborators, so one
/// instance can serve any number of concurrent `validate` calls.
#[derive(Clone)]
pub struct JudgeGate {
    config: GateConfig,
    personas: Arc<dyn PersonaStore>,
    client: Arc<dyn LlmClient>,
}

impl JudgeGate {
    pub fn new(
        config: GateConfig,
        personas: Arc<dyn PersonaStore>,
        client: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            config,
            personas,
            client,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.gate_name
    }

    /// Judge `output` against `task`.
    ///
    /// Always returns a result. Persona or model failures (including timeouts
    /// after the retry budget) yield `passed = true` with `warning` severity.
    pub async fn validate(&self, task: &Task, output: &CandidateOutput) -> GateResult {
        judge_internal::run::validate_impl(self, task, output).await
    }
}

/// Judge input for `task` and `output` using the `PASS:`/`FAIL:` reply contract.
pub fn build_prompt(task: &Task, output: &CandidateOutput) -> String {
    judge_internal::prompt::build_prompt_impl(task, output, VerdictFormat::Prefix)
}

pub fn build_prompt_with_format(
    task: &Task,
    output: &CandidateOutput,
    format: VerdictFormat,
) -> String {
    judge_internal::prompt::build_prompt_impl(task, output, format)
}

/// Parse a judge reply; unparseable replies are accepted.
pub fn parse_verdict(raw: &str) -> ParsedVerdict {
    judge_internal::verdict::parse_prefix_impl(raw, UnparseablePolicy::default())
}

pub fn parse_verdict_with(raw: &str, policy: UnparseablePolicy) -> ParsedVerdict {
    judge_internal::verdict::parse_prefix_impl(raw, policy)
}

/// Parse a JSON verdict object, falling back to the prefix heuristic.
pub fn parse_verdict_structured(raw: &str, policy: UnparseablePolicy) -> ParsedVerdict {
    judge_internal::verdict::parse_structured_impl(raw, policy)
}
