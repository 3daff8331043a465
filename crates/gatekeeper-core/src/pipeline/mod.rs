use crate::judge::JudgeGate;
use crate::model::{CandidateOutput, FailureKind, GateResult, Severity, Task};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinSet;

/// A pluggable check over one task/output pair. Must not fail: degraded
/// checks report through [`GateResult`] instead.
#[async_trait]
pub trait Gate: Send + Sync {
    fn name(&self) -> &str;
    async fn check(&self, task: &Task, output: &CandidateOutput) -> GateResult;
}

#[async_trait]
impl Gate for JudgeGate {
    fn name(&self) -> &str {
        JudgeGate::name(self)
    }

    async fn check(&self, task: &Task, output: &CandidateOutput) -> GateResult {
        self.validate(task, output).await
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Warn,
    Block,
}

impl Outcome {
    /// `block` on any rejection, else `warn` on any warning, else `pass`.
    pub fn from_results(results: &[GateResult]) -> Self {
        if results.iter().any(|r| !r.passed) {
            Outcome::Block
        } else if results.iter().any(|r| r.severity == Severity::Warning) {
            Outcome::Warn
        } else {
            Outcome::Pass
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Warn => "warn",
            Outcome::Block => "block",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GateReport {
    pub outcome: Outcome,
    /// In gate registration order.
    pub results: Vec<GateResult>,
}

impl GateReport {
    pub fn new(results: Vec<GateResult>) -> Self {
        Self {
            outcome: Outcome::from_results(&results),
            results,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.outcome == Outcome::Block
    }
}

#[derive(Default, Clone)]
pub struct GatePipeline {
    gates: Vec<Arc<dyn Gate>>,
}

impl GatePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gate(mut self, gate: Arc<dyn Gate>) -> Self {
        self.gates.push(gate);
        self
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Run every gate concurrently and fold the results into a report.
    pub async fn run(&self, task: &Task, output: &CandidateOutput) -> GateReport {
        let task = Arc::new(task.clone());
        let output = Arc::new(output.clone());
        let mut join_set = JoinSet::new();

        for (idx, gate) in self.gates.iter().enumerate() {
            let gate = gate.clone();
            let task = task.clone();
            let output = output.clone();
            // Inner task isolates a panicking gate so its slot is still known.
            join_set.spawn(async move {
                let checked = tokio::spawn(async move { gate.check(&task, &output).await });
                (idx, checked.await)
            });
        }

        let mut slots: Vec<Option<GateResult>> = vec![None; self.gates.len()];
        while let Some(res) = join_set.join_next().await {
            match res {
                Ok((idx, Ok(result))) => slots[idx] = Some(result),
                Ok((idx, Err(e))) => {
                    let cause = if e.is_panic() {
                        "gate task panicked"
                    } else {
                        "gate task was cancelled"
                    };
                    slots[idx] = Some(GateResult::unavailable(
                        self.gates[idx].name(),
                        FailureKind::GateTask,
                        cause,
                    ));
                }
                Err(e) => tracing::error!(error = %e, "gate task aborted"),
            }
        }

        let results: Vec<GateResult> = slots
            .into_iter()
            .zip(&self.gates)
            .map(|(slot, gate)| {
                slot.unwrap_or_else(|| {
                    GateResult::unavailable(
                        gate.name(),
                        FailureKind::GateTask,
                        "gate task did not complete",
                    )
                })
            })
            .collect();

        for r in results.iter().filter(|r| r.is_degraded()) {
            tracing::warn!(
                gate = %r.gate_name,
                failure = r.failure.map(|f| f.as_str()).unwrap_or("unknown"),
                message = %r.message,
                "gate degraded"
            );
        }

        let report = GateReport::new(results);
        tracing::info!(
            outcome = report.outcome.as_str(),
            gates = report.results.len(),
            "gate pipeline finished"
        );
        report
    }
}
