use serde::{Deserialize, Serialize};

/// The unit of work whose output is being judged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// Free-text requirements. May be empty; passed to the judge verbatim.
    #[serde(default)]
    pub description: String,
}

impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Text produced by the primary model for a [`Task`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CandidateOutput(String);

impl CandidateOutput {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CandidateOutput {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CandidateOutput {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a gate degraded to its fail-open result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PersonaLoad,
    ModelInvocation,
    Timeout,
    /// The gate's own task panicked or was cancelled.
    GateTask,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::PersonaLoad => "persona_load",
            FailureKind::ModelInvocation => "model_invocation",
            FailureKind::Timeout => "timeout",
            FailureKind::GateTask => "gate_task",
        }
    }
}

/// Output contract of every gate.
///
/// Build through [`GateResult::from_verdict`] or [`GateResult::unavailable`];
/// both keep `passed == false` tied to `Severity::Critical`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GateResult {
    pub gate_name: String,
    pub passed: bool,
    pub message: String,
    pub severity: Severity,
    /// Set only on the degraded path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl GateResult {
    pub fn from_verdict(
        gate_name: impl Into<String>,
        passed: bool,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            gate_name: gate_name.into(),
            passed,
            message: reason.into(),
            severity: if passed {
                Severity::Info
            } else {
                Severity::Critical
            },
            failure: None,
        }
    }

    pub fn unavailable(
        gate_name: impl Into<String>,
        kind: FailureKind,
        cause: impl std::fmt::Display,
    ) -> Self {
        Self {
            gate_name: gate_name.into(),
            passed: true,
            message: format!("Validation unavailable: {}", cause),
            severity: Severity::Warning,
            failure: Some(kind),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }
}
