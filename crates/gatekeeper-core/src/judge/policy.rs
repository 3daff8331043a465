use serde::{Deserialize, Serialize};

pub const UNPARSEABLE_PASS_REASON: &str = "Could not parse validation response, assuming pass";
pub const UNPARSEABLE_FAIL_REASON: &str = "Could not parse validation response, assuming fail";

/// What a judge reply that matches neither `PASS:` nor `FAIL:` means.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnparseablePolicy {
    /// Ambiguous output is accepted, matching the gate's fail-open stance.
    #[default]
    AssumePass,
    AssumeFail,
}

impl UnparseablePolicy {
    pub fn fallback(&self) -> (bool, &'static str) {
        match self {
            UnparseablePolicy::AssumePass => (true, UNPARSEABLE_PASS_REASON),
            UnparseablePolicy::AssumeFail => (false, UNPARSEABLE_FAIL_REASON),
        }
    }
}

/// Reply shape requested from the judge.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerdictFormat {
    /// One line: `PASS: <reason>` or `FAIL: <reason>`.
    #[default]
    Prefix,
    /// One JSON object `{"verdict": "PASS"|"FAIL", "reason": "..."}`; parsing
    /// falls back to the prefix heuristic.
    Json,
}
