use crate::model::GateResult;
use crate::pipeline::{GateReport, Outcome};

fn tag(r: &GateResult) -> &'static str {
    if !r.passed {
        "[FAIL]"
    } else if r.is_degraded() {
        "[WARN]"
    } else {
        "[PASS]"
    }
}

/// One line per gate: tag, gate name, message. Deterministic, unit-testable.
#[must_use]
pub fn format_result(r: &GateResult) -> String {
    if r.message.is_empty() {
        format!("{} {}", tag(r), r.gate_name)
    } else {
        format!("{} {:<16} {}", tag(r), r.gate_name, r.message)
    }
}

#[must_use]
pub fn format_report(report: &GateReport) -> String {
    let mut out = String::new();
    for r in &report.results {
        out.push_str(&format_result(r));
        out.push('\n');
    }
    let failed = report.results.iter().filter(|r| !r.passed).count();
    let degraded = report.results.iter().filter(|r| r.is_degraded()).count();
    let footer = match report.outcome {
        Outcome::Pass => "Outcome: PASS",
        Outcome::Warn => "Outcome: WARN (validation degraded, not blocking)",
        Outcome::Block => "Outcome: BLOCK",
    };
    out.push_str(&format!(
        "\n{} ({} gates, {} failed, {} degraded)\n",
        footer,
        report.results.len(),
        failed,
        degraded
    ));
    out
}
