use crate::pipeline::GateReport;
use std::path::Path;

pub fn to_json(report: &GateReport) -> serde_json::Value {
    serde_json::json!({
        "outcome": report.outcome,
        "results": report.results,
    })
}

pub fn write_json(report: &GateReport, out: &Path) -> anyhow::Result<()> {
    let v = to_json(report);
    std::fs::write(out, serde_json::to_string_pretty(&v)?)?;
    Ok(())
}
