use super::super::args::{CheckArgs, OutputFormat};
use super::gate_builder::build_gate;
use crate::exit_codes::{CONFIG_ERROR, GATE_BLOCKED, OK};
use anyhow::Context;
use gatekeeper_core::config::load_config;
use gatekeeper_core::report::{console, json};
use gatekeeper_core::{CandidateOutput, GatePipeline, Task};
use std::path::Path;
use std::sync::Arc;

pub(crate) fn load_task(path: &Path) -> anyhow::Result<Task> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read task file {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let task: Task = if is_json {
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid task file {}", path.display()))?
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("invalid task file {}", path.display()))?
    };
    if task.title.trim().is_empty() {
        anyhow::bail!("task file {}: title must not be empty", path.display());
    }
    Ok(task)
}

fn prepare(args: &CheckArgs) -> anyhow::Result<(gatekeeper_core::JudgeGate, Task, CandidateOutput)> {
    let cfg = load_config(&args.config)?;
    let task = load_task(&args.task)?;
    let output = std::fs::read_to_string(&args.output)
        .with_context(|| format!("failed to read output file {}", args.output.display()))?;
    let gate = build_gate(&cfg)?;
    Ok((gate, task, CandidateOutput::new(output)))
}

pub(crate) async fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let (gate, task, output) = match prepare(&args) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("error: {e:#}");
            return Ok(CONFIG_ERROR);
        }
    };

    let report = GatePipeline::new()
        .with_gate(Arc::new(gate))
        .run(&task, &output)
        .await;

    match args.format {
        OutputFormat::Text => print!("{}", console::format_report(&report)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json::to_json(&report))?)
        }
    }
    if let Some(path) = &args.report {
        json::write_json(&report, path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    Ok(if report.is_blocked() { GATE_BLOCKED } else { OK })
}
