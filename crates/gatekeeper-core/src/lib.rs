//! Gatekeeper core: LLM-as-judge validation gates.
//!
//! A gate asks a secondary "judge" model whether a primary model's output
//! satisfies a task's requirements and folds the reply into a [`GateResult`].
//! Judge unavailability never fails the caller: infrastructure errors degrade
//! to a passing result with `warning` severity.

pub mod config;
pub mod errors;
pub mod judge;
pub mod model;
pub mod persona;
pub mod pipeline;
pub mod providers;
pub mod report;

pub use judge::JudgeGate;
pub use model::{CandidateOutput, FailureKind, GateResult, Severity, Task};
pub use pipeline::{Gate, GatePipeline, GateReport, Outcome};
