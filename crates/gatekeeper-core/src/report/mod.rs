pub mod console;
pub mod json;

pub use crate::pipeline::{GateReport, Outcome};
