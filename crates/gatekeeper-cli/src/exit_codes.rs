//! Exit codes of the `gatekeeper` binary. Part of the CLI contract.

pub const OK: i32 = 0; // Pass, or degraded validation (warn)
pub const GATE_BLOCKED: i32 = 1; // Judge rejected the output
pub const CONFIG_ERROR: i32 = 2; // Bad config, task or output file
