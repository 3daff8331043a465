use super::gate_builder::build_personas;
use crate::exit_codes::{CONFIG_ERROR, OK};
use gatekeeper_core::config::load_config;
use std::path::Path;

pub(crate) async fn show(config: &Path, name: Option<&str>) -> anyhow::Result<i32> {
    let cfg = match load_config(config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e:#}");
            return Ok(CONFIG_ERROR);
        }
    };
    let name = name.unwrap_or(&cfg.gate.persona);
    match build_personas(&cfg).load_persona(name).await {
        Ok(text) => {
            println!("{}", text.trim_end());
            Ok(OK)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            Ok(CONFIG_ERROR)
        }
    }
}
