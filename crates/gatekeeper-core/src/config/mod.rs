use crate::errors::ConfigError;
use crate::judge::policy::{UnparseablePolicy, VerdictFormat};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_VERSION: u32 = 1;
pub const MAX_RETRIES_LIMIT: u32 = 5;

/// Runtime settings of one judge gate.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Identifier reported as `GateResult::gate_name`.
    pub gate_name: String,
    /// Persona that supplies the judge's system instruction.
    pub persona: String,
    /// Model serving as judge.
    pub model: String,
    /// Sampling temperature for the judge call. Keep low: verdicts should be reproducible.
    pub temperature: f32,
    pub max_tokens: u32,
    /// Upper bound for a single judge call.
    pub timeout_ms: u64,
    /// Extra attempts after the first failed or timed-out call.
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub on_unparseable: UnparseablePolicy,
    pub verdict_format: VerdictFormat,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            gate_name: "llm-judge".to_string(),
            persona: "validator".to_string(),
            model: "judge-default".to_string(),
            temperature: 0.1,
            max_tokens: 256,
            timeout_ms: 30_000,
            max_retries: 1,
            retry_backoff_ms: 250,
            on_unparseable: UnparseablePolicy::default(),
            verdict_format: VerdictFormat::default(),
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gate_name.trim().is_empty() {
            return Err(ConfigError::Invalid("gate.gate_name must not be empty".into()));
        }
        if self.persona.trim().is_empty() {
            return Err(ConfigError::Invalid("gate.persona must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("gate.model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "gate.temperature must be within [0.0, 2.0], got {}",
                self.temperature
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("gate.timeout_ms must be > 0".into()));
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "gate.max_retries must be <= {}, got {}",
                MAX_RETRIES_LIMIT, self.max_retries
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Scripted replies (tests, dev).
    #[default]
    Fake,
    /// Recorded judge replies from a JSONL file.
    Replay,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct JudgeProviderConfig {
    pub provider: ProviderKind,
    pub replay_file: Option<PathBuf>,
    pub fake_reply: Option<String>,
}

/// Top-level `gatekeeper.yaml`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GatekeeperConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub personas_dir: Option<PathBuf>,
    #[serde(default)]
    pub judge: JudgeProviderConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for GatekeeperConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            gate: GateConfig::default(),
            personas_dir: None,
            judge: JudgeProviderConfig::default(),
        }
    }
}

impl GatekeeperConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {} (expected {})",
                self.version, CONFIG_VERSION
            )));
        }
        self.gate.validate()?;
        if self.judge.provider == ProviderKind::Replay && self.judge.replay_file.is_none() {
            return Err(ConfigError::Invalid(
                "judge.replay_file is required when judge.provider is 'replay'".into(),
            ));
        }
        Ok(())
    }

    /// Resolve relative paths against the directory holding the config file.
    fn resolve_paths(&mut self, base: &Path) {
        if let Some(dir) = self.personas_dir.take() {
            self.personas_dir = Some(resolve(base, dir));
        }
        if let Some(file) = self.judge.replay_file.take() {
            self.judge.replay_file = Some(resolve(base, file));
        }
    }
}

fn resolve(base: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}

pub fn parse_config(raw: &str, origin: &str) -> Result<GatekeeperConfig, ConfigError> {
    let cfg: GatekeeperConfig = serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse {
        path: origin.to_string(),
        detail: e.to_string(),
    })?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config(path: &Path) -> anyhow::Result<GatekeeperConfig> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut cfg = parse_config(&raw, &path.display().to_string())?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    cfg.resolve_paths(base);
    tracing::debug!(
        config = %path.display(),
        persona = %cfg.gate.persona,
        model = %cfg.gate.model,
        "loaded gate config"
    );
    Ok(cfg)
}
