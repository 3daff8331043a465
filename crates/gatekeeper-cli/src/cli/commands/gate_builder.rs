use anyhow::Context;
use gatekeeper_core::config::{GatekeeperConfig, ProviderKind};
use gatekeeper_core::persona::{DirPersonaStore, LayeredPersonaStore, PersonaStore, StaticPersonaStore};
use gatekeeper_core::providers::llm::fake::FakeClient;
use gatekeeper_core::providers::llm::replay::ReplayClient;
use gatekeeper_core::providers::llm::tracing::TracingLlmClient;
use gatekeeper_core::providers::llm::LlmClient;
use gatekeeper_core::JudgeGate;
use std::sync::Arc;

/// `personas_dir` (if set) shadows the bundled personas.
pub(crate) fn build_personas(cfg: &GatekeeperConfig) -> Arc<dyn PersonaStore> {
    let mut layers: Vec<Box<dyn PersonaStore>> = Vec::new();
    if let Some(dir) = &cfg.personas_dir {
        layers.push(Box::new(DirPersonaStore::new(dir.clone())));
    }
    layers.push(Box::new(StaticPersonaStore::builtin()));
    Arc::new(LayeredPersonaStore::new(layers))
}

pub(crate) fn build_client(cfg: &GatekeeperConfig) -> anyhow::Result<Arc<dyn LlmClient>> {
    let client: Arc<dyn LlmClient> = match cfg.judge.provider {
        ProviderKind::Fake => match &cfg.judge.fake_reply {
            Some(reply) => Arc::new(FakeClient::replying(reply.clone())),
            None => Arc::new(FakeClient::new()),
        },
        ProviderKind::Replay => {
            let path = cfg
                .judge
                .replay_file
                .as_ref()
                .context("judge.replay_file is required for the replay provider")?;
            let replay = ReplayClient::from_path(path).context("failed to load judge replies")?;
            tracing::debug!(records = replay.len(), file = %path.display(), "loaded replay file");
            Arc::new(replay)
        }
    };
    Ok(Arc::new(TracingLlmClient::new(client)))
}

pub(crate) fn build_gate(cfg: &GatekeeperConfig) -> anyhow::Result<JudgeGate> {
    let client = build_client(cfg)?;
    Ok(JudgeGate::new(cfg.gate.clone(), build_personas(cfg), client))
}
