use super::{LlmClient, LlmRequest, LlmResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

/// Serves recorded judge replies from JSONL.
///
/// Each line is `{"prompt": "...", "response": "..."}`. A record without
/// `prompt` answers any prompt that has no exact match. Duplicate prompts keep
/// the first record.
#[derive(Debug, Clone, Default)]
pub struct ReplayClient {
    by_prompt: HashMap<String, String>,
    catch_all: Option<String>,
}

impl ReplayClient {
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("failed to load replay file {}: {}", path.display(), e)
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut client = Self::default();
        for (idx, line) in raw.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim_end_matches('\r').trim();
            if line.is_empty() {
                continue;
            }
            let v: serde_json::Value = serde_json::from_str(line).map_err(|e| {
                anyhow::anyhow!(
                    "line {}: invalid replay record, expected a JSON object.\n  Error: {}\n  Content: {}",
                    line_no,
                    e,
                    line.chars().take(50).collect::<String>()
                )
            })?;
            let response = v
                .get("response")
                .and_then(|r| r.as_str())
                .ok_or_else(|| anyhow::anyhow!("line {}: replay record missing 'response'", line_no))?
                .to_string();

            match v.get("prompt").and_then(|p| p.as_str()) {
                Some(prompt) => {
                    client
                        .by_prompt
                        .entry(prompt.to_string())
                        .or_insert(response);
                }
                None => {
                    if client.catch_all.is_none() {
                        client.catch_all = Some(response);
                    }
                }
            }
        }
        Ok(client)
    }

    pub fn len(&self) -> usize {
        self.by_prompt.len() + usize::from(self.catch_all.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LlmClient for ReplayClient {
    async fn invoke(&self, request: &LlmRequest) -> anyhow::Result<LlmResponse> {
        let content = self
            .by_prompt
            .get(&request.user_prompt)
            .or(self.catch_all.as_ref())
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no recorded judge reply for prompt ({} chars)",
                    request.user_prompt.len()
                )
            })?;

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            provider: "replay".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "replay"
    }
}
