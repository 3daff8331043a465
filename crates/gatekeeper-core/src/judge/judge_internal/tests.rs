use crate::config::GateConfig;
use crate::judge::policy::{UnparseablePolicy, VerdictFormat, UNPARSEABLE_PASS_REASON};
use crate::judge::JudgeGate;
use crate::model::{CandidateOutput, FailureKind, Severity, Task};
use crate::persona::{PersonaStore, StaticPersonaStore};
use crate::providers::llm::fake::{FakeClient, FakeStep};
use crate::providers::llm::LlmClient;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

struct FailingPersonaStore {
    message: &'static str,
}

#[async_trait]
impl PersonaStore for FailingPersonaStore {
    async fn load_persona(&self, _name: &str) -> anyhow::Result<String> {
        anyhow::bail!("{}", self.message)
    }
}

fn config() -> GateConfig {
    GateConfig {
        model: "judge-mini".to_string(),
        timeout_ms: 200,
        retry_backoff_ms: 0,
        ..Default::default()
    }
}

fn task() -> Task {
    Task::new("Add pagination", "List endpoint must accept page and per_page.").with_id("t-1")
}

fn gate_with(config: GateConfig, client: Arc<FakeClient>) -> JudgeGate {
    JudgeGate::new(config, Arc::new(StaticPersonaStore::builtin()), client)
}

#[tokio::test]
async fn contract_pass_reply_is_info() {
    let client = Arc::new(FakeClient::replying("PASS: meets all requirements"));
    let gate = gate_with(config(), client);

    let r = gate.validate(&task(), &"impl".into()).await;
    assert_eq!(r.gate_name, "llm-judge");
    assert!(r.passed);
    assert_eq!(r.severity, Severity::Info);
    assert_eq!(r.message, "meets all requirements");
    assert_eq!(r.failure, None);
}

#[tokio::test]
async fn contract_fail_reply_is_critical() {
    let client = Arc::new(FakeClient::replying("FAIL: missing tests"));
    let gate = gate_with(config(), client);

    let r = gate.validate(&task(), &"impl".into()).await;
    assert!(!r.passed);
    assert_eq!(r.severity, Severity::Critical);
    assert_eq!(r.message, "missing tests");
}

#[tokio::test]
async fn contract_empty_reply_falls_back_to_pass() {
    let client = Arc::new(FakeClient::replying(""));
    let gate = gate_with(config(), client);

    let r = gate.validate(&task(), &CandidateOutput::default()).await;
    assert!(r.passed);
    assert_eq!(r.severity, Severity::Info);
    assert_eq!(r.message, UNPARSEABLE_PASS_REASON);
}

#[tokio::test]
async fn contract_persona_failure_fails_open() {
    let client = Arc::new(FakeClient::replying("FAIL: should never be asked"));
    let gate = JudgeGate::new(
        config(),
        Arc::new(FailingPersonaStore {
            message: "persona not found",
        }),
        client.clone(),
    );

    let r = gate.validate(&task(), &"impl".into()).await;
    assert!(r.passed);
    assert_eq!(r.severity, Severity::Warning);
    assert_eq!(r.message, "Validation unavailable: persona not found");
    assert_eq!(r.failure, Some(FailureKind::PersonaLoad));
    assert_eq!(client.calls(), 0, "persona errors must not reach the judge");
}

#[tokio::test]
async fn contract_lowercase_prefix_is_unparseable() {
    let client = Arc::new(FakeClient::replying("pass: ok"));
    let gate = gate_with(config(), client);

    let r = gate.validate(&task(), &"impl".into()).await;
    assert!(r.passed);
    assert_eq!(r.severity, Severity::Info);
    assert_eq!(r.message, UNPARSEABLE_PASS_REASON);
}

#[tokio::test]
async fn unknown_persona_in_builtin_store_fails_open() {
    let cfg = GateConfig {
        persona: "ghost".to_string(),
        ..config()
    };
    let gate = gate_with(cfg, Arc::new(FakeClient::replying("PASS: x")));

    let r = gate.validate(&task(), &"impl".into()).await;
    assert_eq!(r.severity, Severity::Warning);
    assert_eq!(r.message, "Validation unavailable: persona not found: ghost");
}

#[tokio::test]
async fn request_carries_persona_model_and_temperature() {
    let client = Arc::new(FakeClient::replying("PASS: ok"));
    let personas = StaticPersonaStore::new().with_persona("validator", "You are the judge.");
    let cfg = GateConfig {
        temperature: 0.05,
        max_tokens: 77,
        ..config()
    };
    let gate = JudgeGate::new(cfg, Arc::new(personas), client.clone());

    gate.validate(&task(), &"the output".into()).await;

    let reqs = client.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].system_instruction, "You are the judge.");
    assert_eq!(reqs[0].model, "judge-mini");
    assert_eq!(reqs[0].temperature, 0.05);
    assert_eq!(reqs[0].max_tokens, 77);
    assert!(reqs[0].user_prompt.contains("Add pagination"));
    assert!(reqs[0].user_prompt.contains("the output"));
    assert!(!reqs[0].user_prompt.contains("You are the judge."));
}

#[tokio::test]
async fn transient_failure_is_retried() {
    let client = Arc::new(FakeClient::scripted([
        FakeStep::Fail("connection reset by peer".into()),
        FakeStep::Reply("FAIL: wrong status code".into()),
    ]));
    let gate = gate_with(config(), client.clone());

    let r = gate.validate(&task(), &"impl".into()).await;
    assert!(!r.passed);
    assert_eq!(r.message, "wrong status code");
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn exhausted_retries_fail_open_with_last_error() {
    let client = Arc::new(FakeClient::scripted([
        FakeStep::Fail("first".into()),
        FakeStep::Fail("upstream 503".into()),
        FakeStep::Reply("FAIL: too late".into()),
    ]));
    let gate = gate_with(config(), client.clone());

    let r = gate.validate(&task(), &"impl".into()).await;
    assert!(r.passed);
    assert_eq!(r.severity, Severity::Warning);
    assert_eq!(r.message, "Validation unavailable: upstream 503");
    assert_eq!(r.failure, Some(FailureKind::ModelInvocation));
    assert_eq!(client.calls(), 2, "one retry by default");
}

#[tokio::test]
async fn hung_judge_times_out_and_fails_open() {
    let client = Arc::new(FakeClient::scripted([
        FakeStep::Delayed(Duration::from_secs(30), "PASS: late".into()),
        FakeStep::Delayed(Duration::from_secs(30), "PASS: late".into()),
    ]));
    let cfg = GateConfig {
        timeout_ms: 20,
        ..config()
    };
    let gate = gate_with(cfg, client.clone());

    let started = std::time::Instant::now();
    let r = gate.validate(&task(), &"impl".into()).await;
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(r.passed);
    assert_eq!(r.severity, Severity::Warning);
    assert_eq!(r.failure, Some(FailureKind::Timeout));
    assert_eq!(r.message, "Validation unavailable: model call timed out after 20ms");
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn timeout_then_success_within_budget() {
    let client = Arc::new(FakeClient::scripted([
        FakeStep::Delayed(Duration::from_secs(30), "PASS: late".into()),
        FakeStep::Reply("PASS: second try".into()),
    ]));
    let cfg = GateConfig {
        timeout_ms: 20,
        ..config()
    };
    let gate = gate_with(cfg, client);

    let r = gate.validate(&task(), &"impl".into()).await;
    assert_eq!(r.severity, Severity::Info);
    assert_eq!(r.message, "second try");
}

#[tokio::test]
async fn zero_retries_means_single_attempt() {
    let client =
        Arc::new(FakeClient::scripted([FakeStep::Fail("down".into())]).with_fallback("PASS: x"));
    let cfg = GateConfig {
        max_retries: 0,
        ..config()
    };
    let gate = gate_with(cfg, client.clone());

    let r = gate.validate(&task(), &"impl".into()).await;
    assert_eq!(r.failure, Some(FailureKind::ModelInvocation));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn assume_fail_policy_rejects_unparseable_reply() {
    let cfg = GateConfig {
        on_unparseable: UnparseablePolicy::AssumeFail,
        ..config()
    };
    let gate = gate_with(cfg, Arc::new(FakeClient::replying("I think it's fine")));

    let r = gate.validate(&task(), &"impl".into()).await;
    assert!(!r.passed);
    assert_eq!(r.severity, Severity::Critical);
    assert_eq!(
        r.message,
        "Could not parse validation response, assuming fail"
    );
}

#[tokio::test]
async fn json_format_parses_structured_reply() {
    let cfg = GateConfig {
        verdict_format: VerdictFormat::Json,
        ..config()
    };
    let client = Arc::new(FakeClient::replying(
        r#"{"verdict": "FAIL", "reason": "no pagination params"}"#,
    ));
    let gate = gate_with(cfg, client.clone());

    let r = gate.validate(&task(), &"impl".into()).await;
    assert!(!r.passed);
    assert_eq!(r.message, "no pagination params");
    assert!(client.requests()[0].user_prompt.contains("\"verdict\""));
}

#[tokio::test]
async fn concurrent_validations_are_independent() {
    let pass = gate_with(config(), Arc::new(FakeClient::replying("PASS: a")));
    let fail = gate_with(config(), Arc::new(FakeClient::replying("FAIL: b")));
    let t = task();
    let out: CandidateOutput = "impl".into();

    let (a, b, c) = tokio::join!(
        pass.validate(&t, &out),
        fail.validate(&t, &out),
        pass.validate(&t, &out)
    );
    assert!(a.passed && c.passed);
    assert!(!b.passed);
    assert_eq!(a, c);
}

#[tokio::test]
async fn gate_is_shareable_across_tasks() {
    let gate = Arc::new(gate_with(config(), Arc::new(FakeClient::replying("PASS: ok"))));
    let mut handles = Vec::new();
    for i in 0..4 {
        let gate = gate.clone();
        handles.push(tokio::spawn(async move {
            let t = Task::new(format!("task {i}"), "reqs");
            gate.validate(&t, &"out".into()).await
        }));
    }
    for h in handles {
        assert!(h.await.unwrap().passed);
    }
}

#[test]
fn judge_gate_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<JudgeGate>();
    fn assert_client<T: LlmClient>() {}
    assert_client::<FakeClient>();
}
