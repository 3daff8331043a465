use crate::judge::policy::UnparseablePolicy;
use crate::judge::ParsedVerdict;

const PASS_PREFIX: &str = "PASS:";
const FAIL_PREFIX: &str = "FAIL:";

fn fallback(policy: UnparseablePolicy) -> ParsedVerdict {
    let (passed, reason) = policy.fallback();
    ParsedVerdict {
        passed,
        reason: reason.to_string(),
    }
}

/// Only the first non-blank line counts; prefixes are case-sensitive.
pub(crate) fn parse_prefix_impl(raw: &str, policy: UnparseablePolicy) -> ParsedVerdict {
    let Some(line) = raw.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return fallback(policy);
    };

    if let Some(rest) = line.strip_prefix(PASS_PREFIX) {
        ParsedVerdict {
            passed: true,
            reason: rest.trim().to_string(),
        }
    } else if let Some(rest) = line.strip_prefix(FAIL_PREFIX) {
        ParsedVerdict {
            passed: false,
            reason: rest.trim().to_string(),
        }
    } else {
        fallback(policy)
    }
}

/// First JSON object in the reply that carries a `verdict` field. Prose before
/// it may contain braces of its own.
fn parse_json_verdict(raw: &str) -> Option<ParsedVerdict> {
    raw.match_indices('{')
        .filter_map(|(i, _)| {
            serde_json::Deserializer::from_str(&raw[i..])
                .into_iter::<serde_json::Value>()
                .next()?
                .ok()
        })
        .find(|v| v.get("verdict").is_some())
        .and_then(|v| verdict_from_value(&v))
}

fn verdict_from_value(val: &serde_json::Value) -> Option<ParsedVerdict> {
    let passed = match val.get("verdict").and_then(|v| v.as_str())? {
        "PASS" => true,
        "FAIL" => false,
        _ => return None,
    };
    let reason = val
        .get("reason")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string();
    Some(ParsedVerdict { passed, reason })
}

pub(crate) fn parse_structured_impl(raw: &str, policy: UnparseablePolicy) -> ParsedVerdict {
    match parse_json_verdict(raw) {
        Some(v) => v,
        None => {
            tracing::debug!("judge reply is not a JSON verdict; using prefix parser");
            parse_prefix_impl(raw, policy)
        }
    }
}
