use crate::model::FailureKind;

/// Infrastructure failure inside a gate.
///
/// Never escapes [`crate::JudgeGate::validate`]; it is folded into a degraded
/// [`crate::GateResult`] carrying [`GateError::kind`].
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("{source}")]
    PersonaLoad {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("{source}")]
    ModelInvocation {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
    #[error("model call timed out after {timeout_ms}ms")]
    Timeout { attempts: u32, timeout_ms: u64 },
}

impl GateError {
    pub fn persona_load(name: impl Into<String>, source: anyhow::Error) -> Self {
        Self::PersonaLoad {
            name: name.into(),
            source,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            GateError::PersonaLoad { .. } => FailureKind::PersonaLoad,
            GateError::ModelInvocation { .. } => FailureKind::ModelInvocation,
            GateError::Timeout { .. } => FailureKind::Timeout,
        }
    }

    /// Model attempts made before giving up; zero when the persona never loaded.
    pub fn attempts(&self) -> u32 {
        match self {
            GateError::PersonaLoad { .. } => 0,
            GateError::ModelInvocation { attempts, .. } | GateError::Timeout { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Persona lookup failure. Only `NotFound` lets a layered store fall through.
#[derive(Debug, thiserror::Error)]
pub enum PersonaError {
    #[error("persona not found: {name}")]
    NotFound { name: String },
    #[error("failed to read persona '{name}' at {path}: {cause}")]
    Read {
        name: String,
        path: String,
        cause: std::io::Error,
    },
}

impl PersonaError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// True when `err` is a [`PersonaError::NotFound`].
    pub fn is_not_found(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<PersonaError>(),
            Some(PersonaError::NotFound { .. })
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },
    #[error("failed to parse config {path}: {detail}")]
    Parse { path: String, detail: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}
