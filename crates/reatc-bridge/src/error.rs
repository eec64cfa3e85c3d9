use crate::host::{CallbackKind, Capability};
use crate::types::{ActionKind, ScriptSlot};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("host API version mismatch: expected {expected:#x}, got {got:#x}")]
    HostIncompatible { expected: u32, got: u32 },

    #[error("required host capability missing: {0}")]
    CapabilityMissing(Capability),

    #[error("host rejected action registration: {0}")]
    ActionRegistrationFailed(ActionKind),

    #[error("host rejected callback installation: {0}")]
    CallbackRejected(CallbackKind),

    #[error("script could not be resolved: {0}")]
    ScriptUnresolved(ScriptSlot),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
