//! Unified error types surfaced by the runtime API.
//!
//! Wraps dispatch and configuration failures together with misuse of the
//! dialog protocol so callers can bubble them up with consistent context.
use sim_core::{DispatchError, ErrorSeverity, SimError};
use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("dialog `{message_key}` has no button {button}")]
    UnknownDialog {
        message_key: &'static str,
        button: usize,
    },

    #[error("save completed with no level link waiting to retry")]
    NoPendingSave,
}

impl SimError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Dispatch(err) => err.severity(),
            Self::Config(err) => err.severity(),
            Self::UnknownDialog { .. } => ErrorSeverity::Validation,
            Self::NoPendingSave => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Dispatch(err) => err.error_code(),
            Self::Config(err) => err.error_code(),
            Self::UnknownDialog { .. } => "RUNTIME_UNKNOWN_DIALOG",
            Self::NoPendingSave => "RUNTIME_NO_PENDING_SAVE",
        }
    }
}
