//! Error classification shared by every crate in the workspace.
//!
//! Concrete errors (`DispatchError`, `VerbParseError`, ...) live next to the
//! code that raises them. Guard refusals such as an invulnerable target or a
//! second color change in one frame are not errors at all: they come back as
//! `VerbOutcome::refused()`. Malformed modifier chains trip a `debug_assert!`.

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same request can succeed later, e.g. a save reported while no
    /// level link is waiting.
    Recoverable,
    /// Bad input such as an unknown verb id or a malformed config file.
    Validation,
    /// The caller broke an engine invariant, e.g. dispatched for an actor
    /// that is not in the world.
    Internal,
    /// Simulation state can no longer be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Internal and fatal errors point at a bug rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Implemented by every error enum in the workspace.
pub trait SimError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs. Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
