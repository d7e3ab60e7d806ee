//! Automation failure classification.

use thiserror::Error;

use super::{PageError, SessionError};

/// How an automation failure is treated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Expected condition (missing control, dead-end redirect). Becomes a
    /// `not registered` outcome at the engine boundary.
    Recoverable,
    /// Infrastructure failure. Escapes the engine and is downgraded by the
    /// orchestrator.
    Fatal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Recoverable => "recoverable",
            FailureKind::Fatal => "fatal",
        }
    }
}

/// Failure raised while automating one registration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AutomationError {
    #[error("{0}")]
    Recoverable(String),

    #[error("{0}")]
    Fatal(String),
}

impl AutomationError {
    pub fn recoverable(message: impl Into<String>) -> Self {
        AutomationError::Recoverable(message.into())
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        AutomationError::Fatal(message.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AutomationError::Recoverable(_) => FailureKind::Recoverable,
            AutomationError::Fatal(_) => FailureKind::Fatal,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind() == FailureKind::Recoverable
    }

    pub fn message(&self) -> &str {
        match self {
            AutomationError::Recoverable(msg) | AutomationError::Fatal(msg) => msg,
        }
    }
}

impl From<PageError> for AutomationError {
    fn from(e: PageError) -> Self {
        AutomationError::Fatal(e.to_string())
    }
}

impl From<SessionError> for AutomationError {
    fn from(e: SessionError) -> Self {
        AutomationError::Fatal(e.to_string())
    }
}
