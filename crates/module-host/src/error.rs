//! # Host Errors
//!
//! Errors raised by a [`ModuleHost`](crate::ModuleHost) or its clients. Module-specific
//! rejections travel inside [`HostError::Reverted`] so a caller can still render the
//! module's own reason.

/// Errors that can occur while talking to a module host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Module host closed")]
    HostClosed,
    #[error("Module host dropped response channel")]
    HostDropped,
    #[error("No module deployed at {0}")]
    NotDeployed(String),
    #[error("Call reverted: {0}")]
    Reverted(Box<dyn std::error::Error + Send + Sync>),
}

impl HostError {
    /// The module's own rejection reason, or the host failure when the call never reached a module.
    pub fn reason(&self) -> String {
        match self {
            HostError::Reverted(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

impl HostError {
    /// Recovers the module's own error type from a revert. Anything else, including a revert
    /// of a different type, is handed to `fallback` as text.
    pub fn into_module_error<E>(self, fallback: impl FnOnce(String) -> E) -> E
    where
        E: std::error::Error + 'static,
    {
        match self {
            HostError::Reverted(inner) => match inner.downcast::<E>() {
                Ok(err) => *err,
                Err(other) => fallback(other.to_string()),
            },
            other => fallback(other.to_string()),
        }
    }
}
