//! Invocation error model.

use thiserror::Error;

/// Failure raised by a single subscriber invocation.
///
/// Keep this focused on per-invocation outcomes surfaced through dispatch
/// results. Executor lifecycle concerns (pool startup, shutdown) belong
/// elsewhere.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The handler itself failed.
    #[error("handler failed: {0}")]
    Handler(#[from] anyhow::Error),

    /// The pending outcome was abandoned before it resolved (worker died,
    /// pool shut down, or the invocation was canceled).
    #[error("invocation canceled before completion")]
    Canceled,
}

impl InvokeError {
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler(anyhow::anyhow!(msg.into()))
    }
}
