use hearth_core::protocol::Rejection;

/// Failures of the session plumbing itself, as opposed to [`Rejection`],
/// which is a validated gameplay outcome.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The worker task has shut down and no longer accepts commands.
    #[error("session worker is gone")]
    WorkerGone,
    /// The worker dropped a reply channel without answering.
    #[error("session worker dropped the reply")]
    ReplyDropped(#[from] tokio::sync::oneshot::error::RecvError),
    /// The request reached the world and was rejected there.
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

pub type Result<T> = std::result::Result<T, SessionError>;
