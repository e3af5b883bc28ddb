//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the scoring
//! engine so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use scoring_core::{EngineError, ErrorSeverity, PlayerId, ScoringError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("scoring worker command channel closed")]
    CommandChannelClosed,

    #[error("scoring worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("scoring worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("player {0} is not loaded")]
    UnknownPlayer(PlayerId),

    #[error("player {0} is already loaded")]
    PlayerExists(PlayerId),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl RuntimeError {
    /// Severity of engine rejections; everything else is a host failure.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(error) => error.severity(),
            Self::UnknownPlayer(_) | Self::PlayerExists(_) => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }
}
