//! Unified error types surfaced by the session API.
//!
//! Wraps failures from worker coordination, repositories, and the engine so
//! clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use room_core::RoomId;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session requires a room configuration before starting")]
    MissingRoomConfig,

    #[error("session requires a player id before starting")]
    MissingPlayer,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Engine(#[from] room_core::ExecuteError),

    #[error(transparent)]
    Config(#[from] room_core::ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("snapshot targets room '{snapshot}' but this session plays '{session}'")]
    SnapshotMismatch { session: RoomId, snapshot: RoomId },
}
