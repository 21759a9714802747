//! Error types for the registry layer.

use sketchparty_game::VocabularyError;
use sketchparty_protocol::RoomCode;

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A game is already running in this room.
    #[error("room {0} already has an active session")]
    AlreadyActive(RoomCode),

    /// No active session for this room.
    #[error("no active session for room {0}")]
    NotFound(RoomCode),

    /// The session task is gone or its command channel is closed.
    #[error("session for room {0} is unavailable")]
    Unavailable(RoomCode),

    /// The configured vocabulary cannot cover one round of choices.
    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}
