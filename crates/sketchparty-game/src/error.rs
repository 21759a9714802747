//! Error types for the game core.

/// Errors from the static vocabulary source.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// More distinct words were requested than the vocabulary holds.
    /// A misconfiguration — callers validate at startup, so this never
    /// surfaces mid-game.
    #[error("vocabulary holds {available} words, {requested} requested")]
    Insufficient { requested: usize, available: usize },
}
