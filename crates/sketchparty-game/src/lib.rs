//! Per-room game session core for sketchparty.
//!
//! One [`GameSession`] holds everything a round needs: the turn
//! rotation, the score table, the secret word lifecycle, and the
//! countdown. The session is deliberately synchronous — every entry
//! point takes the caller's clock reading and returns the
//! `(Recipient, ServerEvent)` pairs to deliver — so the owning room
//! task serializes ticks and external events by construction.
//!
//! # Key types
//!
//! - [`GameSession`] — the state machine
//! - [`WordBank`] — static vocabulary, random unique samples
//! - [`GameConfig`] — timing knobs (round length, gaps, grace delays)
//! - [`scoring`] — pure award arithmetic

mod chat;
mod config;
mod error;
mod guess;
mod session;
mod words;

pub mod scoring;

pub use config::GameConfig;
pub use error::VocabularyError;
pub use session::{GameSession, Outbound, PendingChoices};
pub use words::WordBank;
