//! Session registry: creates, routes to, and tears down room sessions.

use std::collections::HashMap;
use std::sync::Arc;

use sketchparty_game::{GameConfig, GameSession, VocabularyError, WordBank};
use sketchparty_protocol::{ClientEvent, PlayerName, RoomCode};
use tokio::time::Instant;

use crate::actor::spawn_session;
use crate::{Delivery, RegistryError, SessionHandle};

/// Default command channel size for session actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Process-wide table of active sessions, keyed by room code.
///
/// Owns session lifecycle: `create_session` spawns the room task along
/// with its tick loop, and `end_session` stops both atomically — once
/// it returns no further tick can fire for that room. Operations
/// addressing a room without a session are quiet no-ops, because
/// events legitimately race with teardown.
pub struct SessionRegistry<D: Delivery> {
    sessions: HashMap<RoomCode, SessionHandle>,
    delivery: Arc<D>,
    bank: Arc<WordBank>,
    config: GameConfig,
}

impl<D: Delivery> SessionRegistry<D> {
    /// Creates a registry over a delivery layer and vocabulary.
    ///
    /// Fails if the vocabulary cannot cover one round of word choices —
    /// the only fatal misconfiguration in the engine; nothing mid-game
    /// errors out.
    pub fn new(
        delivery: D,
        bank: WordBank,
        config: GameConfig,
    ) -> Result<Self, RegistryError> {
        let config = config.validated();
        if bank.len() < config.word_choices {
            return Err(VocabularyError::Insufficient {
                requested: config.word_choices,
                available: bank.len(),
            }
            .into());
        }
        Ok(Self {
            sessions: HashMap::new(),
            delivery: Arc::new(delivery),
            bank: Arc::new(bank),
            config,
        })
    }

    /// Starts a game in `room` with its current member list.
    pub fn create_session(
        &mut self,
        room: RoomCode,
        members: &[PlayerName],
    ) -> Result<(), RegistryError> {
        if self.sessions.contains_key(&room) {
            return Err(RegistryError::AlreadyActive(room));
        }

        let session = GameSession::new(
            room.clone(),
            members,
            self.config.clone(),
            Arc::clone(&self.bank),
            Instant::now(),
        );
        let handle = spawn_session(
            session,
            Arc::clone(&self.delivery),
            DEFAULT_CHANNEL_SIZE,
        );
        tracing::info!(
            room = %room,
            members = members.len(),
            "session created"
        );
        self.sessions.insert(room, handle);
        Ok(())
    }

    /// Whether `room` currently has an active session.
    pub fn contains(&self, room: &RoomCode) -> bool {
        self.sessions.contains_key(room)
    }

    /// Handle for `room`'s session, or `NotFound`.
    pub fn get(&self, room: &RoomCode) -> Result<&SessionHandle, RegistryError> {
        self.sessions
            .get(room)
            .ok_or_else(|| RegistryError::NotFound(room.clone()))
    }

    /// Number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Stops `room`'s task and removes it. Idempotent — ending an
    /// absent session does nothing.
    pub async fn end_session(&mut self, room: &RoomCode) {
        if let Some(handle) = self.sessions.remove(room) {
            let _ = handle.shutdown().await;
            tracing::info!(room = %room, "session ended");
        }
    }

    /// Adds `member` to `room`'s game.
    pub async fn join(&mut self, room: &RoomCode, member: PlayerName) {
        match self.sessions.get(room) {
            Some(handle) => {
                let _ = handle.join(member).await;
            }
            None => {
                tracing::debug!(room = %room, "join for inactive room ignored");
            }
        }
    }

    /// Removes `member` from `room`'s game, tearing the session down
    /// when the room empties.
    pub async fn leave(&mut self, room: &RoomCode, member: &PlayerName) {
        let remaining = match self.sessions.get(room) {
            Some(handle) => handle.leave(member.clone()).await.ok(),
            None => {
                tracing::debug!(room = %room, "leave for inactive room ignored");
                return;
            }
        };
        if remaining == Some(0) {
            self.end_session(room).await;
        }
    }

    /// Routes a chat line into `room`'s session.
    pub async fn chat(&self, room: &RoomCode, sender: PlayerName, text: String) {
        match self.sessions.get(room) {
            Some(handle) => {
                let _ = handle.chat(sender, text).await;
            }
            None => {
                tracing::debug!(room = %room, "chat for inactive room ignored");
            }
        }
    }

    /// Forwards a word pick to `room`'s session.
    pub async fn choose_word(
        &self,
        room: &RoomCode,
        sender: PlayerName,
        word: String,
    ) {
        match self.sessions.get(room) {
            Some(handle) => {
                let _ = handle.choose_word(sender, word).await;
            }
            None => {
                tracing::debug!(
                    room = %room,
                    "word pick for inactive room ignored"
                );
            }
        }
    }

    /// Routes one tagged client event to the session it addresses.
    pub async fn dispatch(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::StartGame { room, members } => {
                if let Err(e) = self.create_session(room, &members) {
                    tracing::debug!(error = %e, "start-game ignored");
                }
            }
            ClientEvent::SendMessage { room, sender, text } => {
                self.chat(&room, sender, text).await;
            }
            ClientEvent::ChooseWord { room, sender, word } => {
                self.choose_word(&room, sender, word).await;
            }
            ClientEvent::MemberJoined { room, member } => {
                self.join(&room, member).await;
            }
            ClientEvent::MemberLeft { room, member } => {
                self.leave(&room, &member).await;
            }
        }
    }
}
