//! Session actor: an isolated tokio task that owns one game session.
//!
//! Each room runs in its own task, reached only through an mpsc
//! channel. The periodic tick is a second branch of the same
//! `select!` loop, so ticks and external events interleave only at
//! whole-command boundaries — the single-writer discipline the game
//! state relies on.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use sketchparty_game::GameSession;
use sketchparty_protocol::{PlayerName, Recipient, RoomCode, ServerEvent};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::{Delivery, RegistryError};

/// Commands sent to a session actor through its channel.
///
/// Variants with a `oneshot::Sender` are request/response: the caller
/// awaits the reply, which doubles as "the command has been applied".
pub(crate) enum SessionCommand {
    /// A chat line — guess evaluation first, distribution second.
    Chat { sender: PlayerName, text: String },

    /// The actor picks one of the offered words.
    ChooseWord { sender: PlayerName, word: String },

    /// Add a member to the game.
    Join {
        member: PlayerName,
        reply: oneshot::Sender<()>,
    },

    /// Remove a member; replies with the remaining member count.
    Leave {
        member: PlayerName,
        reply: oneshot::Sender<usize>,
    },

    /// Request a state snapshot.
    GetInfo { reply: oneshot::Sender<SessionInfo> },

    /// Stop the task. Commands queued ahead of this still apply.
    Shutdown,
}

/// A point-in-time snapshot of one session's observable state.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub room: RoomCode,
    pub member_count: usize,
    pub actor: Option<PlayerName>,
    pub current_word: Option<String>,
    pub timer_seconds: i32,
    pub round_running: bool,
    pub points: BTreeMap<PlayerName, u32>,
    pub correct_guessers: BTreeSet<PlayerName>,
}

/// Handle to a running session task. Cheap to clone — an mpsc sender
/// plus the room code.
#[derive(Clone)]
pub struct SessionHandle {
    room: RoomCode,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub fn room(&self) -> &RoomCode {
        &self.room
    }

    /// Routes a chat line into the session (fire-and-forget).
    pub async fn chat(
        &self,
        sender: PlayerName,
        text: String,
    ) -> Result<(), RegistryError> {
        self.sender
            .send(SessionCommand::Chat { sender, text })
            .await
            .map_err(|_| RegistryError::Unavailable(self.room.clone()))
    }

    /// Forwards the actor's word pick (fire-and-forget).
    pub async fn choose_word(
        &self,
        sender: PlayerName,
        word: String,
    ) -> Result<(), RegistryError> {
        self.sender
            .send(SessionCommand::ChooseWord { sender, word })
            .await
            .map_err(|_| RegistryError::Unavailable(self.room.clone()))
    }

    /// Adds a member; resolves once the join has been applied.
    pub async fn join(&self, member: PlayerName) -> Result<(), RegistryError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Join {
                member,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RegistryError::Unavailable(self.room.clone()))?;
        reply_rx
            .await
            .map_err(|_| RegistryError::Unavailable(self.room.clone()))
    }

    /// Removes a member and returns how many remain.
    pub async fn leave(
        &self,
        member: PlayerName,
    ) -> Result<usize, RegistryError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Leave {
                member,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RegistryError::Unavailable(self.room.clone()))?;
        reply_rx
            .await
            .map_err(|_| RegistryError::Unavailable(self.room.clone()))
    }

    /// Requests a state snapshot.
    pub async fn info(&self) -> Result<SessionInfo, RegistryError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| RegistryError::Unavailable(self.room.clone()))?;
        reply_rx
            .await
            .map_err(|_| RegistryError::Unavailable(self.room.clone()))
    }

    /// Tells the session task to stop.
    pub async fn shutdown(&self) -> Result<(), RegistryError> {
        self.sender
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_| RegistryError::Unavailable(self.room.clone()))
    }
}

/// The task-internal state. Owns the game session exclusively.
struct SessionActor<D: Delivery> {
    session: GameSession,
    delivery: Arc<D>,
    receiver: mpsc::Receiver<SessionCommand>,
}

impl<D: Delivery> SessionActor<D> {
    /// Runs the actor loop until shutdown or until every handle drops.
    async fn run(mut self) {
        let room = self.session.room().clone();
        tracing::info!(room = %room, "session task started");

        let mut ticker = time::interval(self.session.config().tick_interval);
        // A stalled task resumes with one catch-up tick; the session's
        // wall-clock gates absorb the lost interval.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => match cmd {
                    Some(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    None => break,
                },
                _ = ticker.tick() => {
                    let events = self.session.tick(Instant::now());
                    self.dispatch(events);
                }
            }
        }

        tracing::info!(room = %room, "session task stopped");
    }

    /// Applies one command. Returns `false` when the task should stop.
    fn handle_command(&mut self, cmd: SessionCommand) -> bool {
        match cmd {
            SessionCommand::Chat { sender, text } => {
                let events = self.session.handle_chat(&sender, &text);
                self.dispatch(events);
            }
            SessionCommand::ChooseWord { sender, word } => {
                let events = self.session.choose_word(&sender, &word);
                self.dispatch(events);
            }
            SessionCommand::Join { member, reply } => {
                self.session.add_member(member, Instant::now());
                let _ = reply.send(());
            }
            SessionCommand::Leave { member, reply } => {
                self.session.remove_member(&member);
                let _ = reply.send(self.session.member_count());
            }
            SessionCommand::GetInfo { reply } => {
                let _ = reply.send(self.info());
            }
            SessionCommand::Shutdown => return false,
        }
        true
    }

    /// Fans outbound events to the delivery layer.
    fn dispatch(&self, events: Vec<(Recipient, ServerEvent)>) {
        let room = self.session.room();
        for (recipient, event) in events {
            match recipient {
                Recipient::All => self.delivery.broadcast(room, event),
                Recipient::Member(member) => {
                    self.delivery.send_to(room, &member, event);
                }
            }
        }
    }

    fn info(&self) -> SessionInfo {
        SessionInfo {
            room: self.session.room().clone(),
            member_count: self.session.member_count(),
            actor: self.session.actor().cloned(),
            current_word: self.session.current_word().map(str::to_string),
            timer_seconds: self.session.timer_seconds(),
            round_running: self.session.round_running(),
            points: self.session.points().clone(),
            correct_guessers: self.session.correct_guessers().clone(),
        }
    }
}

/// Spawns a session actor task and returns a handle to it.
///
/// `channel_size` bounds the command queue — senders wait when a room
/// falls behind instead of growing memory.
pub(crate) fn spawn_session<D: Delivery>(
    session: GameSession,
    delivery: Arc<D>,
    channel_size: usize,
) -> SessionHandle {
    let (tx, rx) = mpsc::channel(channel_size);
    let room = session.room().clone();

    let actor = SessionActor {
        session,
        delivery,
        receiver: rx,
    };
    tokio::spawn(actor.run());

    SessionHandle { room, sender: tx }
}
