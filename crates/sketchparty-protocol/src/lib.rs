//! Event types for the sketchparty session engine.
//!
//! This crate defines the "language" spoken between the game core and
//! the delivery layer that carries events to connected clients:
//!
//! - **Identity** ([`RoomCode`], [`PlayerName`]) — who and where.
//! - **Inbound** ([`ClientEvent`]) — everything a client (via the
//!   transport collaborator) can ask the engine to do.
//! - **Outbound** ([`ServerEvent`], [`Recipient`]) — everything the
//!   engine tells clients, paired with who is allowed to see it.
//!
//! The engine never talks to sockets directly; it produces
//! `(Recipient, ServerEvent)` pairs and the embedding server decides
//! how to put them on the wire.

mod types;

pub use types::{ClientEvent, PlayerName, Recipient, RoomCode, ServerEvent};
