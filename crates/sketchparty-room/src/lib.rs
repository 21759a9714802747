//! Session lifecycle management for sketchparty.
//!
//! Each room's game runs as an isolated tokio task (actor model) that
//! owns its [`GameSession`](sketchparty_game::GameSession) exclusively.
//! External events reach it through an mpsc command channel; the
//! periodic tick is one more branch of the same `select!` loop, so
//! ticks and events serialize by construction and no lock ever guards
//! game state.
//!
//! # Key types
//!
//! - [`SessionRegistry`] — creates/destroys sessions, routes events
//! - [`SessionHandle`] — send commands to a running session task
//! - [`Delivery`] — the outbound contract the embedding server implements
//! - [`ChannelDelivery`] — loopback implementation for tests and demos

mod actor;
mod delivery;
mod error;
mod registry;

pub use actor::{SessionHandle, SessionInfo};
pub use delivery::{ChannelDelivery, Delivered, Delivery};
pub use error::RegistryError;
pub use registry::SessionRegistry;
