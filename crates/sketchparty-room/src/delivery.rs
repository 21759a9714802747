//! The outbound delivery contract.

use sketchparty_protocol::{PlayerName, RoomCode, ServerEvent};
use tokio::sync::mpsc;

/// Where outbound events go.
///
/// The transport collaborator implements this; the engine only decides
/// who should see what. Implementations must not block — they are
/// called from inside room tasks. A member or room the transport no
/// longer knows is silently dropped, like any disconnected client.
pub trait Delivery: Send + Sync + 'static {
    /// Delivers to a single member of `room`.
    fn send_to(&self, room: &RoomCode, member: &PlayerName, event: ServerEvent);

    /// Delivers to every current member of `room`.
    fn broadcast(&self, room: &RoomCode, event: ServerEvent);
}

/// One event captured by [`ChannelDelivery`].
#[derive(Debug, Clone)]
pub struct Delivered {
    pub room: RoomCode,
    /// `None` for room-wide broadcasts.
    pub to: Option<PlayerName>,
    pub event: ServerEvent,
}

/// Channel-backed loopback delivery for tests and demos.
///
/// Every outbound event lands on an unbounded channel in send order.
/// Once the receiver is dropped, events vanish silently — the same
/// shape as a transport whose clients all disconnected.
pub struct ChannelDelivery {
    tx: mpsc::UnboundedSender<Delivered>,
}

impl ChannelDelivery {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Delivered>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Delivery for ChannelDelivery {
    fn send_to(&self, room: &RoomCode, member: &PlayerName, event: ServerEvent) {
        let _ = self.tx.send(Delivered {
            room: room.clone(),
            to: Some(member.clone()),
            event,
        });
    }

    fn broadcast(&self, room: &RoomCode, event: ServerEvent) {
        let _ = self.tx.send(Delivered {
            room: room.clone(),
            to: None,
            event,
        });
    }
}
