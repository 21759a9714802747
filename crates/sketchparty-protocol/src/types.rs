//! Identity newtypes and the tagged event enums.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A room identifier, uppercase-normalized at construction.
///
/// Every lookup in the engine goes through this type, so a client that
/// sends `"ab12"` and one that sends `"AB12"` address the same session.
/// Deserialization normalizes too — there is no way to smuggle a
/// lowercase code past the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Creates a room code, uppercasing the input.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// The normalized code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RoomCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

/// A participant's display name, unique within a room.
///
/// The room/user directory owns the uniqueness guarantee; the engine
/// treats the name as an opaque key into its score and rotation tables.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Recipient — who should receive an outbound event?
// ---------------------------------------------------------------------------

/// Specifies who should receive a [`ServerEvent`].
///
/// Game logic returns a list of `(Recipient, ServerEvent)` pairs; the
/// delivery layer fans them out. Partial-information rules (word
/// choices for the actor only, chat among solved guessers) are encoded
/// entirely through this type, never by filtering on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Every current member of the room.
    All,
    /// One specific member.
    Member(PlayerName),
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// Everything the outside world can ask the engine to do.
///
/// One variant per event kind; payloads are explicit, not duck-typed.
/// The transport collaborator deserializes whatever its wire format is
/// into these before handing them to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Start a game in `room` with its current member list.
    StartGame {
        room: RoomCode,
        members: Vec<PlayerName>,
    },

    /// A chat line — evaluated as a guess first, distributed second.
    SendMessage {
        room: RoomCode,
        sender: PlayerName,
        text: String,
    },

    /// The actor picks one of the offered candidate words.
    ChooseWord {
        room: RoomCode,
        sender: PlayerName,
        word: String,
    },

    /// A member entered the room mid-game.
    MemberJoined { room: RoomCode, member: PlayerName },

    /// A member left the room (or their connection dropped).
    MemberLeft { room: RoomCode, member: PlayerName },
}

impl ClientEvent {
    /// The room this event addresses.
    pub fn room(&self) -> &RoomCode {
        match self {
            Self::StartGame { room, .. }
            | Self::SendMessage { room, .. }
            | Self::ChooseWord { room, .. }
            | Self::MemberJoined { room, .. }
            | Self::MemberLeft { room, .. } => room,
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound events
// ---------------------------------------------------------------------------

/// Everything the engine tells clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// A new round began; `actor` now conveys the secret word.
    ActorAssigned { actor: PlayerName },

    /// Candidate words offered to the actor (sent to the actor only).
    WordChoices { choices: Vec<String> },

    /// The round's word was fixed, by explicit choice or timeout.
    WordRevealed { word: String },

    /// Countdown update, broadcast once per decrement.
    TimerUpdate { seconds: i32 },

    /// `guesser` identified the word.
    GuessCorrect { guesser: PlayerName },

    /// Full score snapshot after an award.
    PointsUpdate { points: BTreeMap<PlayerName, u32> },

    /// A chat line that survived guess interception and spoiler
    /// filtering.
    ChatMessage { sender: PlayerName, text: String },
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The delivery layer and client SDK parse these exact JSON shapes;
    //! these tests pin the serde attributes that produce them.

    use super::*;

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_room_code_normalizes_to_uppercase() {
        assert_eq!(RoomCode::new("ab12").as_str(), "AB12");
        assert_eq!(RoomCode::new("AB12"), RoomCode::new("ab12"));
    }

    #[test]
    fn test_room_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomCode::new("AB12")).unwrap();
        assert_eq!(json, "\"AB12\"");
    }

    #[test]
    fn test_room_code_deserialization_normalizes() {
        let code: RoomCode = serde_json::from_str("\"ab12\"").unwrap();
        assert_eq!(code.as_str(), "AB12");
    }

    #[test]
    fn test_player_name_serializes_as_plain_string() {
        let json = serde_json::to_string(&PlayerName::new("alice")).unwrap();
        assert_eq!(json, "\"alice\"");
    }

    #[test]
    fn test_player_name_round_trip() {
        let name: PlayerName = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(name, PlayerName::new("bob"));
    }

    // =====================================================================
    // ClientEvent — internally tagged JSON
    // =====================================================================

    #[test]
    fn test_start_game_json_format() {
        let event = ClientEvent::StartGame {
            room: RoomCode::new("AB12"),
            members: vec![PlayerName::new("alice"), PlayerName::new("bob")],
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "StartGame");
        assert_eq!(json["room"], "AB12");
        assert_eq!(json["members"], serde_json::json!(["alice", "bob"]));
    }

    #[test]
    fn test_send_message_round_trip() {
        let event = ClientEvent::SendMessage {
            room: RoomCode::new("AB12"),
            sender: PlayerName::new("bob"),
            text: "apple".into(),
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: ClientEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_choose_word_round_trip() {
        let event = ClientEvent::ChooseWord {
            room: RoomCode::new("AB12"),
            sender: PlayerName::new("alice"),
            word: "kettle".into(),
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: ClientEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_member_events_round_trip() {
        for event in [
            ClientEvent::MemberJoined {
                room: RoomCode::new("AB12"),
                member: PlayerName::new("dave"),
            },
            ClientEvent::MemberLeft {
                room: RoomCode::new("AB12"),
                member: PlayerName::new("dave"),
            },
        ] {
            let bytes = serde_json::to_vec(&event).unwrap();
            let decoded: ClientEvent = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(event, decoded);
        }
    }

    #[test]
    fn test_client_event_room_accessor_is_normalized() {
        // A lowercase code in the incoming JSON still routes correctly.
        let json = r#"{"type": "MemberLeft", "room": "ab12", "member": "bob"}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.room(), &RoomCode::new("AB12"));
    }

    #[test]
    fn test_decode_unknown_event_type_returns_error() {
        let unknown = r#"{"type": "TeleportHome", "room": "AB12"}"#;
        let result: Result<ClientEvent, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }

    // =====================================================================
    // ServerEvent
    // =====================================================================

    #[test]
    fn test_actor_assigned_json_format() {
        let event = ServerEvent::ActorAssigned {
            actor: PlayerName::new("carol"),
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "ActorAssigned");
        assert_eq!(json["actor"], "carol");
    }

    #[test]
    fn test_word_choices_json_format() {
        let event = ServerEvent::WordChoices {
            choices: vec!["anchor".into(), "kettle".into(), "violin".into()],
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "WordChoices");
        assert_eq!(
            json["choices"],
            serde_json::json!(["anchor", "kettle", "violin"])
        );
    }

    #[test]
    fn test_timer_update_json_format() {
        let event = ServerEvent::TimerUpdate { seconds: -1 };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "TimerUpdate");
        assert_eq!(json["seconds"], -1);
    }

    #[test]
    fn test_points_update_serializes_as_name_to_score_map() {
        let mut points = BTreeMap::new();
        points.insert(PlayerName::new("alice"), 100);
        points.insert(PlayerName::new("bob"), 400);
        let event = ServerEvent::PointsUpdate { points };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "PointsUpdate");
        assert_eq!(json["points"]["alice"], 100);
        assert_eq!(json["points"]["bob"], 400);
    }

    #[test]
    fn test_server_events_round_trip() {
        for event in [
            ServerEvent::WordRevealed { word: "apple".into() },
            ServerEvent::GuessCorrect {
                guesser: PlayerName::new("bob"),
            },
            ServerEvent::ChatMessage {
                sender: PlayerName::new("carol"),
                text: "is it an animal?".into(),
            },
        ] {
            let bytes = serde_json::to_vec(&event).unwrap();
            let decoded: ServerEvent = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(event, decoded);
        }
    }
}
