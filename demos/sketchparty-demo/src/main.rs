//! Scripted three-player game against an in-process delivery layer.
//!
//! No transport, no UI: the "clients" are a loop that watches outbound
//! events and parrots the revealed word back as a guess. Run with
//! `RUST_LOG=debug` to see the engine's own logging alongside.

use std::time::Duration;

use sketchparty_game::{GameConfig, WordBank};
use sketchparty_protocol::{ClientEvent, PlayerName, RoomCode, ServerEvent};
use sketchparty_room::{ChannelDelivery, SessionRegistry};

/// Party pacing is too slow for a demo; shrink every gate.
fn demo_config() -> GameConfig {
    GameConfig {
        round_seconds: 15,
        round_gap: Duration::from_millis(1_000),
        word_timeout: Duration::from_millis(3_000),
        join_grace: Duration::from_millis(500),
        ..GameConfig::default()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let members: Vec<PlayerName> = ["alice", "bob", "carol"]
        .iter()
        .map(|n| PlayerName::new(*n))
        .collect();
    let room = RoomCode::new("AB12");

    let (delivery, mut outbound) = ChannelDelivery::new();
    let mut registry =
        SessionRegistry::new(delivery, WordBank::default(), demo_config())?;
    registry
        .dispatch(ClientEvent::StartGame {
            room: room.clone(),
            members: members.clone(),
        })
        .await;

    // Nobody picks a word, so each round falls back after the timeout;
    // every guesser then answers instantly and the round resolves.
    let mut actor: Option<PlayerName> = None;
    let mut rounds = 0u32;
    while rounds < 2 {
        let Some(delivered) = outbound.recv().await else {
            break;
        };
        match (&delivered.to, &delivered.event) {
            (None, ServerEvent::ActorAssigned { actor: assigned }) => {
                tracing::info!(actor = %assigned, "round started");
                actor = Some(assigned.clone());
            }
            (Some(to), ServerEvent::WordChoices { choices }) => {
                tracing::info!(actor = %to, ?choices, "choices offered");
            }
            (None, ServerEvent::WordRevealed { word }) => {
                tracing::info!(word = %word, "word revealed");
                for member in &members {
                    if actor.as_ref() == Some(member) {
                        continue;
                    }
                    registry
                        .dispatch(ClientEvent::SendMessage {
                            room: room.clone(),
                            sender: member.clone(),
                            text: word.clone(),
                        })
                        .await;
                }
                rounds += 1;
            }
            (None, ServerEvent::GuessCorrect { guesser }) => {
                tracing::info!(guesser = %guesser, "guessed the word");
            }
            (None, ServerEvent::PointsUpdate { points }) => {
                tracing::info!(?points, "scores");
            }
            _ => {}
        }
    }

    let info = registry.get(&room)?.info().await?;
    tracing::info!(points = ?info.points, "final scores");
    registry.end_session(&room).await;
    Ok(())
}
