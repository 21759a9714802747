//! Spoiler-aware chat distribution.

use sketchparty_protocol::{PlayerName, Recipient, ServerEvent};

use crate::session::{GameSession, Outbound};

impl GameSession {
    /// Decides who may see a chat line from `sender`.
    ///
    /// Members who already solved the word talk only to the actor and
    /// to each other, so the answer never leaks back into the open
    /// room. The actor's own chat is suppressed outright. Everyone
    /// else broadcasts to the whole room.
    pub fn distribute_chat(&self, sender: &PlayerName, text: &str) -> Outbound {
        if !self.is_member(sender) {
            tracing::debug!(
                room = %self.room,
                sender = %sender,
                "chat from non-member dropped"
            );
            return Vec::new();
        }

        let event = ServerEvent::ChatMessage {
            sender: sender.clone(),
            text: text.to_string(),
        };

        if self.correct_guessers.contains(sender) {
            let mut out: Outbound = Vec::new();
            if let Some(actor) = self.actor() {
                out.push((Recipient::Member(actor.clone()), event.clone()));
            }
            for member in &self.correct_guessers {
                out.push((Recipient::Member(member.clone()), event.clone()));
            }
            out
        } else if self.actor() == Some(sender) {
            // The actor could spell the word out; drop it.
            Vec::new()
        } else {
            vec![(Recipient::All, event)]
        }
    }
}
