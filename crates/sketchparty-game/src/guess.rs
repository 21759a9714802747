//! Guess evaluation: fail-closed checks, then the atomic award step.

use sketchparty_protocol::PlayerName;

use crate::scoring;
use crate::session::GameSession;

impl GameSession {
    /// Evaluates one chat line as a guess against the current round.
    ///
    /// Returns `true` only when every condition holds: `guesser` is a
    /// member, is not the actor, has not already solved this round,
    /// the word is fixed, and the trimmed, case-folded text matches it
    /// exactly. Anything else fails closed.
    ///
    /// On a match the guesser is recorded, both awards land, and the
    /// countdown is cut to 75% (rounded up) of its remaining value —
    /// one step the owning room task never interleaves a tick into.
    pub fn evaluate_guess(&mut self, guesser: &PlayerName, text: &str) -> bool {
        if !self.is_member(guesser) {
            return false;
        }
        let Some(actor) = self.actor().cloned() else {
            return false;
        };
        if &actor == guesser {
            return false;
        }
        let Some(word) = self.current_word() else {
            return false;
        };
        if self.correct_guessers.contains(guesser) {
            return false;
        }
        if text.trim().to_lowercase() != word.trim().to_lowercase() {
            return false;
        }

        let seconds_left = self.timer;
        self.correct_guessers.insert(guesser.clone());
        scoring::apply_correct_guess(
            &mut self.points,
            guesser,
            &actor,
            seconds_left,
        );
        self.timer = (f64::from(seconds_left) * 0.75).ceil() as i32;
        tracing::info!(
            room = %self.room,
            guesser = %guesser,
            seconds_left,
            "correct guess"
        );
        true
    }
}
