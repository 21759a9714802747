//! Point awards for correct guesses.
//!
//! Pure arithmetic, kept apart from the state machine so the numbers
//! are testable without a session.

use std::collections::BTreeMap;

use sketchparty_protocol::PlayerName;

/// Flat award to the actor each time any guesser succeeds. Per
/// guesser, not per round — a well-conveyed word compounds.
pub const ACTOR_AWARD: u32 = 100;

/// Points per remaining countdown second for a correct guesser.
pub const GUESSER_AWARD_PER_SECOND: u32 = 10;

/// Award for a correct guess with `seconds_left` still on the clock.
///
/// The clock can legally read zero (or below, in the round-end window)
/// when a last-instant guess lands; that guess earns nothing but still
/// counts as solved.
pub fn guesser_award(seconds_left: i32) -> u32 {
    seconds_left.max(0) as u32 * GUESSER_AWARD_PER_SECOND
}

/// Applies both sides of a correct guess to the score table.
///
/// `seconds_left` is the countdown *before* the post-guess reduction —
/// the guesser is paid for the time they actually beat.
pub fn apply_correct_guess(
    points: &mut BTreeMap<PlayerName, u32>,
    guesser: &PlayerName,
    actor: &PlayerName,
    seconds_left: i32,
) {
    if let Some(score) = points.get_mut(guesser) {
        *score += guesser_award(seconds_left);
    }
    if let Some(score) = points.get_mut(actor) {
        *score += ACTOR_AWARD;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(names: &[&str]) -> BTreeMap<PlayerName, u32> {
        names.iter().map(|n| (PlayerName::new(*n), 0)).collect()
    }

    #[test]
    fn test_guesser_award_scales_with_time() {
        assert_eq!(guesser_award(40), 400);
        assert_eq!(guesser_award(1), 10);
        assert_eq!(guesser_award(0), 0);
    }

    #[test]
    fn test_guesser_award_never_negative() {
        assert_eq!(guesser_award(-1), 0);
    }

    #[test]
    fn test_apply_pays_guesser_and_actor() {
        let mut points = table(&["alice", "bob"]);
        apply_correct_guess(
            &mut points,
            &PlayerName::new("bob"),
            &PlayerName::new("alice"),
            40,
        );
        assert_eq!(points[&PlayerName::new("bob")], 400);
        assert_eq!(points[&PlayerName::new("alice")], 100);
    }

    #[test]
    fn test_actor_award_compounds_per_guesser() {
        let mut points = table(&["alice", "bob", "carol"]);
        let actor = PlayerName::new("alice");
        apply_correct_guess(&mut points, &PlayerName::new("bob"), &actor, 40);
        apply_correct_guess(&mut points, &PlayerName::new("carol"), &actor, 30);
        assert_eq!(points[&actor], 200);
    }

    #[test]
    fn test_apply_ignores_departed_members() {
        // A guess can race a leave; the award must not resurrect a key.
        let mut points = table(&["alice"]);
        apply_correct_guess(
            &mut points,
            &PlayerName::new("ghost"),
            &PlayerName::new("alice"),
            40,
        );
        assert_eq!(points.len(), 1);
        assert_eq!(points[&PlayerName::new("alice")], 100);
    }
}
