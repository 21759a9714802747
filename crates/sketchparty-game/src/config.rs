//! Session timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing and sizing knobs for a game session.
///
/// Defaults match the intended party pacing: 60-second rounds
/// evaluated on a 100 ms tick, a 5-second breather between rounds, 10
/// seconds for the actor to pick a word, and a 2-second grace before
/// late joiners get the in-progress state. Tests shrink the durations
/// to keep paused-clock runs short.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seconds on the countdown at round start.
    pub round_seconds: i32,

    /// Interval between periodic session evaluations.
    pub tick_interval: Duration,

    /// Quiet period between a round ending and the next one starting.
    pub round_gap: Duration,

    /// How long the actor may deliberate before the fallback word is
    /// auto-selected.
    pub word_timeout: Duration,

    /// Wall-clock step between countdown decrements.
    pub countdown_step: Duration,

    /// Delay before a late joiner is sent the in-progress round state.
    pub join_grace: Duration,

    /// Number of candidate words offered to the actor each round.
    pub word_choices: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_seconds: 60,
            tick_interval: Duration::from_millis(100),
            round_gap: Duration::from_millis(5_000),
            word_timeout: Duration::from_millis(10_000),
            countdown_step: Duration::from_millis(1_000),
            join_grace: Duration::from_millis(2_000),
            word_choices: 3,
        }
    }
}

impl GameConfig {
    /// Clamps out-of-range values so the config is safe to run with.
    ///
    /// Rules: at least one countdown second, at least one word choice,
    /// and a non-zero tick interval (a zero interval would spin the
    /// room task).
    pub fn validated(mut self) -> Self {
        if self.round_seconds < 1 {
            tracing::warn!(
                round_seconds = self.round_seconds,
                "round_seconds below 1 — clamping"
            );
            self.round_seconds = 1;
        }
        if self.word_choices == 0 {
            tracing::warn!("word_choices is 0 — clamping to 1");
            self.word_choices = 1;
        }
        if self.tick_interval.is_zero() {
            tracing::warn!("tick_interval is zero — resetting to 100ms");
            self.tick_interval = Duration::from_millis(100);
        }
        self
    }
}
