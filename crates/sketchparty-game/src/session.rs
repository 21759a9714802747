//! The per-room turn/timer state machine.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rand::seq::{IndexedRandom, SliceRandom};
use sketchparty_protocol::{PlayerName, Recipient, RoomCode, ServerEvent};
use tokio::time::Instant;

use crate::{GameConfig, WordBank};

/// Countdown sentinel meaning "waiting for the next round to begin".
const WAITING_FOR_ROUND: i32 = -1;

/// Events produced by one session mutation, paired with their audience.
pub type Outbound = Vec<(Recipient, ServerEvent)>;

/// The candidate words most recently offered to the actor.
#[derive(Debug, Clone)]
pub struct PendingChoices {
    /// The words sent to the actor.
    pub options: Vec<String>,
    /// Auto-selected if the actor never picks.
    pub fallback: String,
}

/// A late joiner owed a catch-up snapshot once the grace delay passes.
#[derive(Debug)]
struct Catchup {
    member: PlayerName,
    due: Instant,
}

/// One room's game state: turn rotation, scores, word lifecycle,
/// countdown.
///
/// Purely synchronous. Every entry point takes the caller's clock
/// reading and returns the events to deliver; the owning room task
/// serializes ticks and external events, so no two mutations ever
/// interleave. Time gates compare wall-clock readings rather than
/// counting ticks, so scheduling jitter never moves a transition
/// backward.
pub struct GameSession {
    pub(crate) room: RoomCode,
    pub(crate) config: GameConfig,
    bank: Arc<WordBank>,
    /// Turn rotation; reshuffled at the start of each full cycle.
    pub(crate) order: Vec<PlayerName>,
    /// Scores. Keys are always exactly the members of `order`.
    pub(crate) points: BTreeMap<PlayerName, u32>,
    /// Index into `order`; `None` before the first round.
    actor_index: Option<usize>,
    pub(crate) current_word: Option<String>,
    pending_choices: Option<PendingChoices>,
    /// Countdown seconds; negative means waiting for the next round.
    pub(crate) timer: i32,
    round_running: bool,
    /// Members who solved the word this round. Never holds the actor.
    pub(crate) correct_guessers: BTreeSet<PlayerName>,
    /// Last state advance; elapsed-time gates measure from here.
    last_advance: Instant,
    catchups: Vec<Catchup>,
}

impl GameSession {
    /// Creates a session for `room` from its current member list.
    ///
    /// Scores start at zero, the rotation follows the given order, and
    /// the first round starts once the inter-round gap elapses.
    /// Duplicate names in the list are collapsed.
    pub fn new(
        room: RoomCode,
        members: &[PlayerName],
        config: GameConfig,
        bank: Arc<WordBank>,
        now: Instant,
    ) -> Self {
        let mut order = Vec::with_capacity(members.len());
        let mut points = BTreeMap::new();
        for member in members {
            if points.insert(member.clone(), 0).is_none() {
                order.push(member.clone());
            }
        }

        Self {
            room,
            config: config.validated(),
            bank,
            order,
            points,
            actor_index: None,
            current_word: None,
            pending_choices: None,
            timer: WAITING_FOR_ROUND,
            round_running: false,
            correct_guessers: BTreeSet::new(),
            last_advance: now,
            catchups: Vec::new(),
        }
    }

    pub fn room(&self) -> &RoomCode {
        &self.room
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn member_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_member(&self, name: &PlayerName) -> bool {
        self.points.contains_key(name)
    }

    /// The member currently conveying the word, if a round has started.
    pub fn actor(&self) -> Option<&PlayerName> {
        self.actor_index.and_then(|i| self.order.get(i))
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    pub fn timer_seconds(&self) -> i32 {
        self.timer
    }

    pub fn round_running(&self) -> bool {
        self.round_running
    }

    pub fn points(&self) -> &BTreeMap<PlayerName, u32> {
        &self.points
    }

    pub fn correct_guessers(&self) -> &BTreeSet<PlayerName> {
        &self.correct_guessers
    }

    pub fn pending_choices(&self) -> Option<&PendingChoices> {
        self.pending_choices.as_ref()
    }

    // -----------------------------------------------------------------
    // Periodic evaluation
    // -----------------------------------------------------------------

    /// Advances every time-gated transition due at `now`.
    ///
    /// Called by the room task on a fixed short interval, even absent
    /// external events. Three conceptual states:
    ///
    /// 1. waiting for a round — start one after the inter-round gap;
    /// 2. round started, no word yet — fall back to the pre-chosen
    ///    word after the choice timeout;
    /// 3. round in progress — decrement the countdown once per step.
    pub fn tick(&mut self, now: Instant) -> Outbound {
        let mut out = Vec::new();
        self.flush_catchups(now, &mut out);
        if self.order.is_empty() {
            return out;
        }

        let everyone_guessed = self.member_count() > 1
            && self.correct_guessers.len() == self.member_count() - 1;

        if self.timer <= WAITING_FOR_ROUND || everyone_guessed {
            // Hold the round-end state long enough for clients to show
            // feedback before the actor rotates.
            if now.duration_since(self.last_advance) > self.config.round_gap {
                self.begin_round(now, &mut out);
            }
        } else {
            if self.member_count() == 1 {
                // Nobody left to guess; hold the clock.
                self.round_running = false;
            } else if !self.round_running {
                // Membership recovered while suspended; retire this
                // round and let the next start through the usual gap.
                self.timer = WAITING_FOR_ROUND;
                return out;
            }

            let elapsed = now.duration_since(self.last_advance);
            if self.current_word.is_none() {
                if elapsed >= self.config.word_timeout {
                    if let Some(pending) = &self.pending_choices {
                        let word = pending.fallback.clone();
                        tracing::info!(
                            room = %self.room,
                            "word choice timed out, using fallback"
                        );
                        self.current_word = Some(word.clone());
                        out.push((
                            Recipient::All,
                            ServerEvent::WordRevealed { word },
                        ));
                    }
                }
            } else if self.round_running
                && (self.timer == 0 || elapsed > self.config.countdown_step)
            {
                // timer == 0 is the forced-end marker (actor left, or
                // the countdown just expired): retire it without
                // waiting out another full step.
                self.timer -= 1;
                out.push((
                    Recipient::All,
                    ServerEvent::TimerUpdate { seconds: self.timer },
                ));
                self.last_advance = now;
            }
        }

        out
    }

    /// Rotates the actor, offers word choices, resets the countdown.
    fn begin_round(&mut self, now: Instant, out: &mut Outbound) {
        let mut rng = rand::rng();

        let next = match self.actor_index {
            Some(i) => i + 1,
            None => 0,
        };
        let next = if next >= self.order.len() {
            // Full cycle complete; reshuffle the rotation.
            self.order.shuffle(&mut rng);
            0
        } else {
            next
        };
        self.actor_index = Some(next);
        let actor = self.order[next].clone();
        tracing::info!(room = %self.room, actor = %actor, "round started");
        out.push((
            Recipient::All,
            ServerEvent::ActorAssigned { actor: actor.clone() },
        ));

        self.current_word = None;
        self.pending_choices = None;
        match self.bank.sample(self.config.word_choices, &mut rng) {
            Ok(options) => {
                // The fallback is fixed now, so the timeout path needs
                // no further randomness.
                if let Some(fallback) = options.choose(&mut rng).cloned() {
                    out.push((
                        Recipient::Member(actor),
                        ServerEvent::WordChoices { choices: options.clone() },
                    ));
                    self.pending_choices =
                        Some(PendingChoices { options, fallback });
                }
            }
            Err(e) => {
                // Registry construction validates the vocabulary, so
                // this path is unreachable in a configured process.
                tracing::error!(
                    room = %self.room,
                    error = %e,
                    "word sampling failed"
                );
            }
        }

        self.correct_guessers.clear();
        self.timer = self.config.round_seconds;
        self.round_running = true;
        out.push((
            Recipient::All,
            ServerEvent::TimerUpdate { seconds: self.timer },
        ));
        self.last_advance = now;
    }

    /// Sends the in-progress round to late joiners whose grace expired.
    fn flush_catchups(&mut self, now: Instant, out: &mut Outbound) {
        let mut i = 0;
        while i < self.catchups.len() {
            if self.catchups[i].due > now {
                i += 1;
                continue;
            }
            let member = self.catchups.swap_remove(i).member;
            if let (Some(actor), Some(word)) =
                (self.actor().cloned(), self.current_word.clone())
            {
                out.push((
                    Recipient::Member(member.clone()),
                    ServerEvent::ActorAssigned { actor },
                ));
                out.push((
                    Recipient::Member(member),
                    ServerEvent::WordRevealed { word },
                ));
            }
        }
    }

    // -----------------------------------------------------------------
    // External events
    // -----------------------------------------------------------------

    /// Entry point for a send-message event.
    ///
    /// A correct guess never reaches the room as chat: it becomes a
    /// public guessed notice plus a score snapshot. Everything else
    /// goes through the spoiler-aware distributor.
    pub fn handle_chat(&mut self, sender: &PlayerName, text: &str) -> Outbound {
        if self.evaluate_guess(sender, text) {
            vec![
                (
                    Recipient::All,
                    ServerEvent::GuessCorrect { guesser: sender.clone() },
                ),
                (
                    Recipient::All,
                    ServerEvent::PointsUpdate { points: self.points.clone() },
                ),
            ]
        } else {
            self.distribute_chat(sender, text)
        }
    }

    /// Explicit word pick from the actor.
    ///
    /// Only the current actor may pick, only an offered choice counts,
    /// and a pick after the word is already fixed is ignored. Invalid
    /// picks are dropped silently — they race with the timeout
    /// fallback and with actor rotation, so they are normal, not
    /// errors.
    pub fn choose_word(&mut self, sender: &PlayerName, word: &str) -> Outbound {
        if self.actor() != Some(sender) {
            tracing::debug!(
                room = %self.room,
                sender = %sender,
                "word pick from non-actor ignored"
            );
            return Vec::new();
        }
        if self.current_word.is_some() {
            tracing::debug!(room = %self.room, "word already fixed, pick ignored");
            return Vec::new();
        }
        let offered = self
            .pending_choices
            .as_ref()
            .is_some_and(|p| p.options.iter().any(|w| w == word));
        if !offered {
            tracing::debug!(
                room = %self.room,
                word,
                "word pick not among offered choices"
            );
            return Vec::new();
        }

        self.current_word = Some(word.to_string());
        vec![(
            Recipient::All,
            ServerEvent::WordRevealed { word: word.to_string() },
        )]
    }

    /// Appends a newly joined member to the rotation and score table.
    ///
    /// Re-joins of an existing member are absorbed. If a round is
    /// running, the joiner is queued for a catch-up snapshot after the
    /// grace delay, giving their client time to finish connecting.
    pub fn add_member(&mut self, member: PlayerName, now: Instant) {
        if self.points.contains_key(&member) {
            tracing::debug!(
                room = %self.room,
                member = %member,
                "stale join ignored"
            );
            return;
        }
        self.points.insert(member.clone(), 0);
        self.order.push(member.clone());
        tracing::info!(
            room = %self.room,
            member = %member,
            members = self.order.len(),
            "member joined game"
        );
        if self.round_running {
            self.catchups.push(Catchup {
                member,
                due: now + self.config.join_grace,
            });
        }
    }

    /// Removes a member from the rotation and score table.
    ///
    /// A departing actor forces the round to end; a room reduced to
    /// one member forces suspension. Double-leaves are absorbed.
    pub fn remove_member(&mut self, member: &PlayerName) {
        let was_actor = self.actor() == Some(member);
        if self.points.remove(member).is_some() {
            if let Some(pos) = self.order.iter().position(|m| m == member) {
                self.order.remove(pos);
                if let Some(i) = self.actor_index {
                    if pos < i {
                        // Keep the index on the same member when
                        // someone earlier in the rotation leaves.
                        self.actor_index = Some(i - 1);
                    } else if pos == i {
                        // The next round falls to whoever followed the
                        // departing actor.
                        self.actor_index = i.checked_sub(1);
                    }
                }
            }
            self.correct_guessers.remove(member);
            self.catchups.retain(|c| &c.member != member);
            tracing::info!(
                room = %self.room,
                member = %member,
                members = self.order.len(),
                "member left game"
            );
            if was_actor {
                self.timer = 0;
            }
        } else {
            tracing::debug!(
                room = %self.room,
                member = %member,
                "stale leave ignored"
            );
        }

        if self.member_count() == 1 {
            self.timer = 0;
        }
    }
}
