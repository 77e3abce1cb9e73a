//! Time management for iterative deepening.
//!
//! The search polls the clock only between iterative-deepening rounds. A
//! round starts only when the previous round's duration, scaled by the
//! expected branching factor, fits into what is left of the move budget.

use std::time::{Duration, Instant};

/// Game clock readouts for the side to move.
pub trait Clock {
    /// Time left on the clock for the rest of the game.
    fn remaining(&self) -> Duration;

    /// Time spent on the current decision.
    fn elapsed(&self) -> Duration;

    /// Time added after each move.
    fn increment(&self) -> Duration {
        Duration::ZERO
    }
}

/// Wall-clock [`Clock`] started when the decision begins.
#[derive(Clone, Copy, Debug)]
pub struct GameClock {
    started: Instant,
    remaining_at_start: Duration,
    increment: Duration,
}

impl GameClock {
    #[must_use]
    pub fn start(remaining: Duration) -> Self {
        Self::with_increment(remaining, Duration::ZERO)
    }

    #[must_use]
    pub fn with_increment(remaining: Duration, increment: Duration) -> Self {
        GameClock {
            started: Instant::now(),
            remaining_at_start: remaining,
            increment,
        }
    }
}

impl Clock for GameClock {
    fn remaining(&self) -> Duration {
        self.remaining_at_start.saturating_sub(self.started.elapsed())
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn increment(&self) -> Duration {
        self.increment
    }
}

/// Tunable time-management constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimeParams {
    /// Expected growth of round time per extra ply (`k`); empirical
    pub branching_factor: u32,
    /// Moves the remaining time is spread over
    pub moves_to_go: u32,
    /// Hard depth ceiling in plies
    pub max_depth: u32,
    /// Below this much remaining time only depth 1 is searched
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub panic_time: Duration,
    /// Below this much remaining time the ceiling drops to `low_time_max_depth`
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub low_time: Duration,
    pub low_time_max_depth: u32,
}

impl Default for TimeParams {
    fn default() -> Self {
        TimeParams {
            branching_factor: 4,
            moves_to_go: 30,
            max_depth: 32,
            panic_time: Duration::from_millis(1_000),
            low_time: Duration::from_millis(10_000),
            low_time_max_depth: 4,
        }
    }
}

/// Decides how long to think and whether another round fits.
#[derive(Clone, Debug, Default)]
pub struct TimeManager {
    params: TimeParams,
}

impl TimeManager {
    #[must_use]
    pub fn new(params: TimeParams) -> Self {
        TimeManager { params }
    }

    #[must_use]
    pub fn params(&self) -> &TimeParams {
        &self.params
    }

    /// Time to spend on this decision.
    pub fn budget<C: Clock>(&self, clock: &C) -> Duration {
        let remaining = clock.remaining();
        let share = remaining / self.params.moves_to_go.max(1) + clock.increment() / 2;
        share.min(remaining / 2)
    }

    /// Deepest round allowed with `remaining` on the clock.
    #[must_use]
    pub fn depth_ceiling(&self, remaining: Duration) -> u32 {
        let ceiling = if remaining < self.params.panic_time {
            1
        } else if remaining < self.params.low_time {
            self.params.low_time_max_depth
        } else {
            self.params.max_depth
        };
        ceiling.clamp(1, self.params.max_depth.max(1))
    }

    /// Whether a round expected to take `last_round * k` fits in what is
    /// left of `budget` after `elapsed`.
    #[must_use]
    pub fn should_start_round(
        &self,
        last_round: Duration,
        elapsed: Duration,
        budget: Duration,
    ) -> bool {
        let left = budget.saturating_sub(elapsed);
        last_round.saturating_mul(self.params.branching_factor) < left
    }

    /// Whether a finished round ran past the budget.
    #[must_use]
    pub fn overran(&self, elapsed: Duration, budget: Duration) -> bool {
        elapsed > budget
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
