//! Discrete timer primitives advanced by exactly one unit per step.

use std::num::NonZeroU32;

/// One-shot countdown measured in whole simulation steps.
///
/// Once the timer reaches its duration it stays finished until replaced;
/// replacing the value is the mechanism used to defer a despawn by one
/// more step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedTimer {
    duration: NonZeroU32,
    elapsed: u32,
}

impl FixedTimer {
    /// Creates a new one-shot timer with the provided duration.
    #[must_use]
    pub const fn new(duration: NonZeroU32) -> Self {
        Self {
            duration,
            elapsed: 0,
        }
    }

    /// Advances the timer by one step.
    pub fn tick(&mut self) {
        if self.elapsed < self.duration.get() {
            self.elapsed += 1;
        }
    }

    /// Reports whether the timer has reached its duration. The flag is
    /// terminal for this timer instance.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.elapsed >= self.duration.get()
    }
}

/// Repeating countdown that rolls over every `period` steps.
///
/// The finished flag is edge-triggered: it reads `true` only between the
/// `tick()` call that rolled the timer over and the next `tick()` call.
/// Consumers that need a persistent ready flag must latch the rising edge
/// themselves, see [`FinishedEdge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatingTimer {
    period: NonZeroU32,
    elapsed: u32,
    finished: bool,
}

impl RepeatingTimer {
    /// Creates a new repeating timer with the provided period.
    #[must_use]
    pub const fn new(period: NonZeroU32) -> Self {
        Self {
            period,
            elapsed: 0,
            finished: false,
        }
    }

    /// Advances the timer by one step, rolling over on the period.
    pub fn tick(&mut self) {
        self.elapsed += 1;
        if self.elapsed >= self.period.get() {
            self.elapsed = 0;
            self.finished = true;
        } else {
            self.finished = false;
        }
    }

    /// Reports whether the most recent `tick()` rolled the timer over.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Explicit previous-value latch that converts a finished level into a
/// rising-edge observation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FinishedEdge {
    previous: bool,
}

impl FinishedEdge {
    /// Creates a latch that has not yet observed a finished signal.
    #[must_use]
    pub const fn new() -> Self {
        Self { previous: false }
    }

    /// Records the current level and reports whether it rose since the
    /// previous observation.
    pub fn observe(&mut self, current: bool) -> bool {
        let rose = current && !self.previous;
        self.previous = current;
        rose
    }

    /// Marks the level as already observed, so a high level at the next
    /// observation does not register as a rise.
    pub fn suppress_next(&mut self) {
        self.previous = true;
    }
}
