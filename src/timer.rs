use log::trace;

use crate::tick_time::{has_reached, seconds_to_ticks, ticks_to_seconds};
use crate::types::Tick;

/// A timer that expires once the shared tick counter reaches a target tick.
///
/// This is a plain value with no running state: every participant holding the
/// same target tick reads the same expiry from the same tick counter. Edge
/// detection (acting exactly once on expiry) is deliberately left to
/// caller-owned detectors like [`ExpiryEdge`], so the timer itself stays safe
/// to re-evaluate under rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickTimer {
    target_tick: Tick,
}

impl TickTimer {
    /// A timer expiring at the given absolute tick.
    pub fn at(target_tick: Tick) -> Self {
        Self { target_tick }
    }

    /// A timer expiring `duration_ticks` after `current_tick`.
    pub fn running(current_tick: Tick, duration_ticks: Tick) -> Self {
        Self::at(current_tick + duration_ticks)
    }

    /// A timer expiring `seconds` after `current_tick`, truncated to whole
    /// ticks.
    pub fn running_seconds(current_tick: Tick, seconds: f32, seconds_per_tick: f32) -> Self {
        Self::running(current_tick, seconds_to_ticks(seconds, seconds_per_tick))
    }

    /// The absolute tick this timer expires at.
    pub fn target_tick(&self) -> Tick {
        self.target_tick
    }

    /// Returns whether the timer has expired at `current_tick` (target
    /// reached or passed).
    pub fn is_expired(&self, current_tick: Tick) -> bool {
        has_reached(current_tick, self.target_tick)
    }

    /// Ticks until expiry. Negative once the target tick has passed.
    pub fn remaining_ticks(&self, current_tick: Tick) -> Tick {
        self.target_tick - current_tick
    }

    /// Seconds until expiry. Negative once the target tick has passed.
    pub fn remaining_seconds(&self, current_tick: Tick, seconds_per_tick: f32) -> f32 {
        ticks_to_seconds(self.remaining_ticks(current_tick), seconds_per_tick)
    }
}

/// Caller-owned edge detector over [`TickTimer::is_expired`].
///
/// [`ExpiryEdge::poll`] returns true exactly on the not-expired to expired
/// transition. If the timer later reads not-expired again (rollback, or the
/// caller swapped in a later timer), the detector re-arms and will report the
/// next expiry too.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpiryEdge {
    was_expired: bool,
}

impl ExpiryEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls the timer at `current_tick`, returning true only on the tick
    /// where it transitions into the expired state.
    pub fn poll(&mut self, timer: TickTimer, current_tick: Tick) -> bool {
        let expired = timer.is_expired(current_tick);
        let fired = expired && !self.was_expired;
        self.was_expired = expired;
        if fired {
            trace!(
                "timer expired at tick {current_tick} (target {})",
                timer.target_tick()
            );
        }
        fired
    }
}

/// Caller-owned whole-second countdown over a [`TickTimer`].
///
/// [`Countdown::poll`] returns each new value of `ceil(remaining seconds)`
/// exactly once while the timer is unexpired, filtered to the configured
/// count window. Counts outside the window are still remembered, so entering
/// the window later does not re-emit a stale value.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    min_count: i32,
    max_count: i32,
    last_count: Option<i32>,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            min_count: 1,
            max_count: i32::MAX,
            last_count: None,
        }
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// A countdown that only emits counts within `min_count..=max_count`.
    pub fn with_range(min_count: i32, max_count: i32) -> Self {
        Self {
            min_count,
            max_count,
            last_count: None,
        }
    }

    /// Polls the timer at `current_tick`, returning the whole-seconds-left
    /// count when it changes and lies within the configured window.
    pub fn poll(
        &mut self,
        timer: TickTimer,
        current_tick: Tick,
        seconds_per_tick: f32,
    ) -> Option<i32> {
        if timer.is_expired(current_tick) {
            return None;
        }
        let count = timer.remaining_seconds(current_tick, seconds_per_tick).ceil() as i32;
        if self.last_count == Some(count) {
            return None;
        }
        self.last_count = Some(count);
        if count < self.min_count || count > self.max_count {
            return None;
        }
        Some(count)
    }
}
