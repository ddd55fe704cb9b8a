use crate::types::Tick;

/// Converts a duration in seconds to a whole number of ticks, truncating any
/// fractional remainder.
///
/// `seconds_per_tick` must be positive.
///
/// # Examples
/// ```
/// # use tick_flow::seconds_to_ticks;
/// assert_eq!(seconds_to_ticks(1.0, 0.25), 4);
/// assert_eq!(seconds_to_ticks(1.1, 0.25), 4);
/// ```
pub fn seconds_to_ticks(seconds: f32, seconds_per_tick: f32) -> Tick {
    debug_assert!(seconds_per_tick > 0.0, "seconds_per_tick must be positive");
    (seconds / seconds_per_tick) as Tick
}

/// Converts a tick count (or signed tick delta) to seconds.
pub fn ticks_to_seconds(ticks: Tick, seconds_per_tick: f32) -> f32 {
    debug_assert!(seconds_per_tick > 0.0, "seconds_per_tick must be positive");
    ticks as f32 * seconds_per_tick
}

/// Returns the tick that will be current once the given number of seconds has
/// elapsed from `current_tick`.
pub fn tick_after(current_tick: Tick, seconds: f32, seconds_per_tick: f32) -> Tick {
    current_tick + seconds_to_ticks(seconds, seconds_per_tick)
}

/// Seconds elapsed since `reference_tick`. Negative while the reference tick
/// is still in the future.
pub fn elapsed_seconds(current_tick: Tick, reference_tick: Tick, seconds_per_tick: f32) -> f32 {
    ticks_to_seconds(current_tick - reference_tick, seconds_per_tick)
}

/// Seconds remaining until `reference_tick`. Negative once it has passed.
pub fn remaining_seconds(current_tick: Tick, reference_tick: Tick, seconds_per_tick: f32) -> f32 {
    -elapsed_seconds(current_tick, reference_tick, seconds_per_tick)
}

/// Returns whether the current tick is exactly the given tick.
pub fn is_at(current_tick: Tick, tick: Tick) -> bool {
    current_tick == tick
}

/// Returns whether the current tick is strictly after the given tick.
pub fn has_passed(current_tick: Tick, tick: Tick) -> bool {
    current_tick - tick > 0
}

/// Returns whether the current tick is at or before the given tick.
pub fn has_not_passed(current_tick: Tick, tick: Tick) -> bool {
    current_tick - tick <= 0
}

/// Returns whether the current tick is at or after the given tick.
pub fn has_reached(current_tick: Tick, tick: Tick) -> bool {
    current_tick - tick >= 0
}

/// Returns whether the current tick is strictly before the given tick.
pub fn has_not_reached(current_tick: Tick, tick: Tick) -> bool {
    current_tick - tick < 0
}
