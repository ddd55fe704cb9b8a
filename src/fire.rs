use log::trace;
use thiserror::Error;

use crate::types::Tick;

/// Errors that can occur during fire-on-match dispatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FireError {
    /// Number of handlers does not match the number of timing ticks.
    /// Dispatching anyway would send the wrong handler to the wrong slot.
    #[error("Handler count {handlers} does not match timing tick count {timing_ticks}")]
    HandlerCountMismatch {
        timing_ticks: usize,
        handlers: usize,
    },
}

/// A timing offset paired with the handler to fire when the elapsed tick
/// matches it. Pairing offset and handler makes an arity mismatch impossible.
pub type FireEntry<'a> = (Tick, &'a mut dyn FnMut(usize));

/// Fires `action` once for every timing tick equal to `elapsed_tick`, passing
/// the matching index, in ascending index order.
///
/// This is level-triggered: evaluating the same `elapsed_tick` again (e.g.
/// after a rollback re-simulation) fires again. Callers needing once-only
/// firing must track that themselves.
///
/// # Examples
/// ```
/// # use tick_flow::fire_on_match;
/// let mut fired = Vec::new();
/// fire_on_match(12, &[5, 12, 12, 30], |index| fired.push(index));
/// assert_eq!(fired, vec![1, 2]);
/// ```
pub fn fire_on_match<F>(elapsed_tick: Tick, timing_ticks: &[Tick], mut action: F)
where
    F: FnMut(usize),
{
    for (index, timing_tick) in timing_ticks.iter().enumerate() {
        if elapsed_tick == *timing_tick {
            trace!("fire_on_match: index {index} at elapsed tick {elapsed_tick}");
            action(index);
        }
    }
}

/// Fires every entry whose timing tick equals `elapsed_tick`, in ascending
/// index order. Same level-triggered semantics as [`fire_on_match`], with one
/// handler per entry.
pub fn fire_entries(elapsed_tick: Tick, entries: &mut [FireEntry<'_>]) {
    for (index, (timing_tick, handler)) in entries.iter_mut().enumerate() {
        if elapsed_tick == *timing_tick {
            trace!("fire_entries: index {index} at elapsed tick {elapsed_tick}");
            handler(index);
        }
    }
}

/// Parallel-slice form of [`fire_entries`], for callers that already hold
/// timing ticks and handlers in separate arrays.
///
/// # Errors
/// Returns [`FireError::HandlerCountMismatch`] if the slices differ in length.
pub fn try_fire_handlers(
    elapsed_tick: Tick,
    timing_ticks: &[Tick],
    handlers: &mut [&mut dyn FnMut(usize)],
) -> Result<(), FireError> {
    if timing_ticks.len() != handlers.len() {
        return Err(FireError::HandlerCountMismatch {
            timing_ticks: timing_ticks.len(),
            handlers: handlers.len(),
        });
    }
    for (index, timing_tick) in timing_ticks.iter().enumerate() {
        if elapsed_tick == *timing_tick {
            trace!("try_fire_handlers: index {index} at elapsed tick {elapsed_tick}");
            handlers[index](index);
        }
    }
    Ok(())
}

/// Parallel-slice form of [`fire_entries`].
///
/// # Panics
/// Panics if the slices differ in length.
/// For a non-panicking version, use [`try_fire_handlers`].
pub fn fire_handlers(
    elapsed_tick: Tick,
    timing_ticks: &[Tick],
    handlers: &mut [&mut dyn FnMut(usize)],
) {
    try_fire_handlers(elapsed_tick, timing_ticks, handlers)
        .expect("fire_handlers: handler count must match timing tick count")
}

/// [`fire_on_match`] anchored to a known start tick:
/// `elapsed = current_tick - start_tick`.
pub fn fire_from_start<F>(current_tick: Tick, start_tick: Tick, timing_ticks: &[Tick], action: F)
where
    F: FnMut(usize),
{
    fire_on_match(current_tick - start_tick, timing_ticks, action);
}

/// [`fire_on_match`] anchored to a known end tick and total duration:
/// `elapsed = current_tick - end_tick + duration_ticks`.
///
/// Equivalent to [`fire_from_start`] with
/// `start_tick = end_tick - duration_ticks`, letting callers express "fire N
/// ticks before completion" without doing that subtraction themselves.
pub fn fire_from_end<F>(
    current_tick: Tick,
    end_tick: Tick,
    duration_ticks: Tick,
    timing_ticks: &[Tick],
    action: F,
) where
    F: FnMut(usize),
{
    fire_on_match(current_tick - end_tick + duration_ticks, timing_ticks, action);
}

#[cfg(test)]
mod fire_on_match_tests {
    use super::fire_on_match;

    #[test]
    fn coincident_targets_all_fire_in_index_order() {
        let mut fired = Vec::new();
        fire_on_match(12, &[5, 12, 12, 30], |index| fired.push(index));
        assert_eq!(fired, vec![1, 2]);
    }

    #[test]
    fn near_misses_fire_nothing() {
        let mut fired = Vec::new();
        fire_on_match(11, &[5, 12, 12, 30], |index| fired.push(index));
        fire_on_match(13, &[5, 12, 12, 30], |index| fired.push(index));
        assert!(fired.is_empty());
    }

    #[test]
    fn re_evaluation_fires_again() {
        let mut count = 0;
        fire_on_match(5, &[5], |_| count += 1);
        fire_on_match(5, &[5], |_| count += 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn negative_elapsed_matches_negative_target() {
        let mut fired = Vec::new();
        fire_on_match(-3, &[-3, 0, 3], |index| fired.push(index));
        assert_eq!(fired, vec![0]);
    }

    #[test]
    fn empty_targets_fire_nothing() {
        let mut count = 0;
        fire_on_match(0, &[], |_| count += 1);
        assert_eq!(count, 0);
    }
}
