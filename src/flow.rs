use log::trace;
use thiserror::Error;

use crate::types::Tick;

/// Errors that can occur when evaluating a staged flow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A staged flow needs at least one stage boundary.
    #[error("Staged flow requires at least one boundary")]
    EmptyBoundaries,

    /// Boundaries are cumulative end-offsets and must be non-decreasing.
    #[error("Boundary at index {index} is less than the boundary before it")]
    NonMonotonicBoundaries { index: usize },
}

/// The stage a flow is currently in, and how far into it the flow has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageAt {
    /// Index of the active stage within the boundary list.
    pub index: usize,
    /// Ticks elapsed within the active stage. Negative for stage 0 while the
    /// flow's reference tick is still in the future.
    pub elapsed_in_stage: Tick,
}

fn check_boundaries(boundaries: &[Tick]) -> Result<(), FlowError> {
    if boundaries.is_empty() {
        return Err(FlowError::EmptyBoundaries);
    }
    for index in 1..boundaries.len() {
        if boundaries[index] < boundaries[index - 1] {
            return Err(FlowError::NonMonotonicBoundaries { index });
        }
    }
    Ok(())
}

// Callers must have validated `boundaries` (non-empty, non-decreasing).
fn stage_at_unchecked(elapsed_tick: Tick, boundaries: &[Tick]) -> Option<StageAt> {
    let last = boundaries[boundaries.len() - 1];
    if elapsed_tick >= last {
        return None;
    }
    for (index, boundary) in boundaries.iter().enumerate() {
        if elapsed_tick >= *boundary {
            continue;
        }
        let elapsed_in_stage = if index == 0 {
            elapsed_tick
        } else {
            elapsed_tick - boundaries[index - 1]
        };
        return Some(StageAt {
            index,
            elapsed_in_stage,
        });
    }
    None
}

/// Returns which stage `elapsed_tick` falls in, given cumulative stage-end
/// boundaries, or `None` once the whole flow has completed.
///
/// Boundaries are half-open upper bounds: with boundaries `[10, 25, 40]`,
/// stage 0 covers ticks below 10, stage 1 covers 10..25, stage 2 covers
/// 25..40, and 40 onward is complete. An elapsed tick exactly equal to a
/// boundary belongs to the *next* stage.
///
/// # Errors
/// Returns a [`FlowError`] if `boundaries` is empty or not non-decreasing.
///
/// # Examples
/// ```
/// # use tick_flow::{try_stage_at, StageAt};
/// let stage = try_stage_at(24, &[10, 25, 40]).unwrap();
/// assert_eq!(stage, Some(StageAt { index: 1, elapsed_in_stage: 14 }));
/// assert_eq!(try_stage_at(40, &[10, 25, 40]).unwrap(), None);
/// ```
pub fn try_stage_at(elapsed_tick: Tick, boundaries: &[Tick]) -> Result<Option<StageAt>, FlowError> {
    check_boundaries(boundaries)?;
    Ok(stage_at_unchecked(elapsed_tick, boundaries))
}

/// Returns which stage `elapsed_tick` falls in.
///
/// # Panics
/// Panics if `boundaries` is empty or not non-decreasing.
/// For a non-panicking version, use [`try_stage_at`].
pub fn stage_at(elapsed_tick: Tick, boundaries: &[Tick]) -> Option<StageAt> {
    try_stage_at(elapsed_tick, boundaries)
        .expect("stage_at: boundaries must be non-empty and non-decreasing")
}

/// Invokes `action` with the active stage's index and within-stage elapsed
/// tick. Exactly one stage is active per evaluation; once `elapsed_tick`
/// reaches the last boundary the flow is complete and nothing is invoked.
///
/// # Errors
/// Returns a [`FlowError`] if `boundaries` is empty or not non-decreasing.
pub fn try_staged_flow<F>(
    elapsed_tick: Tick,
    boundaries: &[Tick],
    mut action: F,
) -> Result<(), FlowError>
where
    F: FnMut(usize, Tick),
{
    if let Some(stage) = try_stage_at(elapsed_tick, boundaries)? {
        trace!(
            "staged_flow: stage {} at {} ticks in",
            stage.index,
            stage.elapsed_in_stage
        );
        action(stage.index, stage.elapsed_in_stage);
    }
    Ok(())
}

/// Invokes `action` with the active stage's index and within-stage elapsed
/// tick.
///
/// # Panics
/// Panics if `boundaries` is empty or not non-decreasing.
/// For a non-panicking version, use [`try_staged_flow`].
pub fn staged_flow<F>(elapsed_tick: Tick, boundaries: &[Tick], action: F)
where
    F: FnMut(usize, Tick),
{
    try_staged_flow(elapsed_tick, boundaries, action)
        .expect("staged_flow: boundaries must be non-empty and non-decreasing")
}

/// [`try_staged_flow`] anchored to a known start tick:
/// `elapsed = current_tick - start_tick`.
pub fn try_staged_flow_from_start<F>(
    current_tick: Tick,
    start_tick: Tick,
    boundaries: &[Tick],
    action: F,
) -> Result<(), FlowError>
where
    F: FnMut(usize, Tick),
{
    try_staged_flow(current_tick - start_tick, boundaries, action)
}

/// [`try_staged_flow_from_start`], panicking on invalid boundaries.
///
/// # Panics
/// Panics if `boundaries` is empty or not non-decreasing.
pub fn staged_flow_from_start<F>(current_tick: Tick, start_tick: Tick, boundaries: &[Tick], action: F)
where
    F: FnMut(usize, Tick),
{
    try_staged_flow_from_start(current_tick, start_tick, boundaries, action)
        .expect("staged_flow_from_start: boundaries must be non-empty and non-decreasing")
}

/// [`try_staged_flow`] anchored so that the flow's *last* boundary lands
/// exactly on `complete_tick`: `elapsed = current_tick - complete_tick +
/// boundaries[last]`. Useful when the deadline is fixed and the start must be
/// back-computed.
///
/// Equivalent to [`try_staged_flow_from_start`] with
/// `start_tick = complete_tick - boundaries[last]`. Once `current_tick` is
/// past `complete_tick` the flow is terminal and nothing is invoked.
///
/// # Errors
/// Returns a [`FlowError`] if `boundaries` is empty or not non-decreasing,
/// including when the flow is already past completion.
pub fn try_staged_flow_by_completion<F>(
    current_tick: Tick,
    complete_tick: Tick,
    boundaries: &[Tick],
    action: F,
) -> Result<(), FlowError>
where
    F: FnMut(usize, Tick),
{
    check_boundaries(boundaries)?;
    if current_tick > complete_tick {
        return Ok(());
    }
    let total = boundaries[boundaries.len() - 1];
    try_staged_flow(current_tick - complete_tick + total, boundaries, action)
}

/// [`try_staged_flow_by_completion`], panicking on invalid boundaries.
///
/// # Panics
/// Panics if `boundaries` is empty or not non-decreasing.
pub fn staged_flow_by_completion<F>(
    current_tick: Tick,
    complete_tick: Tick,
    boundaries: &[Tick],
    action: F,
) where
    F: FnMut(usize, Tick),
{
    try_staged_flow_by_completion(current_tick, complete_tick, boundaries, action)
        .expect("staged_flow_by_completion: boundaries must be non-empty and non-decreasing")
}

/// A staged flow whose boundaries were validated once at construction, so
/// per-tick evaluation is infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFlow {
    boundaries: Vec<Tick>,
}

impl StagedFlow {
    /// Builds a flow from cumulative stage-end boundaries.
    ///
    /// # Errors
    /// Returns a [`FlowError`] if `boundaries` is empty or not non-decreasing.
    pub fn from_boundaries(boundaries: Vec<Tick>) -> Result<Self, FlowError> {
        check_boundaries(&boundaries)?;
        Ok(Self { boundaries })
    }

    /// Builds a flow from per-stage durations, cumulating them into
    /// boundaries. A negative duration makes the cumulative sequence
    /// decrease and is rejected.
    ///
    /// # Errors
    /// Returns a [`FlowError`] if `durations` is empty or contains a negative
    /// duration.
    pub fn from_durations(durations: Vec<Tick>) -> Result<Self, FlowError> {
        let mut boundaries = Vec::with_capacity(durations.len());
        let mut total: Tick = 0;
        for duration in durations {
            total += duration;
            boundaries.push(total);
        }
        Self::from_boundaries(boundaries)
    }

    /// The cumulative stage-end boundaries.
    pub fn boundaries(&self) -> &[Tick] {
        &self.boundaries
    }

    /// Number of stages.
    pub fn stage_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Total length of the flow in ticks (the last boundary).
    pub fn total_ticks(&self) -> Tick {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Returns the active stage for `elapsed_tick`, or `None` once complete.
    pub fn stage_at(&self, elapsed_tick: Tick) -> Option<StageAt> {
        stage_at_unchecked(elapsed_tick, &self.boundaries)
    }

    /// Returns whether `elapsed_tick` is at or past the last boundary.
    pub fn is_complete(&self, elapsed_tick: Tick) -> bool {
        elapsed_tick >= self.total_ticks()
    }

    /// Invokes `action` with the active stage's index and within-stage
    /// elapsed tick; no-op once complete.
    pub fn run<F>(&self, elapsed_tick: Tick, mut action: F)
    where
        F: FnMut(usize, Tick),
    {
        if let Some(stage) = self.stage_at(elapsed_tick) {
            action(stage.index, stage.elapsed_in_stage);
        }
    }

    /// [`StagedFlow::run`] anchored to a known start tick.
    pub fn run_from_start<F>(&self, current_tick: Tick, start_tick: Tick, action: F)
    where
        F: FnMut(usize, Tick),
    {
        self.run(current_tick - start_tick, action);
    }

    /// [`StagedFlow::run`] anchored so the last boundary lands on
    /// `complete_tick`; no-op once `current_tick` is past it.
    pub fn run_by_completion<F>(&self, current_tick: Tick, complete_tick: Tick, action: F)
    where
        F: FnMut(usize, Tick),
    {
        if current_tick > complete_tick {
            return;
        }
        self.run(current_tick - complete_tick + self.total_ticks(), action);
    }
}

#[cfg(test)]
mod stage_at_tests {
    use super::{stage_at, StageAt};

    fn at(index: usize, elapsed_in_stage: i64) -> Option<StageAt> {
        Some(StageAt {
            index,
            elapsed_in_stage,
        })
    }

    #[test]
    fn partitions_the_tick_range() {
        let boundaries = [10, 25, 40];
        assert_eq!(stage_at(0, &boundaries), at(0, 0));
        assert_eq!(stage_at(9, &boundaries), at(0, 9));
        assert_eq!(stage_at(10, &boundaries), at(1, 0));
        assert_eq!(stage_at(24, &boundaries), at(1, 14));
        assert_eq!(stage_at(25, &boundaries), at(2, 0));
        assert_eq!(stage_at(39, &boundaries), at(2, 14));
        assert_eq!(stage_at(40, &boundaries), None);
        assert_eq!(stage_at(41, &boundaries), None);
    }

    #[test]
    fn boundary_value_belongs_to_the_next_stage() {
        let boundaries = [10, 25, 40];
        for (index, boundary) in boundaries.iter().enumerate() {
            let stage = stage_at(*boundary, &boundaries);
            match stage {
                Some(stage) => {
                    assert_eq!(stage.index, index + 1);
                    assert_eq!(stage.elapsed_in_stage, 0);
                }
                // the last boundary closes the whole flow
                None => assert_eq!(index, boundaries.len() - 1),
            }
        }
    }

    #[test]
    fn negative_elapsed_is_stage_zero() {
        assert_eq!(stage_at(-5, &[10, 25, 40]), at(0, -5));
    }

    #[test]
    fn zero_length_stage_is_skipped() {
        assert_eq!(stage_at(10, &[10, 10, 25]), at(2, 0));
        assert_eq!(stage_at(9, &[10, 10, 25]), at(0, 9));
    }

    #[test]
    fn single_boundary_flow() {
        assert_eq!(stage_at(0, &[5]), at(0, 0));
        assert_eq!(stage_at(4, &[5]), at(0, 4));
        assert_eq!(stage_at(5, &[5]), None);
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let boundaries = [10, 25, 40];
        for elapsed_tick in -10..50 {
            assert_eq!(
                stage_at(elapsed_tick, &boundaries),
                stage_at(elapsed_tick, &boundaries)
            );
        }
    }
}
