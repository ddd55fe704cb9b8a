//! # Tick Flow
//! Deterministic, tick-indexed scheduling helpers for networked simulations.
//!
//! Every participant in a tick-synchronized session (server and each client)
//! advances the same integer tick counter. The helpers here are pure functions
//! of that counter: given the same tick and the same configuration, every
//! participant computes the identical dispatch decision, with no coordination
//! message beyond the tick itself. Nothing in this crate retains state between
//! evaluations, reads a wall clock, or uses randomness, so re-simulation and
//! rollback re-derive the same outcomes.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod fire;
mod flow;
mod tick_time;
mod timer;
mod types;

pub use fire::{
    fire_entries, fire_from_end, fire_from_start, fire_handlers, fire_on_match,
    try_fire_handlers, FireEntry, FireError,
};
pub use flow::{
    stage_at, staged_flow, staged_flow_by_completion, staged_flow_from_start, try_stage_at,
    try_staged_flow, try_staged_flow_by_completion, try_staged_flow_from_start, FlowError,
    StageAt, StagedFlow,
};
pub use tick_time::{
    elapsed_seconds, has_not_passed, has_not_reached, has_passed, has_reached, is_at,
    remaining_seconds, seconds_to_ticks, tick_after, ticks_to_seconds,
};
pub use timer::{Countdown, ExpiryEdge, TickTimer};
pub use types::Tick;
