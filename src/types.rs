/// A simulation tick counter value, or a signed delta between two of them.
///
/// Ticks are owned by the simulation runtime and advance monotonically, once
/// per simulation step. Deltas (current minus a reference tick) are negative
/// before the reference tick has been reached, which is why this is signed.
pub type Tick = i64;
