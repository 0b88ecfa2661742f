//! Helper Functions
use std::time::{Duration, Instant};

/// Time a closure, if timing is enabled.
///
/// # Arguments
/// * `timed` - Whether timing is enabled.
/// * `f` - The closure to run.
pub fn optionally_time<F, R>(timed: bool, f: F) -> (R, Option<Duration>)
where
    F: FnOnce() -> R,
{
    if timed {
        let start = Instant::now();
        let result = f();
        (result, Some(start.elapsed()))
    } else {
        (f(), None)
    }
}

/// Leaf level of the hierarchy for a given point count, `floor(log2 n)`.
///
/// # Arguments
/// * `n` - The point count, must be positive.
pub fn leaf_level(n: usize) -> u64 {
    n.ilog2() as u64
}
