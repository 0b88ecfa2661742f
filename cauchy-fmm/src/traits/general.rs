//! General trait definitions.
use std::ops::AddAssign;

use num::Float;

/// Scalar types over which the FMM is defined.
///
/// `Send + Sync` is required as the direct and local evaluation loops are
/// data parallel over target points.
pub trait FmmScalar: Float + AddAssign + Default + Send + Sync {}

impl<T> FmmScalar for T where T: Float + AddAssign + Default + Send + Sync {}
