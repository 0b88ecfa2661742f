//! The Cauchy kernel and its direct evaluation.
use num::Float;
use rayon::iter::{
    IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator,
    ParallelIterator,
};

use crate::traits::general::FmmScalar;

/// The Cauchy kernel `1 / (t - s)`.
///
/// Singular at `t == s`; coincident source and target coordinates are a
/// caller precondition violation and produce an infinite or NaN component.
#[inline(always)]
pub fn cauchy_kernel<T: Float>(target: T, source: T) -> T {
    (target - source).recip()
}

/// Direct kernel summation of all sources against all targets, writing
/// `result[i] = sum_j charges[j] * K(targets[i], sources[j])`.
///
/// Data parallel over targets; the per-target summation order is fixed, so
/// the output is deterministic.
///
/// # Arguments
/// * `sources` - Source coordinates.
/// * `charges` - Charge associated with each source.
/// * `targets` - Target coordinates.
/// * `result` - Output potentials, one per target, overwritten.
pub fn evaluate_st<T: FmmScalar>(sources: &[T], charges: &[T], targets: &[T], result: &mut [T]) {
    result
        .par_iter_mut()
        .zip(targets.par_iter())
        .for_each(|(potential, &target)| {
            let mut acc = T::zero();
            for (&source, &charge) in sources.iter().zip(charges.iter()) {
                acc += charge * cauchy_kernel(target, source);
            }
            *potential = acc;
        });
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cauchy_kernel() {
        assert_relative_eq!(cauchy_kernel(1.0f64, 0.5), 2.0);
        assert_relative_eq!(cauchy_kernel(0.25f64, 0.75), -2.0);
    }

    #[test]
    fn test_evaluate_st() {
        let sources = vec![0.0f64, 1.0];
        let charges = vec![1.0f64, 2.0];
        let targets = vec![2.0f64, -1.0];
        let mut result = vec![0.0f64; 2];
        evaluate_st(&sources, &charges, &targets, &mut result);

        // 1/(2-0) + 2/(2-1) and 1/(-1-0) + 2/(-1-1)
        assert_relative_eq!(result[0], 2.5);
        assert_relative_eq!(result[1], -2.0);
    }
}
