//! Evaluation of the Cauchy FMM.
use crate::fmm::constants::{COARSEST_LEVEL, N_DIRECT_THRESHOLD};
use crate::fmm::helpers::optionally_time;
use crate::fmm::kernel::evaluate_st;
use crate::fmm::types::{CauchyFmm, FmmOperatorTime, FmmOperatorType, OperationCount};
use crate::traits::fmm::{
    Evaluate, SourceToTargetTranslation, SourceTranslation, TargetTranslation,
};
use crate::traits::general::FmmScalar;
use crate::traits::types::FmmError;
use crate::tree::types::{LevelGrid, ReverseIndex};

impl<T> Evaluate for CauchyFmm<T>
where
    T: FmmScalar,
{
    type Scalar = T;

    fn evaluate(&mut self, timed: bool) -> Result<(), FmmError> {
        self.timed = timed;
        self.operation_count = OperationCount::default();
        self.operator_times.clear();

        if self.n() < N_DIRECT_THRESHOLD {
            return self.evaluate_direct();
        }

        self.potentials.iter_mut().for_each(|p| *p = T::zero());

        // Leaf level structures; the reverse indices are needed again by the
        // near field correction after the multipole moments are formed.
        let leaf_grid = LevelGrid::new(self.domain, self.depth);
        let source_index = ReverseIndex::new(&leaf_grid, &self.sources);
        let target_index = ReverseIndex::new(&leaf_grid, &self.targets);

        let (result, duration) = optionally_time(self.timed, || self.p2m(&leaf_grid, &source_index));
        let mut multipoles = result?;
        if let Some(d) = duration {
            self.operator_times
                .push(FmmOperatorTime::from_duration(FmmOperatorType::P2M, d));
        }

        // Downward sweep from the leaf level: moments are carried bottom-up
        // by translation rather than re-accumulated from raw points, while
        // each level's local expansions are built, evaluated and dropped
        // within the level.
        let mut grid = leaf_grid;
        for level in (COARSEST_LEVEL..=self.depth).rev() {
            let (result, duration) = optionally_time(self.timed, || self.m2l(&grid, &multipoles));
            let locals = result?;
            if let Some(d) = duration {
                self.operator_times.push(FmmOperatorTime::from_duration(
                    FmmOperatorType::M2L(level),
                    d,
                ));
            }

            if level == self.depth {
                let (result, duration) =
                    optionally_time(self.timed, || self.p2p(&grid, &source_index, &target_index));
                result?;
                if let Some(d) = duration {
                    self.operator_times
                        .push(FmmOperatorTime::from_duration(FmmOperatorType::P2P, d));
                }
            }

            let (result, duration) = optionally_time(self.timed, || self.l2p(&grid, &locals));
            result?;
            if let Some(d) = duration {
                self.operator_times.push(FmmOperatorTime::from_duration(
                    FmmOperatorType::L2P(level),
                    d,
                ));
            }

            if level > COARSEST_LEVEL {
                let (result, duration) = optionally_time(self.timed, || self.m2m(&grid, &multipoles));
                multipoles = result?;
                if let Some(d) = duration {
                    self.operator_times.push(FmmOperatorTime::from_duration(
                        FmmOperatorType::M2M(level),
                        d,
                    ));
                }
                grid = grid.parent();
            }
        }

        Ok(())
    }

    fn evaluate_direct(&mut self) -> Result<(), FmmError> {
        let CauchyFmm {
            potentials,
            sources,
            targets,
            charges,
            ..
        } = self;

        evaluate_st(sources, charges, targets, potentials);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tree::helpers::points_fixture;
    use crate::CauchyFmmBuilder;
    use approx::assert_relative_eq;

    fn build_fmm(
        sources: &[f64],
        targets: &[f64],
        charges: &[f64],
        expansion_order: usize,
    ) -> CauchyFmm<f64> {
        CauchyFmmBuilder::new()
            .tree(sources, targets)
            .unwrap()
            .parameters(charges, expansion_order)
            .unwrap()
            .build()
            .unwrap()
    }

    fn max_abs_error(fast: &[f64], direct: &[f64]) -> f64 {
        fast.iter()
            .zip(direct.iter())
            .map(|(&a, &b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Error against the direct oracle strictly decreases with expansion order.
    #[test]
    fn test_convergence_with_expansion_order() {
        let n = 512;
        let sources = points_fixture::<f64>(n, None, None, Some(0));
        let targets = points_fixture::<f64>(n, None, None, Some(1));
        let charges = points_fixture::<f64>(n, None, None, Some(2));

        let mut direct = build_fmm(&sources, &targets, &charges, 10);
        direct.evaluate_direct().unwrap();
        let exact = direct.potentials().to_vec();

        let mut errors = Vec::new();
        for expansion_order in [10, 20, 30] {
            let mut fmm = build_fmm(&sources, &targets, &charges, expansion_order);
            fmm.evaluate(false).unwrap();
            errors.push(max_abs_error(fmm.potentials(), &exact));
        }

        assert!(errors[0] > errors[1]);
        assert!(errors[1] > errors[2]);
        assert!(errors[2] < 1e-7);
    }

    /// Convergence is unaffected by shifting and scaling the coordinates, the
    /// grids are normalised to the data.
    #[test]
    fn test_shifted_and_scaled_domains() {
        let n = 300;
        let sources = points_fixture::<f64>(n, Some(5.0), Some(8.0), Some(3));
        let targets = points_fixture::<f64>(n, Some(4.0), Some(9.0), Some(4));
        let charges = points_fixture::<f64>(n, Some(-0.5), Some(0.5), Some(5));

        let mut fmm = build_fmm(&sources, &targets, &charges, 20);
        fmm.evaluate(false).unwrap();
        let fast = fmm.potentials().to_vec();
        fmm.evaluate_direct().unwrap();

        assert!(max_abs_error(&fast, fmm.potentials()) < 1e-6);
    }

    /// Below the hierarchy threshold both entry points share the same code
    /// path, outputs are bit identical.
    #[test]
    fn test_small_n_exactness() {
        for n in 1..4 {
            let sources = points_fixture::<f64>(n, None, None, Some(10));
            let targets = points_fixture::<f64>(n, None, None, Some(11));
            let charges = points_fixture::<f64>(n, None, None, Some(12));

            let mut fmm = build_fmm(&sources, &targets, &charges, 10);
            fmm.evaluate(false).unwrap();
            let fast = fmm.potentials().to_vec();
            fmm.evaluate_direct().unwrap();

            assert_eq!(fast, fmm.potentials());
        }
    }

    #[test]
    fn test_single_point() {
        let mut fmm = build_fmm(&[0.25], &[0.75], &[2.0], 10);
        fmm.evaluate(false).unwrap();
        let fast = fmm.potentials().to_vec();
        fmm.evaluate_direct().unwrap();

        assert_eq!(fast, fmm.potentials());
        assert_relative_eq!(fast[0], 4.0);

        // With no charge there is nothing to sum against.
        fmm.clear(&[0.0]).unwrap();
        fmm.evaluate(false).unwrap();
        assert_eq!(fmm.potentials(), &[0.0]);
    }

    /// Zero charges produce identically zero potentials at any order.
    #[test]
    fn test_zero_charges() {
        let n = 200;
        let sources = points_fixture::<f64>(n, None, None, Some(20));
        let targets = points_fixture::<f64>(n, None, None, Some(21));
        let charges = vec![0.0f64; n];

        for expansion_order in [1, 5, 10] {
            let mut fmm = build_fmm(&sources, &targets, &charges, expansion_order);
            fmm.evaluate(false).unwrap();
            assert!(fmm.potentials().iter().all(|&p| p == 0.0));
        }
    }

    /// Eight point scenario exercising two levels of the hierarchy.
    #[test]
    fn test_eight_points() {
        let sources = vec![
            0.0450129590219045,
            0.14058320819439485,
            0.1523630580433034,
            0.3334969196167895,
            0.7051533278481288,
            0.7657209605120057,
            0.9009994392272345,
            0.9335046628841073,
        ];
        let targets = vec![
            0.06572442852925431,
            0.3853804136623742,
            0.4612045175524898,
            0.6612689052573647,
            0.6922738788833437,
            0.7465256805234415,
            0.8149811433845008,
            0.8530371620489543,
        ];
        let charges = vec![
            0.05297700176067044,
            0.18096566993453178,
            0.23747267040559616,
            0.568132463298329,
            0.6383567455540913,
            0.7756066277976567,
            0.8870273842314716,
            0.9643387582918744,
        ];

        let mut direct = build_fmm(&sources, &targets, &charges, 10);
        direct.evaluate_direct().unwrap();
        let exact = direct.potentials().to_vec();

        let mut fmm = build_fmm(&sources, &targets, &charges, 10);
        fmm.evaluate(false).unwrap();
        assert!(max_abs_error(fmm.potentials(), &exact) < 1e-4);

        let mut fmm = build_fmm(&sources, &targets, &charges, 30);
        fmm.evaluate(false).unwrap();
        assert!(max_abs_error(fmm.potentials(), &exact) < 1e-9);
    }

    /// The fast evaluation performs fewer operations than direct summation
    /// once the point count is large.
    #[test]
    fn test_operation_count() {
        let n = 8192;
        let sources = points_fixture::<f64>(n, None, None, Some(30));
        let targets = points_fixture::<f64>(n, None, None, Some(31));
        let charges = points_fixture::<f64>(n, None, None, Some(32));

        let mut fmm = build_fmm(&sources, &targets, &charges, 10);
        fmm.evaluate(false).unwrap();

        let count = fmm.operation_count();
        assert!(count.adds > 0);
        assert!(count.muls > 0);

        // Direct summation costs one add and one mul per source-target pair.
        let direct_total = 2 * (n as u64) * (n as u64);
        assert!(count.total() < direct_total);
    }

    #[test]
    fn test_operator_times_recorded() {
        let n = 256;
        let sources = points_fixture::<f64>(n, None, None, Some(40));
        let targets = points_fixture::<f64>(n, None, None, Some(41));
        let charges = points_fixture::<f64>(n, None, None, Some(42));

        let mut fmm = build_fmm(&sources, &targets, &charges, 10);
        fmm.evaluate(false).unwrap();
        assert!(fmm.operator_times().is_empty());

        fmm.evaluate(true).unwrap();
        let recorded: Vec<_> = fmm.operator_times().iter().map(|t| t.operator).collect();

        // depth = 8: one P2M and P2P, and M2L/L2P per level 2..=8, M2M per level 3..=8.
        assert!(recorded.contains(&FmmOperatorType::P2M));
        assert!(recorded.contains(&FmmOperatorType::P2P));
        for level in 2..=8u64 {
            assert!(recorded.contains(&FmmOperatorType::M2L(level)));
            assert!(recorded.contains(&FmmOperatorType::L2P(level)));
        }
        for level in 3..=8u64 {
            assert!(recorded.contains(&FmmOperatorType::M2M(level)));
        }
    }

    /// Re-attached charges produce the same result as a fresh construction.
    #[test]
    fn test_clear_and_reattach_charges() {
        let n = 128;
        let sources = points_fixture::<f64>(n, None, None, Some(50));
        let targets = points_fixture::<f64>(n, None, None, Some(51));
        let charges = points_fixture::<f64>(n, None, None, Some(52));
        let new_charges = points_fixture::<f64>(n, None, None, Some(53));

        let mut fmm = build_fmm(&sources, &targets, &charges, 10);
        fmm.evaluate(false).unwrap();

        fmm.clear(&new_charges).unwrap();
        fmm.evaluate(false).unwrap();
        let reattached = fmm.potentials().to_vec();

        let mut fresh = build_fmm(&sources, &targets, &new_charges, 10);
        fresh.evaluate(false).unwrap();

        assert_eq!(reattached, fresh.potentials());

        // Mismatched charge lengths are rejected.
        assert!(fmm.clear(&new_charges[..n - 1]).is_err());
    }
}
