//! Local expansion evaluation and near field correction at target points.
use rayon::iter::{
    IndexedParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator,
    ParallelIterator,
};

use crate::fmm::kernel::cauchy_kernel;
use crate::fmm::types::{CauchyFmm, Expansions};
use crate::traits::fmm::TargetTranslation;
use crate::traits::general::FmmScalar;
use crate::traits::types::FmmError;
use crate::tree::types::{LevelGrid, ReverseIndex};

impl<T> CauchyFmm<T>
where
    T: FmmScalar,
{
    /// Exact kernel sums of one source cell's points against one target
    /// cell's points, accumulated into the potentials.
    fn near_field(&mut self, source_points: &[usize], target_points: &[usize]) {
        let pairs = (source_points.len() * target_points.len()) as u64;
        self.operation_count.adds += 2 * pairs;
        self.operation_count.muls += 2 * pairs;

        for &i in target_points {
            let target = self.targets[i];
            let mut acc = T::zero();
            for &j in source_points {
                acc += self.charges[j] * cauchy_kernel(target, self.sources[j]);
            }
            self.potentials[i] += acc;
        }
    }
}

impl<T> TargetTranslation for CauchyFmm<T>
where
    T: FmmScalar,
{
    type Scalar = T;

    fn l2p(&mut self, grid: &LevelGrid<T>, locals: &Expansions<T>) -> Result<(), FmmError> {
        let n = self.targets.len() as u64;
        let order = self.expansion_order as u64;
        self.operation_count.adds += n * (order + 1);
        self.operation_count.muls += n * (2 * order + 2);

        let CauchyFmm {
            potentials,
            targets,
            ..
        } = self;

        // Per-target work is independent and each target's summation order is
        // fixed, so the parallel evaluation is deterministic.
        potentials
            .par_iter_mut()
            .zip(targets.par_iter())
            .for_each(|(potential, &target)| {
                let cell = grid.cell_index(target);
                let shift = grid.cell_center(cell) - target;
                let mut power = T::one();
                let mut acc = T::zero();
                for &coefficient in locals.expansion(cell) {
                    acc += coefficient * power;
                    power = power * shift;
                }
                *potential += acc;
            });

        Ok(())
    }

    fn p2p(
        &mut self,
        grid: &LevelGrid<T>,
        source_index: &ReverseIndex,
        target_index: &ReverseIndex,
    ) -> Result<(), FmmError> {
        let q = grid.n_cells();

        for cell in 0..q {
            self.near_field(source_index.points_in(cell), target_index.points_in(cell));
        }
        for cell in 0..q - 1 {
            self.near_field(source_index.points_in(cell + 1), target_index.points_in(cell));
            self.near_field(source_index.points_in(cell), target_index.points_in(cell + 1));
        }

        Ok(())
    }
}
