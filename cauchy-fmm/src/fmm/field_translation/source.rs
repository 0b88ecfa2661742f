//! Multipole expansions of source cells and their upward translation.
use crate::fmm::types::{CauchyFmm, Expansions};
use crate::traits::fmm::SourceTranslation;
use crate::traits::general::FmmScalar;
use crate::traits::types::FmmError;
use crate::tree::types::{LevelGrid, ReverseIndex};

impl<T> SourceTranslation for CauchyFmm<T>
where
    T: FmmScalar,
{
    type Scalar = T;

    fn p2m(
        &mut self,
        grid: &LevelGrid<T>,
        index: &ReverseIndex,
    ) -> Result<Expansions<T>, FmmError> {
        let order = self.expansion_order;
        let mut moments = Expansions::new(grid.n_cells(), order);

        for cell in 0..grid.n_cells() {
            let center = grid.cell_center(cell);
            let moment = moments.expansion_mut(cell);
            for &i in index.points_in(cell) {
                // moment[k] += g_i * (s_i - center)^k, by running powers.
                let shift = self.sources[i] - center;
                let mut power = self.charges[i];
                for coefficient in moment.iter_mut() {
                    *coefficient += power;
                    power = power * shift;
                }
            }
        }

        let n = self.sources.len() as u64;
        let order = order as u64;
        self.operation_count.adds += n * (order + 1);
        self.operation_count.muls += n * order;

        Ok(moments)
    }

    fn m2m(
        &mut self,
        child_grid: &LevelGrid<T>,
        child: &Expansions<T>,
    ) -> Result<Expansions<T>, FmmError> {
        let order = self.expansion_order;
        let parent_grid = child_grid.parent();
        let mut parent = Expansions::new(parent_grid.n_cells(), order);

        // Sibling centre offsets from the parent centre are the same for
        // every cell of a uniform level, so their power caches are built once.
        let left_shift = child_grid.cell_center(0) - parent_grid.cell_center(0);
        let right_shift = child_grid.cell_center(1) - parent_grid.cell_center(0);
        let mut left_powers = vec![T::one(); order];
        let mut right_powers = vec![T::one(); order];
        for k in 1..order {
            left_powers[k] = left_powers[k - 1] * left_shift;
            right_powers[k] = right_powers[k - 1] * right_shift;
        }

        for cell in 0..parent_grid.n_cells() {
            let left = child.expansion(2 * cell);
            let right = child.expansion(2 * cell + 1);
            let moment = parent.expansion_mut(cell);
            for (k, coefficient) in moment.iter_mut().enumerate() {
                let mut acc = T::zero();
                for m in 0..=k {
                    acc += self.binomial.get(k, m)
                        * (left_powers[k - m] * left[m] + right_powers[k - m] * right[m]);
                }
                *coefficient = acc;
            }
        }

        let terms = (parent_grid.n_cells() * order * (order + 1) / 2) as u64;
        self.operation_count.adds += 2 * terms;
        self.operation_count.muls += 3 * terms;

        Ok(parent)
    }
}
