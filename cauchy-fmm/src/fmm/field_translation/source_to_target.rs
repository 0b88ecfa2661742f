//! Multipole to local translation between well separated cells.
use crate::fmm::types::{BinomialTable, CauchyFmm, Expansions};
use crate::traits::fmm::SourceToTargetTranslation;
use crate::traits::general::FmmScalar;
use crate::traits::types::FmmError;
use crate::tree::types::LevelGrid;

/// Accumulate the local expansion of one source cell's moments about the
/// centre of one receiving cell.
///
/// The coefficients are the truncated Laurent series of `1 / (t - s)` about
/// the two cell centres, `local[m] += sum_k C(m + k, k) d^-(m + k + 1)
/// moment[k]` with `d` the centre separation, evaluated with running powers
/// of `1 / d`.
fn translate_cell_pair<T: FmmScalar>(
    binomial: &BinomialTable<T>,
    grid: &LevelGrid<T>,
    multipoles: &Expansions<T>,
    locals: &mut Expansions<T>,
    target: usize,
    source: usize,
) {
    let inverse = (grid.cell_center(target) - grid.cell_center(source)).recip();
    let moment = multipoles.expansion(source);
    let local = locals.expansion_mut(target);

    let mut power_m = T::one();
    for (m, coefficient) in local.iter_mut().enumerate() {
        let mut power_k = inverse;
        let mut acc = T::zero();
        for (k, &moment_k) in moment.iter().enumerate() {
            acc += binomial.get(m + k, k) * power_k * moment_k;
            power_k = power_k * inverse;
        }
        *coefficient += acc * power_m;
        power_m = power_m * inverse;
    }
}

impl<T> SourceToTargetTranslation for CauchyFmm<T>
where
    T: FmmScalar,
{
    type Scalar = T;

    fn m2l(
        &mut self,
        grid: &LevelGrid<T>,
        multipoles: &Expansions<T>,
    ) -> Result<Expansions<T>, FmmError> {
        let order = self.expansion_order;
        let q = grid.n_cells();
        let mut locals = Expansions::new(q, order);
        let mut n_pairs = 0u64;

        // Fixed 1D interaction list: every cell receives from the cells two
        // offsets away on either side; three-offset pairs are taken from even
        // cells and mirrored, so that together with the near field each pair
        // of cells is covered at exactly one level of the hierarchy.
        for cell in 0..q - 2 {
            translate_cell_pair(&self.binomial, grid, multipoles, &mut locals, cell + 2, cell);
            translate_cell_pair(&self.binomial, grid, multipoles, &mut locals, cell, cell + 2);
            n_pairs += 2;
        }
        for cell in (0..q - 2).step_by(2) {
            translate_cell_pair(&self.binomial, grid, multipoles, &mut locals, cell + 3, cell);
            translate_cell_pair(&self.binomial, grid, multipoles, &mut locals, cell, cell + 3);
            n_pairs += 2;
        }

        let order = order as u64;
        self.operation_count.adds += n_pairs * 2 * order * order;
        self.operation_count.muls += n_pairs * (3 * order * order + 2 * order);

        Ok(locals)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::fmm::SourceTranslation;
    use crate::tree::types::ReverseIndex;
    use crate::CauchyFmmBuilder;

    /// A cell's local expansion must reproduce the far field of a well
    /// separated source cell to truncation accuracy.
    #[test]
    fn test_m2l_far_field_accuracy() {
        // All sources fall in cell 0 of the level 2 grid over [0, 1], the
        // checked targets in cell 2, two cell widths away.
        let sources = vec![0.0f64, 0.05, 0.1, 0.15, 0.2];
        let targets = vec![0.55f64, 0.58, 0.6, 0.62, 1.0];
        let charges = vec![0.3f64, -0.7, 1.1, 0.5, -0.2];
        let order = 20;

        let mut fmm = CauchyFmmBuilder::new()
            .tree(&sources, &targets)
            .unwrap()
            .parameters(&charges, order)
            .unwrap()
            .build()
            .unwrap();

        let grid = LevelGrid::new(*fmm.domain(), 2);
        let index = ReverseIndex::new(&grid, &sources);
        let multipoles = fmm.p2m(&grid, &index).unwrap();
        let locals = fmm.m2l(&grid, &multipoles).unwrap();

        for &target in targets.iter().take(4) {
            let cell = grid.cell_index(target);
            assert_eq!(cell, 2);

            let shift = grid.cell_center(cell) - target;
            let mut power = 1.0;
            let mut approximated = 0.0;
            for &coefficient in locals.expansion(cell) {
                approximated += coefficient * power;
                power *= shift;
            }

            let exact: f64 = sources
                .iter()
                .zip(charges.iter())
                .map(|(&s, &g)| g / (target - s))
                .sum();

            assert!((approximated - exact).abs() < 1e-9);
        }
    }
}
