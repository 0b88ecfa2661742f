//! Level grids and reverse point indices for the uniform 1D hierarchy.
use num::Float;

use crate::tree::types::{Domain, LevelGrid, ReverseIndex};

impl<T> LevelGrid<T>
where
    T: Float,
{
    /// Construct the grid of `2^level` equal width cells over a domain.
    ///
    /// # Arguments
    /// * `domain` - The domain to partition.
    /// * `level` - Subdivision depth.
    pub fn new(domain: Domain<T>, level: u64) -> Self {
        Self { domain, level }
    }

    /// Number of cells at this level.
    pub fn n_cells(&self) -> usize {
        1usize << self.level
    }

    /// Width of each cell at this level.
    pub fn cell_width(&self) -> T {
        self.domain.extent / T::from(self.n_cells()).unwrap()
    }

    /// Cell containing a coordinate, in `[0, n_cells)`.
    ///
    /// The coordinate is normalised to the domain and the result clamped, so
    /// that points lying exactly on the right domain edge map to the last
    /// cell. A degenerate domain maps every coordinate to cell zero, as the
    /// NaN normalised coordinate fails the integer conversion.
    ///
    /// # Arguments
    /// * `x` - The coordinate, expected to lie within the domain.
    pub fn cell_index(&self, x: T) -> usize {
        let q = self.n_cells();
        let u = (x - self.domain.origin) / self.domain.extent;
        let scaled = (u * T::from(q).unwrap()).floor();
        scaled.to_usize().unwrap_or(0).min(q - 1)
    }

    /// Centre coordinate of a cell.
    ///
    /// # Arguments
    /// * `cell` - The cell index.
    pub fn cell_center(&self, cell: usize) -> T {
        let half = T::from(0.5).unwrap();
        self.domain.origin + (T::from(cell).unwrap() + half) * self.cell_width()
    }

    /// The grid one level coarser, halving the cell count. Cell `i` at this
    /// level is contained in cell `i / 2` of the parent grid.
    pub fn parent(&self) -> Self {
        Self {
            domain: self.domain,
            level: self.level - 1,
        }
    }
}

impl ReverseIndex {
    /// Group point indices by cell with a two-pass counting sort: the first
    /// pass counts per-cell populations, the second fills exactly sized index
    /// lists preserving encounter order.
    ///
    /// # Arguments
    /// * `grid` - The grid assigning points to cells.
    /// * `points` - The point coordinates.
    pub fn new<T: Float>(grid: &LevelGrid<T>, points: &[T]) -> Self {
        let q = grid.n_cells();

        let mut offsets = vec![0usize; q + 1];
        for &x in points.iter() {
            offsets[grid.cell_index(x) + 1] += 1;
        }
        for cell in 0..q {
            offsets[cell + 1] += offsets[cell];
        }

        let mut cursor = offsets[..q].to_vec();
        let mut indices = vec![0usize; points.len()];
        for (i, &x) in points.iter().enumerate() {
            let cell = grid.cell_index(x);
            indices[cursor[cell]] = i;
            cursor[cell] += 1;
        }

        Self { offsets, indices }
    }

    /// Number of cells indexed.
    pub fn n_cells(&self) -> usize {
        self.offsets.len() - 1
    }

    /// The point indices assigned to a cell, in encounter order.
    ///
    /// # Arguments
    /// * `cell` - The cell index.
    pub fn points_in(&self, cell: usize) -> &[usize] {
        &self.indices[self.offsets[cell]..self.offsets[cell + 1]]
    }
}
