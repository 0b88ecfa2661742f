//! Data structures for the uniform 1D cell hierarchy.

/// A 1D interval containing a set of points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Domain<T> {
    /// Left edge of the interval.
    pub origin: T,

    /// Width of the interval.
    pub extent: T,
}

/// A single level of the uniform binary hierarchy over a domain, partitioning
/// it into `2^level` equal width, non-overlapping, exhaustive cells.
#[derive(Debug, Clone, Copy)]
pub struct LevelGrid<T> {
    /// Domain partitioned by this grid.
    pub domain: Domain<T>,

    /// Subdivision depth, `level >= 2`.
    pub level: u64,
}

/// Reverse map from cell index to the point indices it contains, stored flat in
/// CSR form. Built with a two-pass counting sort, preserving encounter order
/// within each cell.
#[derive(Debug, Clone)]
pub struct ReverseIndex {
    /// Start offset of each cell's index list, length `n_cells + 1`.
    pub offsets: Vec<usize>,

    /// Point indices grouped by cell, length `n`.
    pub indices: Vec<usize>,
}
