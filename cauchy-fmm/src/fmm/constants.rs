//! Crate wide constants

/// Point count below which evaluation falls back to direct summation, the
/// hierarchy needs at least `2^2` leaf cells to be meaningful.
pub(crate) const N_DIRECT_THRESHOLD: usize = 4;

/// Coarsest level of the hierarchy visited by the fast algorithm. At this
/// level the four cells are all within near-field or interaction-list range
/// of one another, so no coarser level carries any remaining interaction.
pub(crate) const COARSEST_LEVEL: u64 = 2;
