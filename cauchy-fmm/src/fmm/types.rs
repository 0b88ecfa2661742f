//! Data structures for the Cauchy FMM.
use std::fmt;
use std::time::Duration;

use num::Float;

use crate::traits::general::FmmScalar;
use crate::tree::types::Domain;

/// Precomputed Pascal's triangle of binomial coefficients, stored as a flat
/// square table. Read only after construction, consumed by all translation
/// operators.
#[derive(Debug, Clone)]
pub struct BinomialTable<T> {
    /// Table entries in row major order, `order * order` of them.
    data: Vec<T>,

    /// Row and column count.
    order: usize,
}

impl<T> BinomialTable<T>
where
    T: Float,
{
    /// Build the table via Pascal's recurrence in `O(order^2)`. Entries above
    /// the diagonal are never read and are left zero.
    ///
    /// # Arguments
    /// * `order` - Row and column count of the table.
    pub fn new(order: usize) -> Self {
        let mut data = vec![T::zero(); order * order];
        for r in 0..order {
            data[r * order] = T::one();
            for c in 1..=r {
                data[r * order + c] =
                    data[(r - 1) * order + (c - 1)] + data[(r - 1) * order + c];
            }
        }
        Self { data, order }
    }

    /// The binomial coefficient `C(r, c)` for `c <= r < order`.
    #[inline(always)]
    pub fn get(&self, r: usize, c: usize) -> T {
        self.data[r * self.order + c]
    }

    /// Row and column count of the table.
    pub fn order(&self) -> usize {
        self.order
    }
}

/// A flat arena of expansion coefficients, one vector of `order` coefficients
/// per cell, zero initialised. Used for both multipole moments and local
/// expansions; cell `i`'s coefficients occupy `[i * order, (i + 1) * order)`.
#[derive(Debug, Clone)]
pub struct Expansions<T> {
    data: Vec<T>,
    order: usize,
}

impl<T> Expansions<T>
where
    T: Float,
{
    /// Allocate a zeroed arena for `n_cells` cells.
    ///
    /// # Arguments
    /// * `n_cells` - Number of cells at the level the arena serves.
    /// * `order` - Expansion order, coefficients per cell.
    pub fn new(n_cells: usize, order: usize) -> Self {
        Self {
            data: vec![T::zero(); n_cells * order],
            order,
        }
    }

    /// Number of cells in the arena.
    pub fn n_cells(&self) -> usize {
        self.data.len() / self.order
    }

    /// Expansion order, coefficients per cell.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The coefficients of a cell.
    ///
    /// # Arguments
    /// * `cell` - The cell index.
    #[inline]
    pub fn expansion(&self, cell: usize) -> &[T] {
        &self.data[cell * self.order..(cell + 1) * self.order]
    }

    /// The coefficients of a cell, mutably.
    ///
    /// # Arguments
    /// * `cell` - The cell index.
    #[inline]
    pub fn expansion_mut(&mut self, cell: usize) -> &mut [T] {
        &mut self.data[cell * self.order..(cell + 1) * self.order]
    }
}

/// Floating point operations accumulated over one evaluation, informational
/// only. Counts follow a bulk per-operator model rather than tracking each
/// instruction, divisions count as multiplications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationCount {
    /// Additions.
    pub adds: u64,

    /// Multiplications.
    pub muls: u64,
}

impl OperationCount {
    /// Total operations.
    pub fn total(&self) -> u64 {
        self.adds + self.muls
    }
}

/// Operators applied during an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmmOperatorType {
    /// Particle to multipole
    P2M,

    /// Multipole to multipole, with child level
    M2M(u64),

    /// Multipole to local, with level
    M2L(u64),

    /// Local to particle, with level
    L2P(u64),

    /// Particle to particle
    P2P,
}

impl fmt::Display for FmmOperatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FmmOperatorType::P2M => write!(f, "P2M"),
            FmmOperatorType::M2M(level) => write!(f, "M2M({})", level),
            FmmOperatorType::M2L(level) => write!(f, "M2L({})", level),
            FmmOperatorType::L2P(level) => write!(f, "L2P({})", level),
            FmmOperatorType::P2P => write!(f, "P2P"),
        }
    }
}

/// Wall time attributed to a single operator application.
#[derive(Debug, Clone, Copy)]
pub struct FmmOperatorTime {
    /// The operator being timed.
    pub operator: FmmOperatorType,

    /// Elapsed wall time.
    pub time: Duration,
}

impl FmmOperatorTime {
    /// Record a duration against an operator.
    ///
    /// # Arguments
    /// * `operator` - The operator being timed.
    /// * `time` - Elapsed wall time.
    pub fn from_duration(operator: FmmOperatorType, time: Duration) -> Self {
        Self { operator, time }
    }
}

/// A Cauchy kernel matrix-vector product, evaluated approximately with the
/// fast multipole method, or exactly with direct summation.
///
/// Owns its copies of the point and charge data; constructed through
/// [`CauchyFmmBuilder`](crate::CauchyFmmBuilder).
#[derive(Debug)]
pub struct CauchyFmm<T> {
    /// Source coordinates.
    pub(crate) sources: Vec<T>,

    /// Target coordinates.
    pub(crate) targets: Vec<T>,

    /// Charge associated with each source.
    pub(crate) charges: Vec<T>,

    /// Expansion order, number of terms retained per expansion.
    pub(crate) expansion_order: usize,

    /// Leaf level of the hierarchy, `floor(log2 n)`.
    pub(crate) depth: u64,

    /// Bounds of the source coordinates.
    pub(crate) source_domain: Domain<T>,

    /// Bounds of the target coordinates.
    pub(crate) target_domain: Domain<T>,

    /// Union of the source and target domains, over which all grids are built
    /// so that cell offsets between the two point sets agree geometrically.
    pub(crate) domain: Domain<T>,

    /// Binomial coefficient table of order `2 * expansion_order`.
    pub(crate) binomial: BinomialTable<T>,

    /// Output potentials, one per target.
    pub(crate) potentials: Vec<T>,

    /// Operation counters for the last evaluation.
    pub(crate) operation_count: OperationCount,

    /// Per-operator wall times for the last timed evaluation.
    pub(crate) operator_times: Vec<FmmOperatorTime>,

    /// Whether the current evaluation records operator times.
    pub(crate) timed: bool,
}

impl<T> CauchyFmm<T>
where
    T: FmmScalar,
{
    /// The point count shared by sources, targets and charges.
    pub fn n(&self) -> usize {
        self.sources.len()
    }

    /// Expansion order, number of terms retained per expansion.
    pub fn expansion_order(&self) -> usize {
        self.expansion_order
    }

    /// Leaf level of the hierarchy.
    pub fn depth(&self) -> u64 {
        self.depth
    }

    /// The shared domain over which the cell hierarchy is built.
    pub fn domain(&self) -> &Domain<T> {
        &self.domain
    }

    /// Bounds of the source coordinates.
    pub fn source_domain(&self) -> &Domain<T> {
        &self.source_domain
    }

    /// Bounds of the target coordinates.
    pub fn target_domain(&self) -> &Domain<T> {
        &self.target_domain
    }

    /// Potentials computed by the last evaluation, one per target.
    pub fn potentials(&self) -> &[T] {
        &self.potentials
    }

    /// Operation counters accumulated by the last evaluation.
    pub fn operation_count(&self) -> OperationCount {
        self.operation_count
    }

    /// Per-operator wall times recorded by the last timed evaluation.
    pub fn operator_times(&self) -> &[FmmOperatorTime] {
        &self.operator_times
    }

    /// Clear the result and instrumentation state and attach new charge data
    /// for re-evaluation over the same points.
    ///
    /// # Arguments
    /// * `charges` - New charge data, of matching length.
    pub fn clear(&mut self, charges: &[T]) -> Result<(), std::io::Error> {
        if charges.len() != self.n() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Charges must match the point count",
            ));
        }

        self.charges = charges.to_vec();
        self.potentials.iter_mut().for_each(|p| *p = T::zero());
        self.operation_count = OperationCount::default();
        self.operator_times.clear();
        Ok(())
    }
}

/// Builder for a [`CauchyFmm`], staged as tree construction followed by
/// simulation parameters.
#[derive(Debug, Default)]
pub struct CauchyFmmBuilder<T> {
    pub(crate) sources: Option<Vec<T>>,
    pub(crate) targets: Option<Vec<T>>,
    pub(crate) charges: Option<Vec<T>>,
    pub(crate) source_domain: Option<Domain<T>>,
    pub(crate) target_domain: Option<Domain<T>>,
    pub(crate) domain: Option<Domain<T>>,
    pub(crate) depth: Option<u64>,
    pub(crate) expansion_order: Option<usize>,
}
