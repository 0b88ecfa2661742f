//! FMM traits
use crate::fmm::types::Expansions;
use crate::traits::types::FmmError;
use crate::tree::types::{LevelGrid, ReverseIndex};

/// Interface for source field translations.
pub trait SourceTranslation {
    /// Scalar type over which translations are defined.
    type Scalar;

    /// Particle to multipole translations, applied at the leaf level over all
    /// source cells. Returns the multipole moment arena for the leaf level.
    ///
    /// # Arguments
    /// * `grid` - The leaf level grid.
    /// * `index` - Reverse index of source points over the leaf level grid.
    fn p2m(
        &mut self,
        grid: &LevelGrid<Self::Scalar>,
        index: &ReverseIndex,
    ) -> Result<Expansions<Self::Scalar>, FmmError>;

    /// Multipole to multipole translations, applied during the upward pass.
    /// Re-expands the moments of each pair of sibling cells about the centre
    /// of their parent, producing the moment arena for the parent level.
    ///
    /// # Arguments
    /// * `child_grid` - The grid at the child level from which moments are gathered.
    /// * `child` - Moment arena at the child level.
    fn m2m(
        &mut self,
        child_grid: &LevelGrid<Self::Scalar>,
        child: &Expansions<Self::Scalar>,
    ) -> Result<Expansions<Self::Scalar>, FmmError>;
}

/// Interface for the source to target (multipole to local / M2L) field translations.
pub trait SourceToTargetTranslation {
    /// Scalar type over which translations are defined.
    type Scalar;

    /// Multipole to local translation, defined over each level of the hierarchy.
    /// Converts the moments of every well separated source cell into local
    /// expansion coefficients about the centres of the receiving cells.
    ///
    /// # Arguments
    /// * `grid` - The grid at the level being translated.
    /// * `multipoles` - Moment arena at this level.
    fn m2l(
        &mut self,
        grid: &LevelGrid<Self::Scalar>,
        multipoles: &Expansions<Self::Scalar>,
    ) -> Result<Expansions<Self::Scalar>, FmmError>;
}

/// Interface for target field translations.
pub trait TargetTranslation {
    /// Scalar type over which translations are defined.
    type Scalar;

    /// Local to particle translations, applies the local expansion accumulated
    /// at each cell to the target particles it contains. Defined over each
    /// level of the hierarchy, contributions are additive across levels.
    ///
    /// # Arguments
    /// * `grid` - The grid at the level being evaluated.
    /// * `locals` - Local expansion arena at this level.
    fn l2p(
        &mut self,
        grid: &LevelGrid<Self::Scalar>,
        locals: &Expansions<Self::Scalar>,
    ) -> Result<(), FmmError>;

    /// Near field particle to particle (direct) potential contributions, for
    /// source cells adjacent to, or coincident with, a target cell at the leaf
    /// level, where the truncated expansions do not converge.
    ///
    /// # Arguments
    /// * `grid` - The leaf level grid.
    /// * `source_index` - Reverse index of source points over the leaf grid.
    /// * `target_index` - Reverse index of target points over the leaf grid.
    fn p2p(
        &mut self,
        grid: &LevelGrid<Self::Scalar>,
        source_index: &ReverseIndex,
        target_index: &ReverseIndex,
    ) -> Result<(), FmmError>;
}

/// Interface to evaluate a constructed FMM.
pub trait Evaluate {
    /// Scalar type over which potentials are defined.
    type Scalar;

    /// Evaluate the potentials with the fast algorithm, delegating to the
    /// direct evaluator for point counts below the hierarchy threshold.
    ///
    /// # Arguments
    /// * `timed` - Whether to record per-operator wall times.
    fn evaluate(&mut self, timed: bool) -> Result<(), FmmError>;

    /// Evaluate the potentials with the `O(n^2)` direct summation, always
    /// available as a correctness oracle.
    fn evaluate_direct(&mut self) -> Result<(), FmmError>;
}
