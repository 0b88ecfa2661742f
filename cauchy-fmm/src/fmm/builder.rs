//! Builder objects to construct FMMs
use crate::fmm::helpers::leaf_level;
use crate::fmm::types::{BinomialTable, CauchyFmm, CauchyFmmBuilder, OperationCount};
use crate::traits::general::FmmScalar;
use crate::tree::types::Domain;

impl<T> CauchyFmmBuilder<T>
where
    T: FmmScalar,
{
    /// Initialise an empty FMM builder
    pub fn new() -> Self {
        Self {
            sources: None,
            targets: None,
            charges: None,
            source_domain: None,
            target_domain: None,
            domain: None,
            depth: None,
            expansion_order: None,
        }
    }

    /// Associate the builder with source and target point sets, computing
    /// their bounds and the leaf level of the cell hierarchy.
    ///
    /// Source and target bounds are computed independently, but the hierarchy
    /// is built over their union so that a cell offset between the two point
    /// sets corresponds to a real geometric separation.
    ///
    /// # Arguments
    /// * `sources` - Source coordinates.
    /// * `targets` - Target coordinates, expected in equal number.
    pub fn tree(mut self, sources: &[T], targets: &[T]) -> Result<Self, std::io::Error> {
        if sources.is_empty() || targets.is_empty() {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Must have a positive number of source and target points",
            ))
        } else if sources.len() != targets.len() {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Source and target sets must have matching lengths",
            ))
        } else {
            let source_domain = Domain::from_points(sources);
            let target_domain = Domain::from_points(targets);
            self.domain = Some(source_domain.union(&target_domain));
            self.source_domain = Some(source_domain);
            self.target_domain = Some(target_domain);

            self.depth = Some(leaf_level(sources.len()));
            self.sources = Some(sources.to_vec());
            self.targets = Some(targets.to_vec());
            Ok(self)
        }
    }

    /// For a builder with associated points, specify simulation parameters.
    ///
    /// # Arguments
    /// * `charges` - Charge associated with each source, in equal number.
    /// * `expansion_order` - Number of terms retained per expansion, at least one.
    pub fn parameters(
        mut self,
        charges: &[T],
        expansion_order: usize,
    ) -> Result<Self, std::io::Error> {
        if self.sources.is_none() {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Must build tree before specifying simulation parameters",
            ))
        } else if Some(charges.len()) != self.sources.as_ref().map(|s| s.len()) {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Charges must match the point count",
            ))
        } else if expansion_order < 1 {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Expansion order must be at least one",
            ))
        } else {
            self.charges = Some(charges.to_vec());
            self.expansion_order = Some(expansion_order);
            Ok(self)
        }
    }

    /// Finalise and return the FMM.
    pub fn build(self) -> Result<CauchyFmm<T>, std::io::Error> {
        match (self.sources, self.targets, self.charges, self.expansion_order) {
            (Some(sources), Some(targets), Some(charges), Some(expansion_order)) => {
                let n = sources.len();
                Ok(CauchyFmm {
                    sources,
                    targets,
                    charges,
                    expansion_order,
                    depth: self.depth.unwrap_or_default(),
                    source_domain: self.source_domain.unwrap_or_default(),
                    target_domain: self.target_domain.unwrap_or_default(),
                    domain: self.domain.unwrap_or_default(),
                    binomial: BinomialTable::new(2 * expansion_order),
                    potentials: vec![T::zero(); n],
                    operation_count: OperationCount::default(),
                    operator_times: Vec::new(),
                    timed: false,
                })
            }
            _ => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Must build tree and specify parameters before the FMM is constructed",
            )),
        }
    }
}
