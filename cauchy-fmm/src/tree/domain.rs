//! Constructors for 1D domains.
use itertools::{Itertools, MinMaxResult};
use num::Float;

use crate::tree::types::Domain;

impl<T> Domain<T>
where
    T: Float,
{
    /// Compute the domain defined by a set of points, i.e. the tight interval
    /// `[min, max]` of the coordinates.
    ///
    /// # Arguments
    /// * `points` - A slice of point coordinates.
    pub fn from_points(points: &[T]) -> Domain<T> {
        match points
            .iter()
            .minmax_by(|a, b| a.partial_cmp(b).expect("point coordinates must be comparable"))
        {
            MinMaxResult::NoElements => Domain {
                origin: T::zero(),
                extent: T::zero(),
            },
            MinMaxResult::OneElement(&x) => Domain {
                origin: x,
                extent: T::zero(),
            },
            MinMaxResult::MinMax(&min, &max) => Domain {
                origin: min,
                extent: max - min,
            },
        }
    }

    /// Find the union of two domains such that the returned domain is a
    /// superset of both sets of corresponding points.
    ///
    /// # Arguments
    /// * `other` - Other domain with which to find union
    pub fn union(&self, other: &Self) -> Self {
        let origin = self.origin.min(other.origin);
        let max = (self.origin + self.extent).max(other.origin + other.extent);

        Domain {
            origin,
            extent: max - origin,
        }
    }
}
