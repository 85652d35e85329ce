use crate::bounds::BoundingBox;
use crate::ellipsoid::Ellipsoid;

pub mod quadrature;
pub mod stratified;

/// Smallest number of test points per axis a refinement accepts.
pub const MIN_SAMPLES_PER_AXIS: usize = 2;

/// Trait defining how the covered fraction of a boundary cell is estimated.
/// This allows swapping between regular sampling and elevation quadrature.
pub trait Refinement: Send + Sync {
    /// Fraction in `[0, 1]` of `cell`'s volume enclosed by `ellipsoid`.
    ///
    /// Only called for cells whose corners are partly covered.
    fn fraction(&self, cell: &BoundingBox<3>, ellipsoid: &Ellipsoid) -> f64;
}

/// `n` evenly spaced values from 0 to 1, both ends included.
pub(crate) fn unit_steps(n: usize) -> Vec<f64> {
    let last = (n - 1) as f64;
    (0..n).map(|i| i as f64 / last).collect()
}
