use super::{unit_steps, Refinement, MIN_SAMPLES_PER_AXIS};
use crate::bounds::BoundingBox;
use crate::ellipsoid::Ellipsoid;
use crate::error::{Error, Result};

/// Estimates coverage by testing a regular lattice of points in the cell.
///
/// The lattice spans the unit cube with `samples_per_axis` points per axis, faces
/// included, and is built once. For each cell it is mapped onto the cell's box and
/// the fraction is the share of lattice points strictly inside the ellipsoid. The
/// estimate is deterministic and refines as `samples_per_axis` grows.
#[derive(Clone, Debug)]
pub struct StratifiedSampling {
    samples_per_axis: usize,
    lattice: Vec<[f64; 3]>,
}

impl StratifiedSampling {
    pub fn new(samples_per_axis: usize) -> Result<Self> {
        if samples_per_axis < MIN_SAMPLES_PER_AXIS {
            return Err(Error::InvalidSampleDensity { samples: samples_per_axis });
        }

        let steps = unit_steps(samples_per_axis);
        let mut lattice = Vec::with_capacity(samples_per_axis.pow(3));
        for &z in &steps {
            for &y in &steps {
                for &x in &steps {
                    lattice.push([x, y, z]);
                }
            }
        }

        Ok(Self { samples_per_axis, lattice })
    }

    pub fn samples_per_axis(&self) -> usize {
        self.samples_per_axis
    }

    /// Lattice points in unit-cube coordinates.
    pub fn lattice(&self) -> &[[f64; 3]] {
        &self.lattice
    }
}

impl Refinement for StratifiedSampling {
    fn fraction(&self, cell: &BoundingBox<3>, ellipsoid: &Ellipsoid) -> f64 {
        let inside = self
            .lattice
            .iter()
            .filter(|t| ellipsoid.contains(&cell.map_unit(t)))
            .count();
        inside as f64 / self.lattice.len() as f64
    }
}
