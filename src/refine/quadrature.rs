use super::{unit_steps, Refinement, MIN_SAMPLES_PER_AXIS};
use crate::bounds::BoundingBox;
use crate::ellipsoid::Ellipsoid;
use crate::error::{Error, Result};

/// Estimates coverage by integrating the ellipsoid's elevation over the cell footprint.
///
/// In the non-negative octant the enclosed volume of a box `[x0,x1]×[y0,y1]×[z0,z1]` is
/// the integral over the footprint of `clamp(z(x, y), z0, z1) - z0`, where
/// `z(x, y) = c·sqrt(1 - (x/a)² - (y/b)²)`. The integral uses the composite trapezoidal
/// rule on a `samples_per_axis × samples_per_axis` lattice.
///
/// The ellipsoid is symmetric about every coordinate plane, so any other cell is folded
/// into the non-negative octant: an interval below zero is reflected and an interval
/// straddling zero is split into its two reflected halves.
#[derive(Clone, Debug)]
pub struct Quadrature {
    samples_per_axis: usize,
    // Trapezoidal weights on the unit interval, summing to 1.
    weights: Vec<f64>,
    steps: Vec<f64>,
}

impl Quadrature {
    pub fn new(samples_per_axis: usize) -> Result<Self> {
        if samples_per_axis < MIN_SAMPLES_PER_AXIS {
            return Err(Error::InvalidSampleDensity { samples: samples_per_axis });
        }

        let h = 1.0 / (samples_per_axis - 1) as f64;
        let weights = (0..samples_per_axis)
            .map(|i| if i == 0 || i == samples_per_axis - 1 { 0.5 * h } else { h })
            .collect();

        Ok(Self {
            samples_per_axis,
            weights,
            steps: unit_steps(samples_per_axis),
        })
    }

    pub fn samples_per_axis(&self) -> usize {
        self.samples_per_axis
    }

    /// Volume of the ellipsoid inside a box lying in the non-negative octant.
    fn octant_volume(&self, cell: &BoundingBox<3>, ellipsoid: &Ellipsoid) -> f64 {
        let [dx, dy, dz] = cell.extent();
        if dx <= 0.0 || dy <= 0.0 || dz <= 0.0 {
            return 0.0;
        }
        let (z0, z1) = (cell.min[2], cell.max[2]);

        let mut sum = 0.0;
        for (&tx, &wx) in self.steps.iter().zip(&self.weights) {
            let x = cell.min[0] + tx * dx;
            for (&ty, &wy) in self.steps.iter().zip(&self.weights) {
                let y = cell.min[1] + ty * dy;
                let height = ellipsoid.elevation(x, y).clamp(z0, z1) - z0;
                sum += wx * wy * height;
            }
        }
        sum * dx * dy
    }
}

impl Refinement for Quadrature {
    fn fraction(&self, cell: &BoundingBox<3>, ellipsoid: &Ellipsoid) -> f64 {
        let volume = cell.volume();
        if volume <= 0.0 {
            return 0.0;
        }

        let [xs, ys, zs] = [0, 1, 2].map(|k| fold(cell.min[k], cell.max[k]));
        let mut enclosed = 0.0;
        for &(x0, x1) in xs.iter().flatten() {
            for &(y0, y1) in ys.iter().flatten() {
                for &(z0, z1) in zs.iter().flatten() {
                    let piece = BoundingBox::new([x0, y0, z0], [x1, y1, z1]);
                    enclosed += self.octant_volume(&piece, ellipsoid);
                }
            }
        }

        (enclosed / volume).clamp(0.0, 1.0)
    }
}

/// Reflects an interval into `[0, ∞)`, splitting it at zero when it straddles it.
fn fold(min: f64, max: f64) -> [Option<(f64, f64)>; 2] {
    if min >= 0.0 {
        [Some((min, max)), None]
    } else if max <= 0.0 {
        [Some((-max, -min)), None]
    } else {
        [Some((0.0, -min)), Some((0.0, max))]
    }
}
