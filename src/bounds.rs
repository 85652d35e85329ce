/// Generic axis-aligned bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing all `points`, or `None` for an empty iterator.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = [f64; D]>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::new(first, first);
        for p in points {
            for k in 0..D {
                bounds.min[k] = bounds.min[k].min(p[k]);
                bounds.max[k] = bounds.max[k].max(p[k]);
            }
        }
        Some(bounds)
    }

    /// Edge length along each axis.
    pub fn extent(&self) -> [f64; D] {
        let mut extent = [0.0; D];
        for k in 0..D {
            extent[k] = self.max[k] - self.min[k];
        }
        extent
    }

    /// Product of the edge lengths.
    pub fn volume(&self) -> f64 {
        self.extent().iter().product()
    }

    /// Half-open membership: `min <= p < max` on every axis.
    pub fn contains_half_open(&self, point: &[f64; D]) -> bool {
        (0..D).all(|k| point[k] >= self.min[k] && point[k] < self.max[k])
    }

    /// Membership with a per-axis choice of closing the upper bound.
    ///
    /// `closed_upper[k]` turns the test on axis `k` into `min <= p <= max`.
    pub fn contains_with(&self, point: &[f64; D], closed_upper: [bool; D]) -> bool {
        (0..D).all(|k| {
            point[k] >= self.min[k]
                && (point[k] < self.max[k] || (closed_upper[k] && point[k] == self.max[k]))
        })
    }

    /// Maps a point of the unit cube `[0, 1]^D` linearly onto this box.
    pub fn map_unit(&self, t: &[f64; D]) -> [f64; D] {
        let mut p = [0.0; D];
        for k in 0..D {
            p[k] = t[k] * (self.max[k] - self.min[k]) + self.min[k];
        }
        p
    }
}
