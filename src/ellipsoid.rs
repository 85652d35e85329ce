use crate::error::{Error, Result, AXES};
use std::f64::consts::PI;

/// Tolerance of the on-surface test on the normalised quadratic form.
pub const SURFACE_TOLERANCE: f64 = 1e-10;

/// An axis-aligned ellipsoid centred at the coordinate origin.
///
/// The grid and the ellipsoid share one Cartesian frame; the centre is fixed at the
/// origin of that frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    radii: [f64; 3],
}

impl Ellipsoid {
    /// Creates an ellipsoid from its x, y and z radii, all of which must be positive.
    pub fn new(radii: [f64; 3]) -> Result<Self> {
        for (k, &radius) in radii.iter().enumerate() {
            if !(radius > 0.0 && radius.is_finite()) {
                return Err(Error::DegenerateEllipsoid { axis: AXES[k], radius });
            }
        }
        Ok(Self { radii })
    }

    /// Derives the radii of an organ model from its volume, thickness and ellipticity.
    ///
    /// The z radius is half the thickness, the y radius is `ellipticity` times the x
    /// radius, and the x radius follows from `volume = 4/3 π x y z`.
    pub fn from_volume(volume: f64, thickness: f64, ellipticity: f64) -> Result<Self> {
        let z = thickness / 2.0;
        let x = (volume * 3.0 / (4.0 * PI * ellipticity * z)).sqrt();
        let y = ellipticity * x;
        Self::new([x, y, z])
    }

    pub fn radii(&self) -> [f64; 3] {
        self.radii
    }

    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radii[0] * self.radii[1] * self.radii[2]
    }

    /// `(x/a)² + (y/b)² + (z/c)²`, which is 1 on the surface.
    #[inline]
    pub fn level(&self, p: &[f64; 3]) -> f64 {
        let [a, b, c] = self.radii;
        (p[0] / a).powi(2) + (p[1] / b).powi(2) + (p[2] / c).powi(2)
    }

    /// Strictly inside.
    #[inline]
    pub fn contains(&self, p: &[f64; 3]) -> bool {
        self.level(p) < 1.0
    }

    /// On the surface, within [`SURFACE_TOLERANCE`].
    #[inline]
    pub fn on_surface(&self, p: &[f64; 3]) -> bool {
        (self.level(p) - 1.0).abs() < SURFACE_TOLERANCE
    }

    /// Inside or on the surface; used to classify cell corners.
    #[inline]
    pub fn covers(&self, p: &[f64; 3]) -> bool {
        self.contains(p) || self.on_surface(p)
    }

    /// Height of the upper half surface above `(x, y)`, zero outside the footprint.
    #[inline]
    pub fn elevation(&self, x: f64, y: f64) -> f64 {
        let [a, b, c] = self.radii;
        let s = 1.0 - (x / a).powi(2) - (y / b).powi(2);
        if s > 0.0 { c * s.sqrt() } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_radii() {
        assert_eq!(
            Ellipsoid::new([1.0, 0.0, 1.0]),
            Err(Error::DegenerateEllipsoid { axis: 'y', radius: 0.0 })
        );
        assert!(Ellipsoid::new([-1.0, 1.0, 1.0]).is_err());
        assert!(Ellipsoid::new([1.0, 1.0, f64::NAN]).is_err());
        assert!(Ellipsoid::new([1.0, 1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_from_volume() {
        let e = Ellipsoid::from_volume(428.0, 2.25, 1.0).unwrap();
        let [x, y, z] = e.radii();
        assert!((z - 1.125).abs() < 1e-12);
        assert!((x - y).abs() < 1e-12);
        assert!((e.volume() - 428.0).abs() < 1e-9);

        let e = Ellipsoid::from_volume(100.0, 2.0, 1.5).unwrap();
        let [x, y, _] = e.radii();
        assert!((y - 1.5 * x).abs() < 1e-12);
        assert!((e.volume() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_volume_rejects_bad_input() {
        assert!(matches!(
            Ellipsoid::from_volume(100.0, -2.0, 1.0),
            Err(Error::DegenerateEllipsoid { .. })
        ));
        assert!(Ellipsoid::from_volume(0.0, 2.0, 1.0).is_err());
        assert!(Ellipsoid::from_volume(-5.0, 2.0, 1.0).is_err());
    }

    #[test]
    fn test_predicates() {
        let e = Ellipsoid::new([2.0, 1.0, 0.5]).unwrap();
        assert!(e.contains(&[0.0, 0.0, 0.0]));
        assert!(e.contains(&[1.9, 0.0, 0.0]));
        assert!(!e.contains(&[2.0, 0.0, 0.0]));
        assert!(e.on_surface(&[2.0, 0.0, 0.0]));
        assert!(e.on_surface(&[0.0, 0.0, -0.5]));
        assert!(e.covers(&[0.0, 1.0, 0.0]));
        assert!(!e.covers(&[0.0, 1.0, 0.1]));
    }

    #[test]
    fn test_elevation() {
        let e = Ellipsoid::new([2.0, 1.0, 0.5]).unwrap();
        assert_eq!(e.elevation(0.0, 0.0), 0.5);
        assert_eq!(e.elevation(2.0, 0.0), 0.0);
        assert_eq!(e.elevation(3.0, 3.0), 0.0);
        assert!((e.elevation(1.0, 0.0) - 0.5 * 0.75f64.sqrt()).abs() < 1e-12);
    }
}
