use crate::ellipsoid::Ellipsoid;
use crate::error::Result;
use crate::grid::{SamplingGrid, CELL_CORNERS};
use crate::refine::quadrature::Quadrature;
use crate::refine::stratified::StratifiedSampling;
use crate::refine::Refinement;
use rayon::prelude::*;
use tracing::debug;

/// Refinement used for cells on the ellipsoid boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoverageMethod {
    /// Regular lattice sampling, see [`StratifiedSampling`].
    #[default]
    Summing,
    /// Elevation quadrature, see [`Quadrature`].
    Quadrature,
}

/// Parameters of the coverage pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageConfig {
    /// Test points per axis used by the boundary refinement, at least 2.
    pub samples_per_axis: usize,
    pub method: CoverageMethod,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            samples_per_axis: 10,
            method: CoverageMethod::Summing,
        }
    }
}

impl CoverageConfig {
    pub fn with_samples_per_axis(mut self, samples_per_axis: usize) -> Self {
        self.samples_per_axis = samples_per_axis;
        self
    }

    pub fn with_method(mut self, method: CoverageMethod) -> Self {
        self.method = method;
        self
    }
}

/// How the corners of a cell relate to the ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CornerCoverage {
    /// All 8 corners inside or on the surface.
    Inside,
    /// No corner inside or on the surface.
    Outside,
    /// Between 1 and 7 corners covered.
    Boundary(u8),
}

/// Classifies every cell of `grid` by its covered corners.
pub fn classify_corners(grid: &SamplingGrid, ellipsoid: &Ellipsoid) -> Vec<CornerCoverage> {
    grid.cells()
        .par_iter()
        .map(|corners| {
            let covered = corners
                .iter()
                .filter(|&&n| ellipsoid.covers(&grid.nodes()[n]))
                .count();
            match covered {
                0 => CornerCoverage::Outside,
                CELL_CORNERS => CornerCoverage::Inside,
                n => CornerCoverage::Boundary(n as u8),
            }
        })
        .collect()
}

/// Fraction of every cell's volume enclosed by `ellipsoid`, indexed by cell.
///
/// Cells with all corners covered count as fully enclosed and cells with none as empty;
/// the remaining boundary cells are refined with the configured method.
pub fn volume_fractions(
    grid: &SamplingGrid,
    ellipsoid: &Ellipsoid,
    config: &CoverageConfig,
) -> Result<Vec<f64>> {
    let fractions = match config.method {
        CoverageMethod::Summing => {
            let refinement = StratifiedSampling::new(config.samples_per_axis)?;
            volume_fractions_with(grid, ellipsoid, &refinement)
        }
        CoverageMethod::Quadrature => {
            let refinement = Quadrature::new(config.samples_per_axis)?;
            volume_fractions_with(grid, ellipsoid, &refinement)
        }
    };
    debug!(
        method = ?config.method,
        samples_per_axis = config.samples_per_axis,
        "coverage pass finished"
    );
    Ok(fractions)
}

/// As [`volume_fractions`], with an explicit refinement for the boundary cells.
pub fn volume_fractions_with<R: Refinement>(
    grid: &SamplingGrid,
    ellipsoid: &Ellipsoid,
    refinement: &R,
) -> Vec<f64> {
    let coverage = classify_corners(grid, ellipsoid);

    let fractions: Vec<f64> = coverage
        .par_iter()
        .zip(grid.cell_bounds().par_iter())
        .map(|(class, cell)| match class {
            CornerCoverage::Inside => 1.0,
            CornerCoverage::Outside => 0.0,
            CornerCoverage::Boundary(_) => refinement.fraction(cell, ellipsoid),
        })
        .collect();

    let boundary = coverage
        .iter()
        .filter(|c| matches!(c, CornerCoverage::Boundary(_)))
        .count();
    let inside = coverage.iter().filter(|&&c| c == CornerCoverage::Inside).count();
    debug!(
        cells = coverage.len(),
        inside,
        boundary,
        outside = coverage.len() - inside - boundary,
        "cells classified against ellipsoid"
    );

    fractions
}
