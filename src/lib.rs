//! # arborgrid
//!
//! `arborgrid` relates a branching tubular tree (such as a vascular tree) and an organ
//! model approximated by an ellipsoid to a rectangular sampling grid. It can be used in
//! Rust as well as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Terminal extraction**: finds the leaf elements of a tree and the nodes they end in.
//! - **Terminal binning**: counts terminal nodes per grid cell with a documented policy for
//!   points on the grid's upper boundary.
//! - **Volume fractions**: estimates the share of every grid cell enclosed by the ellipsoid,
//!   refining boundary cells by regular lattice sampling or by elevation quadrature.
//! - **Parallel**: every pass runs over cells or elements with `rayon`.
//!
//! ## Conventions
//!
//! Tree, grid and ellipsoid share a single Cartesian frame and the ellipsoid is centred at
//! its origin. Grid cells list their 8 corners with the minimum corner first and the
//! maximum corner last.
//!
//! ## Main Interface
//!
//! The [`Analysis`] struct holds a tree, a sampling grid and an ellipsoid and runs all
//! passes; the passes are also available as free functions.

mod analysis;
mod bounds;
mod classify;
mod coverage;
mod ellipsoid;
mod error;
mod grid;
pub mod refine;
mod terminals;
mod tree;
mod wasm;

pub use analysis::Analysis;
pub use bounds::BoundingBox;
pub use classify::{count_points_in_cells, terminals_in_grid, BoundaryPolicy};
pub use coverage::{
    classify_corners, volume_fractions, volume_fractions_with, CornerCoverage, CoverageConfig,
    CoverageMethod,
};
pub use ellipsoid::{Ellipsoid, SURFACE_TOLERANCE};
pub use error::{Error, Result};
pub use grid::{SamplingGrid, CELL_CORNERS};
pub use refine::quadrature::Quadrature;
pub use refine::stratified::StratifiedSampling;
pub use refine::Refinement;
pub use terminals::{extract_terminals, TerminalSet};
pub use tree::{Connectivity, Downstream, Element, Tree};
pub use wasm::{AnalysisWASM, BoundingBox3D};
