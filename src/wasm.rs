use crate::analysis::Analysis;
use crate::bounds::BoundingBox;
use crate::classify::BoundaryPolicy;
use crate::coverage::CoverageMethod;
use crate::ellipsoid::Ellipsoid;
use crate::grid::SamplingGrid;
use crate::tree::{Connectivity, Tree};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_METHOD: &'static str = r#"
export const METHOD_SUMMING = "summing";
export const METHOD_QUADRATURE = "quadrature";
"#;

// --- Bounding Box ---

/// Extent of the rectangular sampling grid handed to the `Analysis` constructor.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox3D {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

#[wasm_bindgen]
impl BoundingBox3D {
    #[wasm_bindgen(constructor)]
    pub fn new(
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    ) -> BoundingBox3D {
        BoundingBox3D {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }
}

impl From<BoundingBox3D> for BoundingBox<3> {
    fn from(b: BoundingBox3D) -> Self {
        Self {
            min: [b.min_x, b.min_y, b.min_z],
            max: [b.max_x, b.max_y, b.max_z],
        }
    }
}

// --- Analysis ---

/// WASM wrapper around [`Analysis`] on a regular rectangular sampling grid.
#[wasm_bindgen(js_name = Analysis)]
pub struct AnalysisWASM {
    inner: Analysis,
}

#[wasm_bindgen(js_class = Analysis)]
impl AnalysisWASM {
    /// Creates an analysis over a grid of `nx * ny * nz` cells spanning `bounds`.
    #[wasm_bindgen(constructor)]
    pub fn new(bounds: BoundingBox3D, nx: usize, ny: usize, nz: usize) -> Result<AnalysisWASM, JsError> {
        let grid = SamplingGrid::rectangular(bounds.into(), [nx, ny, nz])?;
        let tree = Tree::new(Vec::new(), Vec::new())?;
        Ok(AnalysisWASM {
            inner: Analysis::new(tree, grid),
        })
    }

    /// Replaces the tree.
    ///
    /// # Arguments
    /// * `nodes` - A flat array of coordinates `[x, y, z, x, y, z, ...]`.
    /// * `elements` - A flat array of node pairs `[proximal, distal, ...]`.
    pub fn set_tree(&mut self, nodes: &[f64], elements: &[u32]) -> Result<(), JsError> {
        let tree = Tree::from_flat(nodes, elements)?;
        self.inner.connectivity = Connectivity::from_tree(&tree);
        self.inner.tree = tree;
        Ok(())
    }

    pub fn set_ellipsoid(&mut self, x_radius: f64, y_radius: f64, z_radius: f64) -> Result<(), JsError> {
        self.inner.set_ellipsoid(Ellipsoid::new([x_radius, y_radius, z_radius])?);
        Ok(())
    }

    /// Sets the ellipsoid from organ volume, thickness and ellipticity.
    pub fn set_ellipsoid_from_volume(&mut self, volume: f64, thickness: f64, ellipticity: f64) -> Result<(), JsError> {
        self.inner.set_ellipsoid(Ellipsoid::from_volume(volume, thickness, ellipticity)?);
        Ok(())
    }

    /// Selects the boundary refinement, `"summing"` or `"quadrature"`.
    pub fn set_method(&mut self, method: &str) -> Result<(), JsError> {
        let method = match method {
            "summing" => CoverageMethod::Summing,
            "quadrature" => CoverageMethod::Quadrature,
            other => return Err(JsError::new(&format!("unknown coverage method: {}", other))),
        };
        self.inner.set_coverage(self.inner.coverage.with_method(method));
        Ok(())
    }

    pub fn set_samples_per_axis(&mut self, samples: usize) {
        self.inner.set_coverage(self.inner.coverage.with_samples_per_axis(samples));
    }

    /// Includes the grid's global upper faces in the uppermost cells.
    pub fn set_closed_upper(&mut self, closed: bool) {
        let policy = if closed { BoundaryPolicy::ClosedUpper } else { BoundaryPolicy::HalfOpen };
        self.inner.set_policy(policy);
    }

    pub fn calculate(&mut self) -> Result<(), JsError> {
        self.inner.calculate()?;
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn count_cells(&self) -> usize {
        self.inner.grid.cell_count()
    }

    #[wasm_bindgen(getter)]
    pub fn terminal_elements(&self) -> Vec<u32> {
        self.inner.terminals.elements.iter().map(|&e| e as u32).collect()
    }

    #[wasm_bindgen(getter)]
    pub fn terminal_nodes(&self) -> Vec<u32> {
        self.inner.terminals.nodes.iter().map(|&n| n as u32).collect()
    }

    #[wasm_bindgen(getter)]
    pub fn terminal_counts(&self) -> Vec<u32> {
        self.inner.terminal_counts.iter().map(|&c| c as u32).collect()
    }

    #[wasm_bindgen(getter)]
    pub fn volume_fractions(&self) -> Vec<f64> {
        self.inner.volume_fractions.clone()
    }

    /// Flat array of grid node coordinates `[x, y, z, x, y, z, ...]`.
    #[wasm_bindgen(getter)]
    pub fn grid_nodes(&self) -> Vec<f64> {
        self.inner.grid.nodes().iter().flatten().copied().collect()
    }
}
