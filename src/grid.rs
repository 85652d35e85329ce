use crate::bounds::BoundingBox;
use crate::error::{check_index, Error, Result, AXES};

/// Number of corner nodes of a hexahedral grid cell.
pub const CELL_CORNERS: usize = 8;

/// A rectangular sampling grid of axis-aligned hexahedral cells.
///
/// Each cell lists its 8 corner nodes in a fixed local order: the first corner is the
/// minimum-coordinate corner and the last one the maximum-coordinate corner. For grids
/// built with [`SamplingGrid::rectangular`] the order is x fastest, then y, then z:
///
/// ```text
///   0: (x0, y0, z0)   1: (x1, y0, z0)   2: (x0, y1, z0)   3: (x1, y1, z0)
///   4: (x0, y0, z1)   5: (x1, y0, z1)   6: (x0, y1, z1)   7: (x1, y1, z1)
/// ```
#[derive(Clone, Debug)]
pub struct SamplingGrid {
    nodes: Vec<[f64; 3]>,
    cells: Vec<[usize; CELL_CORNERS]>,
    cell_bounds: Vec<BoundingBox<3>>,
}

impl SamplingGrid {
    /// Builds a grid from corner nodes and cell connectivity.
    ///
    /// Fails if a node coordinate is not finite, if a cell refers to a missing node or
    /// if its first corner lies above its last corner on any axis.
    pub fn new(nodes: Vec<[f64; 3]>, cells: Vec<[usize; CELL_CORNERS]>) -> Result<Self> {
        for (node, p) in nodes.iter().enumerate() {
            if let Some(k) = (0..3).find(|&k| !p[k].is_finite()) {
                return Err(Error::NonFiniteNode { node, axis: AXES[k] });
            }
        }
        let mut cell_bounds = Vec::with_capacity(cells.len());
        for (i, corners) in cells.iter().enumerate() {
            for &n in corners {
                check_index("node", n, nodes.len())?;
            }
            let min = nodes[corners[0]];
            let max = nodes[corners[CELL_CORNERS - 1]];
            if let Some(k) = (0..3).find(|&k| min[k] > max[k]) {
                return Err(Error::InvertedCell { cell: i, axis: AXES[k] });
            }
            cell_bounds.push(BoundingBox::new(min, max));
        }
        Ok(Self { nodes, cells, cell_bounds })
    }

    /// Generates a regular grid of `nx * ny * nz` cells spanning `bounds`.
    pub fn rectangular(bounds: BoundingBox<3>, resolution: [usize; 3]) -> Result<Self> {
        let [nx, ny, nz] = resolution;
        let extent = bounds.extent();
        let step = [
            extent[0] / nx.max(1) as f64,
            extent[1] / ny.max(1) as f64,
            extent[2] / nz.max(1) as f64,
        ];

        let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
        for k in 0..=nz {
            for j in 0..=ny {
                for i in 0..=nx {
                    nodes.push([
                        coordinate(bounds.min[0], bounds.max[0], step[0], i, nx),
                        coordinate(bounds.min[1], bounds.max[1], step[1], j, ny),
                        coordinate(bounds.min[2], bounds.max[2], step[2], k, nz),
                    ]);
                }
            }
        }

        let node = |i: usize, j: usize, k: usize| i + j * (nx + 1) + k * (nx + 1) * (ny + 1);
        let mut cells = Vec::with_capacity(nx * ny * nz);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    cells.push([
                        node(i, j, k),
                        node(i + 1, j, k),
                        node(i, j + 1, k),
                        node(i + 1, j + 1, k),
                        node(i, j, k + 1),
                        node(i + 1, j, k + 1),
                        node(i, j + 1, k + 1),
                        node(i + 1, j + 1, k + 1),
                    ]);
                }
            }
        }

        Self::new(nodes, cells)
    }

    pub fn nodes(&self) -> &[[f64; 3]] {
        &self.nodes
    }

    pub fn cells(&self) -> &[[usize; CELL_CORNERS]] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Axis-aligned box of every cell, indexed like [`SamplingGrid::cells`].
    pub fn cell_bounds(&self) -> &[BoundingBox<3>] {
        &self.cell_bounds
    }

    pub fn cell(&self, index: usize) -> Result<BoundingBox<3>> {
        check_index("cell", index, self.cells.len()).map(|i| self.cell_bounds[i])
    }

    /// Coordinates of the 8 corners of a cell in local order.
    pub fn corners(&self, index: usize) -> Result<[[f64; 3]; CELL_CORNERS]> {
        let cell = self.cells[check_index("cell", index, self.cells.len())?];
        Ok(cell.map(|n| self.nodes[n]))
    }

    /// Region covered by all cells, `None` for a grid without cells.
    pub fn extent(&self) -> Option<BoundingBox<3>> {
        BoundingBox::enclosing(self.cell_bounds.iter().flat_map(|b| [b.min, b.max]))
    }
}

// Pins the last node of an axis to the bound so that rounding never shrinks the grid.
fn coordinate(min: f64, max: f64, step: f64, i: usize, n: usize) -> f64 {
    if i == n { max } else { min + step * i as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_layout() {
        let bounds = BoundingBox::new([0.0, 0.0, 0.0], [2.0, 3.0, 4.0]);
        let grid = SamplingGrid::rectangular(bounds, [2, 3, 4]).unwrap();

        assert_eq!(grid.nodes().len(), 3 * 4 * 5);
        assert_eq!(grid.cell_count(), 24);

        let first = grid.cell(0).unwrap();
        assert_eq!(first.min, [0.0, 0.0, 0.0]);
        assert_eq!(first.max, [1.0, 1.0, 1.0]);

        // x varies fastest.
        assert_eq!(grid.cell(1).unwrap().min, [1.0, 0.0, 0.0]);
        assert_eq!(grid.cell(2).unwrap().min, [0.0, 1.0, 0.0]);
        assert_eq!(grid.cell(6).unwrap().min, [0.0, 0.0, 1.0]);

        let last = grid.cell(23).unwrap();
        assert_eq!(last.max, [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_corner_order() {
        let bounds = BoundingBox::new([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
        let grid = SamplingGrid::rectangular(bounds, [1, 1, 1]).unwrap();
        let corners = grid.corners(0).unwrap();
        assert_eq!(corners[0], [-1.0, -1.0, -1.0]);
        assert_eq!(corners[1], [1.0, -1.0, -1.0]);
        assert_eq!(corners[2], [-1.0, 1.0, -1.0]);
        assert_eq!(corners[4], [-1.0, -1.0, 1.0]);
        assert_eq!(corners[7], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_extent() {
        let bounds = BoundingBox::new([-3.0, 0.0, 1.0], [3.0, 0.5, 2.0]);
        let grid = SamplingGrid::rectangular(bounds, [7, 3, 2]).unwrap();
        assert_eq!(grid.extent(), Some(bounds));

        let empty = SamplingGrid::new(vec![], vec![]).unwrap();
        assert_eq!(empty.extent(), None);
    }

    #[test]
    fn test_invalid_cells() {
        let nodes = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 1.0]];
        let err = SamplingGrid::new(nodes.clone(), vec![[0, 0, 0, 0, 0, 0, 0, 1]]).unwrap_err();
        assert_eq!(err, Error::InvertedCell { cell: 0, axis: 'x' });

        let err = SamplingGrid::new(nodes, vec![[0, 0, 0, 0, 0, 0, 0, 9]]).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { collection: "node", index: 9, len: 2 });
    }

    #[test]
    fn test_non_finite_nodes() {
        let nodes = vec![[0.0, 0.0, 0.0], [0.5, 0.5, f64::NAN]];
        let err = SamplingGrid::new(nodes, vec![[0, 0, 0, 0, 0, 0, 0, 1]]).unwrap_err();
        assert_eq!(err, Error::NonFiniteNode { node: 1, axis: 'z' });

        let nodes = vec![[f64::NEG_INFINITY, 0.0, 0.0], [1.0; 3]];
        assert_eq!(
            SamplingGrid::new(nodes, vec![]).unwrap_err(),
            Error::NonFiniteNode { node: 0, axis: 'x' }
        );

        let bounds = BoundingBox::new([0.0; 3], [1.0, f64::INFINITY, 1.0]);
        assert!(matches!(
            SamplingGrid::rectangular(bounds, [2, 2, 2]),
            Err(Error::NonFiniteNode { axis: 'y', .. })
        ));
    }

    #[test]
    fn test_cell_out_of_range() {
        let grid = SamplingGrid::rectangular(BoundingBox::new([0.0; 3], [1.0; 3]), [1, 1, 1]).unwrap();
        assert!(matches!(grid.cell(1), Err(Error::IndexOutOfRange { collection: "cell", .. })));
    }
}
