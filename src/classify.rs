use crate::error::Result;
use crate::grid::SamplingGrid;
use crate::terminals::TerminalSet;
use crate::tree::Tree;
use rayon::prelude::*;
use tracing::debug;

/// How points lying exactly on a cell's upper face are assigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy {
    /// Every cell is half-open, `min <= p < max` on each axis. Points on the grid's
    /// global maximum face are not counted by any cell.
    #[default]
    HalfOpen,
    /// As `HalfOpen`, but a cell whose upper face lies on the grid's global maximum
    /// along an axis also includes that face. Every point of the grid extent is counted.
    ClosedUpper,
}

/// Counts, for every cell of `grid`, the points of `points` that fall inside it.
///
/// Runs in parallel over cells with the point set shared read-only.
pub fn count_points_in_cells(
    grid: &SamplingGrid,
    points: &[[f64; 3]],
    policy: BoundaryPolicy,
) -> Vec<usize> {
    let global_max = grid.extent().map(|b| b.max);

    let counts: Vec<usize> = grid
        .cell_bounds()
        .par_iter()
        .map(|cell| {
            let closed_upper = match (policy, global_max) {
                (BoundaryPolicy::ClosedUpper, Some(max)) => [
                    cell.max[0] == max[0],
                    cell.max[1] == max[1],
                    cell.max[2] == max[2],
                ],
                _ => [false; 3],
            };
            points.iter().filter(|p| cell.contains_with(p, closed_upper)).count()
        })
        .collect();

    debug!(
        cells = counts.len(),
        points = points.len(),
        counted = counts.iter().sum::<usize>(),
        ?policy,
        "points binned into sampling grid"
    );
    counts
}

/// Counts the terminal nodes of `tree` that fall in each cell of the sampling grid.
pub fn terminals_in_grid(
    grid: &SamplingGrid,
    tree: &Tree,
    terminals: &TerminalSet,
    policy: BoundaryPolicy,
) -> Result<Vec<usize>> {
    let points = terminals.points(tree)?;
    Ok(count_points_in_cells(grid, &points, policy))
}
