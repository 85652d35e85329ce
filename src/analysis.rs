use crate::classify::{terminals_in_grid, BoundaryPolicy};
use crate::coverage::{volume_fractions, CoverageConfig};
use crate::ellipsoid::Ellipsoid;
use crate::error::Result;
use crate::grid::SamplingGrid;
use crate::terminals::{extract_terminals, TerminalSet};
use crate::tree::{Connectivity, Tree};

/// Relates a branching tree and an ellipsoidal organ model to a sampling grid.
///
/// Holds the inputs and, after [`Analysis::calculate`], the per-cell results:
/// - the terminal elements of the tree,
/// - the number of terminal nodes inside each grid cell,
/// - the fraction of each grid cell enclosed by the ellipsoid (empty without ellipsoid).
pub struct Analysis {
    pub tree: Tree,
    pub connectivity: Connectivity,
    pub grid: SamplingGrid,
    pub ellipsoid: Option<Ellipsoid>,
    pub policy: BoundaryPolicy,
    pub coverage: CoverageConfig,
    pub terminals: TerminalSet,
    pub terminal_counts: Vec<usize>,
    pub volume_fractions: Vec<f64>,
}

impl Analysis {
    /// Creates an analysis whose connectivity is derived from the tree.
    pub fn new(tree: Tree, grid: SamplingGrid) -> Self {
        let connectivity = Connectivity::from_tree(&tree);
        Self::with_connectivity(tree, connectivity, grid)
    }

    /// Creates an analysis with connectivity supplied by the caller.
    pub fn with_connectivity(tree: Tree, connectivity: Connectivity, grid: SamplingGrid) -> Self {
        Self {
            tree,
            connectivity,
            grid,
            ellipsoid: None,
            policy: BoundaryPolicy::default(),
            coverage: CoverageConfig::default(),
            terminals: TerminalSet::default(),
            terminal_counts: Vec::new(),
            volume_fractions: Vec::new(),
        }
    }

    pub fn set_ellipsoid(&mut self, ellipsoid: Ellipsoid) {
        self.ellipsoid = Some(ellipsoid);
    }

    pub fn set_policy(&mut self, policy: BoundaryPolicy) {
        self.policy = policy;
    }

    pub fn set_coverage(&mut self, coverage: CoverageConfig) {
        self.coverage = coverage;
    }

    /// Runs all passes. On error the previous results are left untouched.
    pub fn calculate(&mut self) -> Result<()> {
        let terminals = extract_terminals(&self.tree, &self.connectivity)?;
        let terminal_counts = terminals_in_grid(&self.grid, &self.tree, &terminals, self.policy)?;
        let volume_fractions = match &self.ellipsoid {
            Some(ellipsoid) => volume_fractions(&self.grid, ellipsoid, &self.coverage)?,
            None => Vec::new(),
        };

        self.terminals = terminals;
        self.terminal_counts = terminal_counts;
        self.volume_fractions = volume_fractions;
        Ok(())
    }

    /// Enclosed volume of each cell: its volume fraction times its box volume.
    pub fn enclosed_volumes(&self) -> Vec<f64> {
        self.volume_fractions
            .iter()
            .zip(self.grid.cell_bounds())
            .map(|(f, cell)| f * cell.volume())
            .collect()
    }
}
