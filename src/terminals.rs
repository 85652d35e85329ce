use crate::error::{check_index, Result};
use crate::tree::{Connectivity, Tree};
use rayon::prelude::*;
use tracing::info;

/// Terminal (leaf) elements of a tree and the nodes they end in.
///
/// Both vectors are parallel and sorted by ascending element index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalSet {
    pub elements: Vec<usize>,
    pub nodes: Vec<usize>,
}

impl TerminalSet {
    pub fn count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Pairs of `(element, distal node)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.elements.iter().copied().zip(self.nodes.iter().copied())
    }

    /// Coordinates of the terminal nodes in `tree`.
    pub fn points(&self, tree: &Tree) -> Result<Vec<[f64; 3]>> {
        self.nodes.iter().map(|&n| tree.node(n)).collect()
    }
}

/// Finds the elements of `tree` that have no downstream children.
///
/// The connectivity table is validated up front, a malformed table aborts the pass.
pub fn extract_terminals(tree: &Tree, connectivity: &Connectivity) -> Result<TerminalSet> {
    let elements = tree.elements();
    connectivity.validate(elements.len())?;

    let pairs: Vec<(usize, usize)> = connectivity
        .iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .enumerate()
        .filter(|(_, downstream)| downstream.is_terminal())
        .map(|(i, _)| {
            let distal = check_index("node", elements[i].distal, tree.nodes().len())?;
            Ok((i, distal))
        })
        .collect::<Result<Vec<_>>>()?;

    let (elements, nodes): (Vec<usize>, Vec<usize>) = pairs.into_iter().unzip();
    info!(terminals = elements.len(), "terminal elements extracted");

    Ok(TerminalSet { elements, nodes })
}
