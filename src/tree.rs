use crate::error::{check_index, Error, Result};

/// A directed branch segment from its proximal to its distal node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    pub proximal: usize,
    pub distal: usize,
}

impl Element {
    pub fn new(proximal: usize, distal: usize) -> Self {
        Self { proximal, distal }
    }
}

/// A branching tree: node coordinates and the elements joining them.
///
/// Both collections are immutable once the tree is built; element and node
/// identifiers are their positions in the respective vectors.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<[f64; 3]>,
    elements: Vec<Element>,
}

impl Tree {
    /// Builds a tree, checking that every element refers to existing nodes.
    pub fn new(nodes: Vec<[f64; 3]>, elements: Vec<Element>) -> Result<Self> {
        for element in &elements {
            check_index("node", element.proximal, nodes.len())?;
            check_index("node", element.distal, nodes.len())?;
        }
        Ok(Self { nodes, elements })
    }

    /// Builds a tree from flat buffers: `[x, y, z, x, y, z, ...]` coordinates and
    /// `[proximal, distal, proximal, distal, ...]` node pairs.
    ///
    /// A buffer with a dangling partial record is rejected.
    pub fn from_flat(coords: &[f64], pairs: &[u32]) -> Result<Self> {
        check_stride("coordinate", coords.len(), 3)?;
        check_stride("node pair", pairs.len(), 2)?;
        let nodes = coords.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
        let elements = pairs
            .chunks_exact(2)
            .map(|p| Element::new(p[0] as usize, p[1] as usize))
            .collect();
        Self::new(nodes, elements)
    }

    pub fn nodes(&self) -> &[[f64; 3]] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn node(&self, index: usize) -> Result<[f64; 3]> {
        check_index("node", index, self.nodes.len()).map(|i| self.nodes[i])
    }

    pub fn element(&self, index: usize) -> Result<Element> {
        check_index("element", index, self.elements.len()).map(|i| self.elements[i])
    }
}

fn check_stride(buffer: &'static str, len: usize, stride: usize) -> Result<()> {
    if len % stride == 0 {
        Ok(())
    } else {
        Err(Error::TruncatedBuffer { buffer, len, stride })
    }
}

/// Downstream relation of a single element.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Downstream {
    /// The element is terminal.
    NoChildren,
    /// Ordered, non-empty list of downstream element indices.
    Children(Vec<usize>),
}

impl Downstream {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Downstream::NoChildren)
    }
}

impl From<Vec<usize>> for Downstream {
    fn from(children: Vec<usize>) -> Self {
        if children.is_empty() {
            Downstream::NoChildren
        } else {
            Downstream::Children(children)
        }
    }
}

/// For each element of a tree, its downstream elements.
///
/// Produced once per tree and read-only thereafter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connectivity {
    downstream: Vec<Downstream>,
}

impl Connectivity {
    /// Wraps a connectivity table as delivered by an external connectivity query.
    ///
    /// The table is only checked when it is consumed, see [`Connectivity::validate`].
    pub fn new(downstream: Vec<Downstream>) -> Self {
        Self { downstream }
    }

    /// Derives connectivity from the tree itself: the children of an element are the
    /// elements whose proximal node is its distal node, in ascending index order.
    pub fn from_tree(tree: &Tree) -> Self {
        let mut by_proximal: Vec<Vec<usize>> = vec![Vec::new(); tree.nodes().len()];
        for (i, element) in tree.elements().iter().enumerate() {
            by_proximal[element.proximal].push(i);
        }

        let downstream = tree
            .elements()
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let children: Vec<usize> = by_proximal[element.distal]
                    .iter()
                    .copied()
                    .filter(|&j| j != i)
                    .collect();
                Downstream::from(children)
            })
            .collect();

        Self { downstream }
    }

    /// Reads the legacy row layout, where `row[0]` holds the number of downstream
    /// elements (`0` meaning none) followed by exactly that many element indices.
    /// Rows with missing or surplus entries are rejected.
    pub fn from_sentinel_rows(rows: &[Vec<usize>]) -> Result<Self> {
        let downstream = rows
            .iter()
            .enumerate()
            .map(|(element, row)| match row.split_first() {
                None => Err(Error::MalformedConnectivity {
                    element,
                    reason: "missing child count",
                }),
                Some((&count, children)) if children.len() == count => {
                    Ok(Downstream::from(children.to_vec()))
                }
                Some(_) => Err(Error::MalformedConnectivity {
                    element,
                    reason: "declared child count differs from row length",
                }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { downstream })
    }

    pub fn len(&self) -> usize {
        self.downstream.len()
    }

    pub fn is_empty(&self) -> bool {
        self.downstream.is_empty()
    }

    pub fn get(&self, element: usize) -> Option<&Downstream> {
        self.downstream.get(element)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Downstream> {
        self.downstream.iter()
    }

    /// Checks the table against `element_count` elements: one entry per element,
    /// no empty child lists and every child index in range.
    pub fn validate(&self, element_count: usize) -> Result<()> {
        if self.downstream.len() != element_count {
            return Err(Error::MalformedConnectivity {
                element: self.downstream.len().min(element_count),
                reason: "connectivity table length differs from element count",
            });
        }
        for (element, entry) in self.downstream.iter().enumerate() {
            if let Downstream::Children(children) = entry {
                if children.is_empty() {
                    return Err(Error::MalformedConnectivity {
                        element,
                        reason: "empty child list",
                    });
                }
                for &child in children {
                    check_index("element", child, element_count)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn y_tree() -> Tree {
        let nodes = vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [-1.0, 0.0, 2.0], [1.0, 0.0, 2.0]];
        let elements = vec![Element::new(0, 1), Element::new(1, 2), Element::new(1, 3)];
        Tree::new(nodes, elements).unwrap()
    }

    #[test]
    fn test_tree_rejects_unknown_nodes() {
        let err = Tree::new(vec![[0.0; 3]], vec![Element::new(0, 4)]).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { collection: "node", index: 4, len: 1 });
    }

    #[test]
    fn test_from_flat() {
        let tree = Tree::from_flat(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0], &[0, 1]).unwrap();
        assert_eq!(tree.nodes(), &[[0.0; 3], [1.0; 3]]);
        assert_eq!(tree.elements(), &[Element::new(0, 1)]);
    }

    #[test]
    fn test_from_flat_rejects_partial_records() {
        assert_eq!(
            Tree::from_flat(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 7.0], &[0, 1]).unwrap_err(),
            Error::TruncatedBuffer { buffer: "coordinate", len: 7, stride: 3 }
        );
        assert_eq!(
            Tree::from_flat(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0], &[0, 1, 1]).unwrap_err(),
            Error::TruncatedBuffer { buffer: "node pair", len: 3, stride: 2 }
        );
    }

    #[test]
    fn test_connectivity_from_tree() {
        let cnct = Connectivity::from_tree(&y_tree());
        assert_eq!(cnct.get(0), Some(&Downstream::Children(vec![1, 2])));
        assert_eq!(cnct.get(1), Some(&Downstream::NoChildren));
        assert_eq!(cnct.get(2), Some(&Downstream::NoChildren));
        assert!(cnct.validate(3).is_ok());
    }

    #[test]
    fn test_sentinel_rows() {
        let cnct = Connectivity::from_sentinel_rows(&[vec![2, 1, 2], vec![0, 0, 0], vec![0]]).unwrap();
        assert_eq!(cnct, Connectivity::from_tree(&y_tree()));

        let err = Connectivity::from_sentinel_rows(&[vec![2, 1, 2], vec![]]).unwrap_err();
        assert!(matches!(err, Error::MalformedConnectivity { element: 1, .. }));

        let err = Connectivity::from_sentinel_rows(&[vec![3, 1]]).unwrap_err();
        assert!(matches!(err, Error::MalformedConnectivity { element: 0, .. }));
    }

    #[test]
    fn test_sentinel_rows_reject_surplus_entries() {
        let err = Connectivity::from_sentinel_rows(&[vec![1, 1, 2], vec![0], vec![0]]).unwrap_err();
        assert!(matches!(err, Error::MalformedConnectivity { element: 0, .. }));

        let err = Connectivity::from_sentinel_rows(&[vec![1, 1], vec![0, 0, 0]]).unwrap_err();
        assert!(matches!(err, Error::MalformedConnectivity { element: 1, .. }));
    }

    #[test]
    fn test_validate() {
        let cnct = Connectivity::new(vec![Downstream::Children(vec![]), Downstream::NoChildren]);
        assert!(matches!(cnct.validate(2), Err(Error::MalformedConnectivity { element: 0, .. })));

        let cnct = Connectivity::new(vec![Downstream::Children(vec![5]), Downstream::NoChildren]);
        assert_eq!(
            cnct.validate(2),
            Err(Error::IndexOutOfRange { collection: "element", index: 5, len: 2 })
        );

        let cnct = Connectivity::new(vec![Downstream::NoChildren]);
        assert!(matches!(cnct.validate(2), Err(Error::MalformedConnectivity { element: 1, .. })));
    }
}
