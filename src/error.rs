use thiserror::Error;

/// Errors raised by the analysis passes.
///
/// Every variant carries the offending index or value. Passes validate their inputs
/// before producing any output, so an error never comes with a partially filled array.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The downstream list of an element violates the no-child contract.
    #[error("malformed connectivity for element {element}: {reason}")]
    MalformedConnectivity { element: usize, reason: &'static str },

    /// Fewer than two test points per axis were requested for boundary refinement.
    #[error("invalid sample density {samples}: at least 2 test points per axis are required")]
    InvalidSampleDensity { samples: usize },

    /// An ellipsoid radius is zero, negative or not finite.
    #[error("degenerate ellipsoid: {axis} radius is {radius}")]
    DegenerateEllipsoid { axis: char, radius: f64 },

    /// An index refers outside of its collection.
    #[error("{collection} index {index} out of range (len {len})")]
    IndexOutOfRange { collection: &'static str, index: usize, len: usize },

    /// A grid cell whose minimum corner lies above its maximum corner.
    #[error("grid cell {cell} is inverted along the {axis} axis")]
    InvertedCell { cell: usize, axis: char },

    /// A grid node with a NaN or infinite coordinate.
    #[error("grid node {node} has a non-finite {axis} coordinate")]
    NonFiniteNode { node: usize, axis: char },

    /// A flat input buffer whose length is not a multiple of its record size.
    #[error("{buffer} buffer of length {len} is not a multiple of {stride}")]
    TruncatedBuffer { buffer: &'static str, len: usize, stride: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Axis labels used in error messages.
pub(crate) const AXES: [char; 3] = ['x', 'y', 'z'];

/// Checks `index < len`, otherwise reports it against `collection`.
pub(crate) fn check_index(collection: &'static str, index: usize, len: usize) -> Result<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(Error::IndexOutOfRange { collection, index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = Error::IndexOutOfRange { collection: "node", index: 7, len: 3 };
        assert_eq!(err.to_string(), "node index 7 out of range (len 3)");

        let err = Error::DegenerateEllipsoid { axis: 'y', radius: -1.0 };
        assert_eq!(err.to_string(), "degenerate ellipsoid: y radius is -1");
    }

    #[test]
    fn test_check_index() {
        assert_eq!(check_index("cell", 2, 3), Ok(2));
        assert_eq!(
            check_index("cell", 3, 3),
            Err(Error::IndexOutOfRange { collection: "cell", index: 3, len: 3 })
        );
    }
}
