//! Error types for substrate operations.
//!
//! All errors are synchronous and surfaced immediately to the caller; no
//! operation retries internally or leaves partial state behind on failure.

use thiserror::Error;

use crate::coord::Coord;

/// Errors produced by substrate operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubstrateError {
    /// A read targeted a coordinate with no stored grid.
    #[error("no node at coordinate {coord}")]
    NotFound {
        /// The coordinate that was probed.
        coord: Coord,
    },

    /// A cell read targeted an index outside the grid's current extent.
    #[error("cell ({row}, {col}) out of bounds for {rows}x{cols} grid at {coord}")]
    IndexOutOfBounds {
        /// The coordinate of the grid.
        coord: Coord,
        /// The requested row index.
        row: usize,
        /// The requested column index.
        col: usize,
        /// The grid's current row count.
        rows: usize,
        /// The grid's current column count.
        cols: usize,
    },

    /// A caller-supplied value failed validation before any state changed.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable description of the rejected input.
        reason: String,
    },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, SubstrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SubstrateError::NotFound {
            coord: Coord::new(3, 7, 0),
        };
        assert!(err.to_string().contains("3,7,0"));

        let err = SubstrateError::IndexOutOfBounds {
            coord: Coord::new(0, 0, 0),
            row: 5,
            col: 5,
            rows: 1,
            cols: 1,
        };
        assert!(err.to_string().contains("out of bounds"));
        assert!(err.to_string().contains("1x1"));

        let err = SubstrateError::InvalidArgument {
            reason: "ragged grid".to_string(),
        };
        assert!(err.to_string().contains("ragged grid"));
    }
}
