//! Nodes: the grids stored at occupied coordinates.
//!
//! A [`Node`] owns one rectangular 2D grid of scalars. Grids grow in place on
//! out-of-range writes; they are never shrunk except by whole-grid
//! replacement. Rectangularity (every row the same length as row 0) is an
//! invariant maintained by every mutation path.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// One occupied coordinate and its owned grid of scalars.
///
/// The grid may be zero-by-zero. A node is created lazily on first write and
/// lives as long as the address space that owns it; there is no per-node
/// delete operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// The coordinate this node occupies.
    pub coordinate: Coord,
    /// Row-major rectangular grid of scalar values.
    pub grid: Vec<Vec<f64>>,
}

impl Node {
    /// Create a node with a `rows` × `cols` zero-filled grid.
    #[must_use]
    pub fn zeroed(coordinate: Coord, rows: usize, cols: usize) -> Self {
        Self {
            coordinate,
            grid: vec![vec![0.0; cols]; rows],
        }
    }

    /// Current `(rows, cols)` extent of the grid.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        let rows = self.grid.len();
        let cols = self.grid.first().map_or(0, Vec::len);
        (rows, cols)
    }

    /// Read a cell, or `None` if the index is outside the current extent.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        self.grid.get(row)?.get(col).copied()
    }

    /// Grow the grid in place so that `(row, col)` is a valid cell, then
    /// write `value` there. Existing cell values are preserved; new cells are
    /// zero-filled.
    ///
    /// Growth runs in two passes. Rows are appended first, each matching the
    /// grid's current width. Columns are extended second, re-reading row 0's
    /// width after the row pass, and every row — old and newly appended — is
    /// extended to the same final width. A single call that grows both
    /// dimensions therefore always leaves the grid rectangular.
    pub fn set_cell(&mut self, row: usize, col: usize, value: f64) {
        let width = self.grid.first().map_or(0, Vec::len);
        while self.grid.len() <= row {
            self.grid.push(vec![0.0; width]);
        }
        let width = self.grid.first().map_or(0, Vec::len);
        if col >= width {
            for grid_row in &mut self.grid {
                grid_row.resize(col + 1, 0.0);
            }
        }
        self.grid[row][col] = value;
    }

    /// Replace the entire grid. The node's shape becomes exactly the new
    /// grid's shape, regardless of any prior shape. The caller is responsible
    /// for rectangularity.
    pub fn replace_grid(&mut self, grid: Vec<Vec<f64>>) {
        self.grid = grid;
    }
}

/// Check that every row of `grid` has the same length as row 0.
#[must_use]
pub(crate) fn is_rectangular(grid: &[Vec<f64>]) -> bool {
    match grid.first() {
        Some(first) => grid.iter().all(|row| row.len() == first.len()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Node {
        Node::zeroed(Coord::ORIGIN, 0, 0)
    }

    #[test]
    fn test_zeroed_shape() {
        let n = Node::zeroed(Coord::new(1, 2, 3), 2, 5);
        assert_eq!(n.dimensions(), (2, 5));
        assert_eq!(n.cell(1, 4), Some(0.0));
    }

    #[test]
    fn test_growth_preserves_data() {
        let mut n = node();
        n.set_cell(0, 0, 5.0);
        n.set_cell(2, 3, 9.0);

        assert_eq!(n.dimensions(), (3, 4));
        assert_eq!(n.cell(0, 0), Some(5.0));
        assert_eq!(n.cell(2, 3), Some(9.0));

        // Every other cell is zero
        for row in 0..3 {
            for col in 0..4 {
                if (row, col) != (0, 0) && (row, col) != (2, 3) {
                    assert_eq!(n.cell(row, col), Some(0.0), "cell ({row}, {col})");
                }
            }
        }
    }

    #[test]
    fn test_column_growth_reaches_every_row() {
        let mut n = node();
        n.set_cell(0, 0, 1.0);
        n.set_cell(4, 7, 2.0);

        for row in &n.grid {
            assert_eq!(row.len(), 8);
        }
    }

    #[test]
    fn test_row_only_growth_keeps_width() {
        let mut n = Node::zeroed(Coord::ORIGIN, 1, 3);
        n.set_cell(5, 0, 1.0);
        assert_eq!(n.dimensions(), (6, 3));
    }

    #[test]
    fn test_col_only_growth() {
        let mut n = Node::zeroed(Coord::ORIGIN, 2, 1);
        n.set_cell(0, 4, 1.0);
        assert_eq!(n.dimensions(), (2, 5));
    }

    #[test]
    fn test_rectangularity_check() {
        assert!(is_rectangular(&[]));
        assert!(is_rectangular(&[vec![], vec![]]));
        assert!(is_rectangular(&[vec![1.0, 2.0], vec![3.0, 4.0]]));
        assert!(!is_rectangular(&[vec![1.0], vec![2.0, 3.0]]));
    }
}
