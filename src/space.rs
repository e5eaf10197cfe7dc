//! The sparse address space: coordinate-keyed node storage.
//!
//! [`AddressSpace`] owns a single authoritative mapping from [`Coord`] to
//! slot. A coordinate is occupied iff it has an entry; whether it also has a
//! grid depends on the slot. The allocator claims coordinates by inserting
//! [`Slot::Reserved`] entries, which count as occupied for allocation
//! purposes but still fail grid reads with `NotFound` until something writes
//! to them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::{Result, SubstrateError};
use crate::node::{is_rectangular, Node};

/// Storage state for one occupied coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Slot {
    /// Claimed by the allocator; no grid exists yet.
    Reserved,
    /// Holds a node with a grid.
    Occupied(Node),
}

/// The sparse 3D address space.
///
/// Exclusively owns every node; callers address cells through coordinates
/// rather than holding node references. Suited to small-to-moderate numbers
/// of individually addressed coordinates, not bulk tensor work.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressSpace {
    slots: HashMap<Coord, Slot>,
}

impl AddressSpace {
    /// Create an empty address space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `coord` is occupied (reserved or holding a node).
    #[must_use]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.slots.contains_key(&coord)
    }

    /// Number of occupied coordinates, reserved slots included.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots.len()
    }

    /// All occupied coordinates in allocator scan order.
    #[must_use]
    pub fn occupied_coords(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self.slots.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    /// Claim `coord` for the allocator. Returns `false` if already occupied.
    pub(crate) fn reserve(&mut self, coord: Coord) -> bool {
        match self.slots.entry(coord) {
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(Slot::Reserved);
                true
            }
            std::collections::hash_map::Entry::Occupied(_) => false,
        }
    }

    /// Pure lookup of the node at `coord`, if one exists.
    #[must_use]
    pub fn find_node(&self, coord: Coord) -> Option<&Node> {
        match self.slots.get(&coord) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Get the node at `coord`, creating it with a `rows` × `cols` zero-filled
    /// grid if absent.
    ///
    /// Idempotent: if a node already exists the requested shape is ignored and
    /// the existing node is returned unchanged. A reserved slot is promoted to
    /// a node with the requested shape.
    pub fn create_node_if_needed(&mut self, coord: Coord, rows: usize, cols: usize) -> &mut Node {
        let slot = self
            .slots
            .entry(coord)
            .or_insert_with(|| Slot::Occupied(Node::zeroed(coord, rows, cols)));
        if matches!(slot, Slot::Reserved) {
            *slot = Slot::Occupied(Node::zeroed(coord, rows, cols));
        }
        match slot {
            Slot::Occupied(node) => node,
            Slot::Reserved => unreachable!("reserved slot promoted above"),
        }
    }

    /// The full grid at `coord`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no node exists at `coord`.
    pub fn all_data(&self, coord: Coord) -> Result<&Vec<Vec<f64>>> {
        self.find_node(coord)
            .map(|node| &node.grid)
            .ok_or(SubstrateError::NotFound { coord })
    }

    /// Read one cell.
    ///
    /// # Errors
    ///
    /// `NotFound` if no node exists at `coord`; `IndexOutOfBounds` if `row`
    /// or `col` falls outside the grid's current extent.
    pub fn cell(&self, coord: Coord, row: usize, col: usize) -> Result<f64> {
        let node = self
            .find_node(coord)
            .ok_or(SubstrateError::NotFound { coord })?;
        node.cell(row, col).ok_or_else(|| {
            let (rows, cols) = node.dimensions();
            SubstrateError::IndexOutOfBounds {
                coord,
                row,
                col,
                rows,
                cols,
            }
        })
    }

    /// Replace the entire grid at `coord`, creating the node if absent. The
    /// node's shape becomes exactly the supplied grid's shape.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the supplied grid is ragged; the node is left
    /// untouched (and not created) in that case.
    pub fn set_grid(&mut self, coord: Coord, grid: Vec<Vec<f64>>) -> Result<()> {
        if !is_rectangular(&grid) {
            return Err(SubstrateError::InvalidArgument {
                reason: format!("ragged grid supplied for coordinate {coord}"),
            });
        }
        self.create_node_if_needed(coord, 0, 0).replace_grid(grid);
        Ok(())
    }

    /// Write one cell, creating the node if absent and growing the grid in
    /// place as needed. Never fails; growth is all-or-nothing and preserves
    /// every existing cell value.
    pub fn set_cell(&mut self, coord: Coord, row: usize, col: usize, value: f64) {
        self.create_node_if_needed(coord, 0, 0)
            .set_cell(row, col, value);
    }

    /// Current `(rows, cols)` extent at `coord`, or `(0, 0)` if no grid
    /// exists there. A query, not an access: unoccupied coordinates are not
    /// an error.
    #[must_use]
    pub fn dimensions(&self, coord: Coord) -> (usize, usize) {
        self.find_node(coord).map_or((0, 0), Node::dimensions)
    }

    /// Iterate over all coordinates holding a node, with their nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.slots.values().filter_map(|slot| match slot {
            Slot::Occupied(node) => Some(node),
            Slot::Reserved => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coord {
        Coord::ORIGIN
    }

    #[test]
    fn test_find_node_absent() {
        let space = AddressSpace::new();
        assert!(space.find_node(origin()).is_none());
        assert!(!space.is_occupied(origin()));
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut space = AddressSpace::new();
        space.create_node_if_needed(origin(), 2, 3);
        // Second call with a different shape is ignored
        space.create_node_if_needed(origin(), 9, 9);
        assert_eq!(space.dimensions(origin()), (2, 3));
    }

    #[test]
    fn test_reserved_slot_reads_as_not_found() {
        let mut space = AddressSpace::new();
        assert!(space.reserve(origin()));
        assert!(space.is_occupied(origin()));
        assert!(space.find_node(origin()).is_none());
        assert!(matches!(
            space.all_data(origin()),
            Err(SubstrateError::NotFound { .. })
        ));
        assert_eq!(space.dimensions(origin()), (0, 0));
    }

    #[test]
    fn test_reserve_then_create_uses_requested_shape() {
        let mut space = AddressSpace::new();
        space.reserve(origin());
        space.create_node_if_needed(origin(), 4, 2);
        assert_eq!(space.dimensions(origin()), (4, 2));
    }

    #[test]
    fn test_cell_errors() {
        let mut space = AddressSpace::new();
        let coord = Coord::new(1, 1, 1);

        assert!(matches!(
            space.cell(coord, 0, 0),
            Err(SubstrateError::NotFound { .. })
        ));

        space.create_node_if_needed(coord, 1, 1);
        assert!(matches!(
            space.cell(coord, 5, 5),
            Err(SubstrateError::IndexOutOfBounds { rows: 1, cols: 1, .. })
        ));
    }

    #[test]
    fn test_set_cell_creates_and_grows() {
        let mut space = AddressSpace::new();
        let coord = Coord::new(2, 0, 0);

        space.set_cell(coord, 0, 0, 5.0);
        space.set_cell(coord, 2, 3, 9.0);

        assert_eq!(space.dimensions(coord), (3, 4));
        assert_eq!(space.cell(coord, 0, 0).unwrap(), 5.0);
        assert_eq!(space.cell(coord, 2, 3).unwrap(), 9.0);
        assert_eq!(space.cell(coord, 1, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_set_grid_replaces_shape() {
        let mut space = AddressSpace::new();
        space.create_node_if_needed(origin(), 5, 5);
        space
            .set_grid(origin(), vec![vec![1.0, 2.0], vec![3.0, 4.0]])
            .unwrap();
        assert_eq!(space.dimensions(origin()), (2, 2));
        assert_eq!(space.cell(origin(), 1, 0).unwrap(), 3.0);
    }

    #[test]
    fn test_set_grid_rejects_ragged() {
        let mut space = AddressSpace::new();
        let err = space
            .set_grid(origin(), vec![vec![1.0], vec![2.0, 3.0]])
            .unwrap_err();
        assert!(matches!(err, SubstrateError::InvalidArgument { .. }));
        // Rejected input must not create the node
        assert!(!space.is_occupied(origin()));
    }

    #[test]
    fn test_occupied_coords_in_scan_order() {
        let mut space = AddressSpace::new();
        space.set_cell(Coord::new(0, 0, 1), 0, 0, 1.0);
        space.set_cell(Coord::new(5, 0, 0), 0, 0, 1.0);
        space.set_cell(Coord::new(0, 3, 0), 0, 0, 1.0);

        assert_eq!(
            space.occupied_coords(),
            vec![
                Coord::new(5, 0, 0),
                Coord::new(0, 3, 0),
                Coord::new(0, 0, 1)
            ]
        );
    }
}
