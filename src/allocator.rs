//! Coordinate allocation: a cursor over the 3D scan order.
//!
//! The [`Allocator`] hands out the next unused coordinate on demand. Its
//! cursor is "the next candidate to probe", not "the next free coordinate" —
//! a caller that writes directly to a coordinate ahead of the cursor will
//! simply cause the allocator to skip over it when the scan reaches it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coord::Coord;
use crate::space::AddressSpace;

/// The `xx` and `yy` axes wrap at this limit; `zz` is unbounded, giving a
/// 1000×1000×∞ scan order.
pub const AXIS_WRAP: u64 = 1000;

/// Cursor over the coordinate space that yields unoccupied coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocator {
    cursor: Coord,
}

impl Allocator {
    /// Create an allocator with its cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator with its cursor at a specific position, as when
    /// restoring from a snapshot.
    #[must_use]
    pub const fn from_cursor(cursor: Coord) -> Self {
        Self { cursor }
    }

    /// The next candidate coordinate the scan will probe.
    #[must_use]
    pub const fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Return the next unoccupied coordinate in scan order and mark it
    /// occupied in `space`.
    ///
    /// Probes the cursor position; if it is already occupied (for example
    /// because a caller wrote to it directly, bypassing the allocator), the
    /// cursor advances and probes again. This is an unbounded linear scan in
    /// the worst case: under a pathological occupancy pattern it visits every
    /// occupied coordinate between the cursor and the first free one.
    pub fn allocate_next(&mut self, space: &mut AddressSpace) -> Coord {
        loop {
            let candidate = self.cursor;
            self.advance();
            if space.reserve(candidate) {
                debug!(coord = %candidate, "allocated coordinate");
                return candidate;
            }
        }
    }

    /// Advance the cursor one step in scan order: increment `xx`; wrap `xx`
    /// at [`AXIS_WRAP`] into `yy`; wrap `yy` at [`AXIS_WRAP`] into `zz`.
    fn advance(&mut self) {
        self.cursor.xx += 1;
        if self.cursor.xx >= AXIS_WRAP {
            self.cursor.xx = 0;
            self.cursor.yy += 1;
        }
        if self.cursor.yy >= AXIS_WRAP {
            self.cursor.yy = 0;
            self.cursor.zz += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_allocation() {
        let mut space = AddressSpace::new();
        let mut alloc = Allocator::new();

        assert_eq!(alloc.allocate_next(&mut space), Coord::new(0, 0, 0));
        assert_eq!(alloc.allocate_next(&mut space), Coord::new(1, 0, 0));
        assert_eq!(alloc.allocate_next(&mut space), Coord::new(2, 0, 0));
    }

    #[test]
    fn test_allocation_is_unique() {
        let mut space = AddressSpace::new();
        let mut alloc = Allocator::new();

        let coords: Vec<Coord> = (0..500).map(|_| alloc.allocate_next(&mut space)).collect();
        let mut deduped = coords.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), coords.len());
    }

    #[test]
    fn test_skips_directly_written_coordinates() {
        let mut space = AddressSpace::new();
        let mut alloc = Allocator::new();

        // Caller bypasses the allocator for (1,0,0)
        space.set_cell(Coord::new(1, 0, 0), 0, 0, 7.0);

        assert_eq!(alloc.allocate_next(&mut space), Coord::new(0, 0, 0));
        assert_eq!(alloc.allocate_next(&mut space), Coord::new(2, 0, 0));
    }

    #[test]
    fn test_xx_wraps_into_yy() {
        let mut space = AddressSpace::new();
        let mut alloc = Allocator::from_cursor(Coord::new(999, 0, 0));

        assert_eq!(alloc.allocate_next(&mut space), Coord::new(999, 0, 0));
        assert_eq!(alloc.allocate_next(&mut space), Coord::new(0, 1, 0));
    }

    #[test]
    fn test_yy_wraps_into_zz() {
        let mut space = AddressSpace::new();
        let mut alloc = Allocator::from_cursor(Coord::new(999, 999, 0));

        assert_eq!(alloc.allocate_next(&mut space), Coord::new(999, 999, 0));
        assert_eq!(alloc.allocate_next(&mut space), Coord::new(0, 0, 1));
    }

    #[test]
    fn test_restored_cursor_past_wrap_normalizes_on_advance() {
        // A snapshot may place yy at the wrap limit; the next advance folds
        // it into zz before xx wraps again.
        let mut space = AddressSpace::new();
        let mut alloc = Allocator::from_cursor(Coord::new(0, 1000, 0));

        assert_eq!(alloc.allocate_next(&mut space), Coord::new(0, 1000, 0));
        assert_eq!(alloc.allocate_next(&mut space), Coord::new(1, 0, 1));
    }
}
