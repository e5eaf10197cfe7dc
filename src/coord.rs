//! 3D coordinates and their textual key form.
//!
//! A [`Coord`] identifies one position in the substrate's sparse coordinate
//! space. Wherever a coordinate must act as a map key or set element in
//! interchange data it is rendered as `"xx,yy,zz"` — that exact textual form
//! is part of the snapshot contract and must not change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SubstrateError;

/// A position in the 3D coordinate space.
///
/// Two coordinates are equal iff all three components are equal. Components
/// are unsigned, so the non-negativity invariant holds by construction.
///
/// Ordering follows the allocator's scan order (`zz` most significant, then
/// `yy`, then `xx`), so sorting a list of coordinates yields allocation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Fastest-varying component; wraps at the axis limit.
    pub xx: u64,
    /// Middle component; wraps at the axis limit.
    pub yy: u64,
    /// Slowest-varying component; unbounded.
    pub zz: u64,
}

impl Coord {
    /// Origin of the coordinate space.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a coordinate from its three components.
    #[must_use]
    pub const fn new(xx: u64, yy: u64, zz: u64) -> Self {
        Self { xx, yy, zz }
    }

    /// Render the coordinate as its interchange key, e.g. `"3,7,0"`.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.xx, self.yy, self.zz)
    }
}

impl FromStr for Coord {
    type Err = SubstrateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let mut next_component = || {
            parts
                .next()
                .and_then(|p| p.trim().parse::<u64>().ok())
                .ok_or_else(|| SubstrateError::InvalidArgument {
                    reason: format!("malformed coordinate key: {s:?}"),
                })
        };
        let xx = next_component()?;
        let yy = next_component()?;
        let zz = next_component()?;
        if parts.next().is_some() {
            return Err(SubstrateError::InvalidArgument {
                reason: format!("malformed coordinate key: {s:?}"),
            });
        }
        Ok(Self { xx, yy, zz })
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.zz, self.yy, self.xx).cmp(&(other.zz, other.yy, other.xx))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
