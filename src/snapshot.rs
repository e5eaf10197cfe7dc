//! Snapshot capture and restore.
//!
//! A [`Snapshot`] is the flat, serializable representation of an entire
//! substrate: every stored grid, the explicit occupied-coordinate list, both
//! name tables in insertion order, the allocator cursor, and the genome pool
//! passed through opaquely. Field names follow the interchange contract
//! (`occupiedCoordinates`, `nextXX`, ...), so snapshots interoperate with
//! other implementations of the same format.
//!
//! Restore is non-incremental: it discards all prior state and rebuilds from
//! the snapshot. Missing optional fields never fail — cursor components
//! default to 0 and the genome pool to empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::allocator::Allocator;
use crate::coord::Coord;
use crate::error::Result;
use crate::pool::GenomePool;
use crate::registry::{Binding, NameRegistry, Table};
use crate::space::AddressSpace;
use crate::substrate::Substrate;

/// One stored grid in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Coordinate component.
    pub xx: u64,
    /// Coordinate component.
    pub yy: u64,
    /// Coordinate component.
    pub zz: u64,
    /// The full grid at this coordinate.
    #[serde(default)]
    pub grid: Vec<Vec<f64>>,
}

/// One name binding in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingRecord {
    /// Coordinate component.
    pub xx: u64,
    /// Coordinate component.
    pub yy: u64,
    /// Coordinate component.
    pub zz: u64,
    /// Declared row count at registration time.
    #[serde(default)]
    pub rows: usize,
    /// Declared column count at registration time.
    #[serde(default)]
    pub cols: usize,
    /// Opaque caller metadata.
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl BindingRecord {
    fn from_binding(binding: &Binding) -> Self {
        Self {
            xx: binding.coordinate.xx,
            yy: binding.coordinate.yy,
            zz: binding.coordinate.zz,
            rows: binding.rows,
            cols: binding.cols,
            meta: binding.meta.clone(),
        }
    }

    fn into_binding(self) -> Binding {
        Binding {
            coordinate: Coord::new(self.xx, self.yy, self.zz),
            rows: self.rows,
            cols: self.cols,
            meta: self.meta,
        }
    }
}

/// The flat, serializable representation of an entire substrate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// Every coordinate holding a grid, in allocator scan order.
    pub nodes: Vec<NodeRecord>,
    /// Every occupied coordinate as a `"xx,yy,zz"` key, reserved slots
    /// included. Redundant with `nodes` but preserved for interchange
    /// fidelity.
    pub occupied_coordinates: Vec<String>,
    /// The inputs table as `(name, binding)` pairs in insertion order.
    pub inputs: Vec<(String, BindingRecord)>,
    /// The outputs table as `(name, binding)` pairs in insertion order.
    pub outputs: Vec<(String, BindingRecord)>,
    /// Allocator cursor component.
    #[serde(rename = "nextXX")]
    pub next_xx: u64,
    /// Allocator cursor component.
    #[serde(rename = "nextYY")]
    pub next_yy: u64,
    /// Allocator cursor component.
    #[serde(rename = "nextZZ")]
    pub next_zz: u64,
    /// The genome pool, passed through unexamined.
    pub genome_pool: GenomePool,
}

impl Snapshot {
    /// Capture the full state of a substrate.
    #[must_use]
    pub fn capture(substrate: &Substrate) -> Self {
        let space = substrate.space();
        let cursor = substrate.allocator().cursor();

        let mut nodes: Vec<NodeRecord> = space
            .nodes()
            .map(|node| NodeRecord {
                xx: node.coordinate.xx,
                yy: node.coordinate.yy,
                zz: node.coordinate.zz,
                grid: node.grid.clone(),
            })
            .collect();
        nodes.sort_by_key(|record| Coord::new(record.xx, record.yy, record.zz));

        let occupied_coordinates = space
            .occupied_coords()
            .iter()
            .map(Coord::key)
            .collect();

        let pairs = |table| {
            substrate
                .registry()
                .bindings(table)
                .map(|(name, binding)| (name.to_string(), BindingRecord::from_binding(binding)))
                .collect()
        };

        Self {
            nodes,
            occupied_coordinates,
            inputs: pairs(Table::Inputs),
            outputs: pairs(Table::Outputs),
            next_xx: cursor.xx,
            next_yy: cursor.yy,
            next_zz: cursor.zz,
            genome_pool: substrate.genomes().clone(),
        }
    }

    /// Rebuild a substrate from this snapshot, replacing all prior state.
    ///
    /// Duplicate occupied-coordinate entries are tolerated. Ragged grids and
    /// malformed coordinate keys are the only fatal conditions.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a node record carries a ragged grid or an
    /// occupied-coordinate key does not parse as three integers.
    pub fn restore(self) -> Result<Substrate> {
        let mut space = AddressSpace::new();
        for record in self.nodes {
            let coord = Coord::new(record.xx, record.yy, record.zz);
            space.set_grid(coord, record.grid)?;
        }
        for key in &self.occupied_coordinates {
            let coord: Coord = key.parse()?;
            // Already-present coordinates (from the node list or duplicate
            // entries) keep their grids; reserve is a no-op for them.
            space.reserve(coord);
        }

        let mut registry = NameRegistry::new();
        for (name, record) in self.inputs {
            registry.insert_raw(Table::Inputs, name, record.into_binding());
        }
        for (name, record) in self.outputs {
            registry.insert_raw(Table::Outputs, name, record.into_binding());
        }

        let allocator =
            Allocator::from_cursor(Coord::new(self.next_xx, self.next_yy, self.next_zz));

        let substrate = Substrate::from_parts(space, allocator, registry, self.genome_pool);
        info!(
            nodes = substrate.space().occupied_count(),
            inputs = substrate.registry().len(Table::Inputs),
            outputs = substrate.registry().len(Table::Outputs),
            genomes = substrate.genomes().len(),
            "restored substrate from snapshot"
        );
        Ok(substrate)
    }

    /// Serialize this snapshot to a JSON string.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if serialization fails (non-finite scalars under
    /// strict JSON, for example).
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| crate::error::SubstrateError::InvalidArgument {
            reason: format!("snapshot serialization failed: {e}"),
        })
    }

    /// Parse a snapshot from a JSON string. Missing optional fields take
    /// their documented defaults.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the string is not valid JSON for this layout.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::error::SubstrateError::InvalidArgument {
            reason: format!("snapshot deserialization failed: {e}"),
        })
    }
}
