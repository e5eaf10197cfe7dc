//! Symbolic naming of coordinates.
//!
//! The [`NameRegistry`] keeps two independent name → [`Binding`] tables, one
//! for inputs and one for outputs. A binding pins a name to an allocated
//! coordinate together with the shape declared at registration time and an
//! arbitrary metadata record. Bindings never move; there is no unregister
//! operation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::allocator::Allocator;
use crate::coord::Coord;
use crate::space::AddressSpace;

/// Which registry table a name lives in. The two tables are independent
/// namespaces: the same name may exist in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    /// Names for coordinates fed from outside the network.
    Inputs,
    /// Names for coordinates read from outside the network.
    Outputs,
}

/// A symbolic name's association with a coordinate.
///
/// `rows` and `cols` record the shape declared at registration time. They are
/// deliberately not kept in sync with the underlying grid: if the grid is
/// later resized through the address space, the declared and actual shapes
/// diverge, and both survive a snapshot verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// The allocated coordinate.
    pub coordinate: Coord,
    /// Declared row count at registration time.
    pub rows: usize,
    /// Declared column count at registration time.
    pub cols: usize,
    /// Arbitrary caller-supplied metadata, round-tripped opaquely.
    pub meta: Map<String, Value>,
}

/// Two independent, insertion-ordered name → binding tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameRegistry {
    inputs: IndexMap<String, Binding>,
    outputs: IndexMap<String, Binding>,
}

impl NameRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` in `table`: allocate a fresh coordinate, create its
    /// node with a `rows` × `cols` zero-filled grid, and store the binding.
    ///
    /// Re-registering an existing name overwrites the prior binding without
    /// error (last write wins); the prior coordinate stays occupied.
    pub fn register(
        &mut self,
        table: Table,
        name: impl Into<String>,
        rows: usize,
        cols: usize,
        meta: Map<String, Value>,
        allocator: &mut Allocator,
        space: &mut AddressSpace,
    ) -> Coord {
        let name = name.into();
        let coordinate = allocator.allocate_next(space);
        space.create_node_if_needed(coordinate, rows, cols);
        debug!(%coordinate, name = %name, ?table, rows, cols, "registered binding");
        self.table_mut(table).insert(
            name,
            Binding {
                coordinate,
                rows,
                cols,
                meta,
            },
        );
        coordinate
    }

    /// Look up a binding by name. Absent names are not an error.
    #[must_use]
    pub fn lookup(&self, table: Table, name: &str) -> Option<&Binding> {
        self.table(table).get(name)
    }

    /// Registered names in `table`, in insertion order.
    pub fn names(&self, table: Table) -> impl Iterator<Item = &str> {
        self.table(table).keys().map(String::as_str)
    }

    /// `(name, binding)` pairs in `table`, in insertion order.
    pub fn bindings(&self, table: Table) -> impl Iterator<Item = (&str, &Binding)> {
        self.table(table)
            .iter()
            .map(|(name, binding)| (name.as_str(), binding))
    }

    /// Number of bindings in `table`.
    #[must_use]
    pub fn len(&self, table: Table) -> usize {
        self.table(table).len()
    }

    /// Whether `table` has no bindings.
    #[must_use]
    pub fn is_empty(&self, table: Table) -> bool {
        self.table(table).is_empty()
    }

    /// Insert a binding directly, bypassing allocation. Used when rebuilding
    /// from a snapshot.
    pub(crate) fn insert_raw(&mut self, table: Table, name: String, binding: Binding) {
        self.table_mut(table).insert(name, binding);
    }

    fn table(&self, table: Table) -> &IndexMap<String, Binding> {
        match table {
            Table::Inputs => &self.inputs,
            Table::Outputs => &self.outputs,
        }
    }

    fn table_mut(&mut self, table: Table) -> &mut IndexMap<String, Binding> {
        match table {
            Table::Inputs => &mut self.inputs,
            Table::Outputs => &mut self.outputs,
        }
    }
}
