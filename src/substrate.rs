//! The substrate context: one owned bundle of all mutable state.
//!
//! [`Substrate`] wires the address space, allocator, name registry, and
//! genome pool into a single explicitly passed context object — no ambient
//! singletons. Every operation is synchronous and runs to completion.
//!
//! For use across threads, [`SharedSubstrate`] wraps the whole context in
//! one mutex. A single lock covers allocation, node creation, and cell
//! writes together: `set_cell`'s create-then-grow-then-write sequence and
//! `allocate_next`'s probe-then-mark sequence are each one logical
//! transaction, so partial locking would be unsafe.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde_json::{Map, Value};

use crate::allocator::Allocator;
use crate::coord::Coord;
use crate::error::Result;
use crate::pool::GenomePool;
use crate::registry::{Binding, NameRegistry, Table};
use crate::snapshot::Snapshot;
use crate::space::AddressSpace;

/// The full mutable state of one substrate instance.
#[derive(Debug, Clone, Default)]
pub struct Substrate {
    space: AddressSpace,
    allocator: Allocator,
    registry: NameRegistry,
    genomes: GenomePool,
}

impl Substrate {
    /// Create an empty substrate with its allocator cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a substrate from already-built parts, as when restoring a
    /// snapshot.
    #[must_use]
    pub(crate) fn from_parts(
        space: AddressSpace,
        allocator: Allocator,
        registry: NameRegistry,
        genomes: GenomePool,
    ) -> Self {
        Self {
            space,
            allocator,
            registry,
            genomes,
        }
    }

    /// The address space.
    #[must_use]
    pub fn space(&self) -> &AddressSpace {
        &self.space
    }

    /// Mutable access to the address space.
    pub fn space_mut(&mut self) -> &mut AddressSpace {
        &mut self.space
    }

    /// The allocator.
    #[must_use]
    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    /// The name registry.
    #[must_use]
    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    /// The genome pool.
    #[must_use]
    pub fn genomes(&self) -> &GenomePool {
        &self.genomes
    }

    /// Mutable access to the genome pool.
    pub fn genomes_mut(&mut self) -> &mut GenomePool {
        &mut self.genomes
    }

    /// Allocate the next unused coordinate.
    pub fn allocate_next(&mut self) -> Coord {
        self.allocator.allocate_next(&mut self.space)
    }

    /// Register a named binding, allocating a fresh coordinate for it.
    pub fn register(
        &mut self,
        table: Table,
        name: impl Into<String>,
        rows: usize,
        cols: usize,
        meta: Map<String, Value>,
    ) -> Coord {
        self.registry
            .register(table, name, rows, cols, meta, &mut self.allocator, &mut self.space)
    }

    /// Register an input name with a 1×1 grid and empty metadata.
    pub fn register_input(&mut self, name: impl Into<String>) -> Coord {
        self.register(Table::Inputs, name, 1, 1, Map::new())
    }

    /// Register an output name with a 1×1 grid and empty metadata.
    pub fn register_output(&mut self, name: impl Into<String>) -> Coord {
        self.register(Table::Outputs, name, 1, 1, Map::new())
    }

    /// Look up a binding by name.
    #[must_use]
    pub fn lookup(&self, table: Table, name: &str) -> Option<&Binding> {
        self.registry.lookup(table, name)
    }

    /// Capture the full state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Build a substrate from a snapshot.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on ragged grids or malformed coordinate keys in the
    /// snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        snapshot.restore()
    }

    /// Replace all state with the contents of `snapshot`. Equivalent to
    /// discarding this substrate and rebuilding; nothing survives.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on ragged grids or malformed coordinate keys; on
    /// error the existing state is left unchanged.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        *self = snapshot.restore()?;
        Ok(())
    }
}

/// A substrate behind one process-wide lock.
///
/// The entire context is a single mutable resource: callers take the one
/// guard, perform their logical transaction, and release it. Clones share
/// the same underlying substrate.
#[derive(Debug, Clone, Default)]
pub struct SharedSubstrate {
    inner: Arc<Mutex<Substrate>>,
}

impl SharedSubstrate {
    /// Create a shared handle around an empty substrate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing substrate.
    #[must_use]
    pub fn from_substrate(substrate: Substrate) -> Self {
        Self {
            inner: Arc::new(Mutex::new(substrate)),
        }
    }

    /// Acquire exclusive access to the substrate.
    pub fn lock(&self) -> MutexGuard<'_, Substrate> {
        self.inner.lock()
    }
}
