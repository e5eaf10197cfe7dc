//! # Symbios Substrate
//!
//! A sparse, address-indexed memory substrate for experimental
//! dynamic-network architectures: a 3D coordinate space in which each
//! occupied coordinate holds an independently-sized 2D grid of scalars.
//!
//! ## Features
//!
//! - **Sparse 3D Addressing**: Coordinates are allocated on demand over a
//!   1000×1000×∞ scan order; only occupied coordinates consume memory
//! - **Auto-Growing Grids**: Out-of-range writes grow a node's grid in place,
//!   zero-filling new cells and keeping every row the same width
//! - **Symbolic Naming**: Independent `inputs` and `outputs` tables bind
//!   names to coordinates with a declared shape and opaque metadata
//! - **Genome Pool**: A flat name → record store for opaque genome payloads
//! - **Bit-Exact Snapshots**: Full state serializes through Serde to an
//!   interchange layout and restores to identical query results
//!
//! ## Quick Start
//!
//! ```rust
//! use symbios_substrate::{Substrate, Table};
//!
//! let mut substrate = Substrate::new();
//!
//! // Name some coordinates
//! let vision = substrate.register_input("vision");
//! let motor = substrate.register_output("motor");
//!
//! // Write cells; grids grow automatically
//! substrate.space_mut().set_cell(vision, 2, 3, 0.75);
//! assert_eq!(substrate.space().dimensions(vision), (3, 4));
//!
//! // Round-trip the whole store
//! let snapshot = substrate.snapshot();
//! let restored = symbios_substrate::Substrate::from_snapshot(snapshot).unwrap();
//! assert_eq!(restored.space().cell(vision, 2, 3).unwrap(), 0.75);
//! let binding = restored.lookup(Table::Outputs, "motor").unwrap();
//! assert_eq!(binding.coordinate, motor);
//! ```
//!
//! ## Architecture
//!
//! The context object [`Substrate`] owns four collaborators:
//!
//! - [`AddressSpace`] — one authoritative map from coordinate to slot;
//!   "occupied" is derived as "has an entry", so the occupancy set can never
//!   fall out of sync with the node storage
//! - [`Allocator`] — a cursor over the scan order that probes, reserves, and
//!   advances; an unbounded linear scan under pathological occupancy
//! - [`NameRegistry`] — two insertion-ordered name → [`Binding`] tables
//! - [`GenomePool`] — opaque records, round-tripped unexamined
//!
//! [`Snapshot`] observes all of the above and owns no long-lived state.
//!
//! The core is single-threaded and synchronous. [`SharedSubstrate`] offers
//! the one-lock sharing discipline for concurrent callers; no finer-grained
//! locking exists because allocation and growing writes are multi-step
//! logical transactions.

pub mod allocator;
pub mod coord;
pub mod error;
pub mod node;
pub mod pool;
pub mod registry;
pub mod snapshot;
pub mod space;
pub mod substrate;

// Re-exports for convenience
pub use allocator::{Allocator, AXIS_WRAP};
pub use coord::Coord;
pub use error::{Result, SubstrateError};
pub use node::Node;
pub use pool::GenomePool;
pub use registry::{Binding, NameRegistry, Table};
pub use snapshot::{BindingRecord, NodeRecord, Snapshot};
pub use space::{AddressSpace, Slot};
pub use substrate::{SharedSubstrate, Substrate};
