#![deny(missing_docs)]

//! Background lattice graphs and live spanning-tree structures for the
//! arbor sampler.

mod edge_set;
mod grid;
mod hash;
mod serialization;
mod spanning_tree;

pub use edge_set::EdgeSet;
pub use grid::LatticeGraph;
pub use hash::canonical_hash;
pub use serialization::{tree_from_json, tree_to_json, TreeSnapshot};
pub use spanning_tree::{aldous_broder, serpentine_path, SpanningTree};
