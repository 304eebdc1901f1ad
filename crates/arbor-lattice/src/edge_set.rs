use std::collections::BTreeMap;

use arbor_core::{Edge, RngHandle};
use rand::seq::SliceRandom;

/// Array-backed unordered-edge set with O(1) uniform sampling.
///
/// Membership goes through a position map; removal swap-removes from the
/// backing array so sampling stays a single index draw. Iteration order is
/// insertion order disturbed only by swap-removes, which is fine for every
/// consumer here: anything that needs a stable order asks for
/// [`EdgeSet::sorted`].
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    items: Vec<Edge>,
    positions: BTreeMap<Edge, usize>,
}

impl EdgeSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from the provided edges, ignoring duplicates.
    pub fn from_edges<I: IntoIterator<Item = Edge>>(edges: I) -> Self {
        let mut set = Self::new();
        for edge in edges {
            set.insert(edge);
        }
        set
    }

    /// Inserts an edge; returns `false` if it was already present.
    pub fn insert(&mut self, edge: Edge) -> bool {
        if self.positions.contains_key(&edge) {
            return false;
        }
        self.positions.insert(edge, self.items.len());
        self.items.push(edge);
        true
    }

    /// Removes an edge; returns `false` if it was not present.
    pub fn remove(&mut self, edge: Edge) -> bool {
        let Some(pos) = self.positions.remove(&edge) else {
            return false;
        };
        let last = self.items.len() - 1;
        self.items.swap(pos, last);
        self.items.pop();
        if pos < self.items.len() {
            self.positions.insert(self.items[pos], pos);
        }
        true
    }

    /// Whether the edge is in the set.
    pub fn contains(&self, edge: Edge) -> bool {
        self.positions.contains_key(&edge)
    }

    /// Number of edges in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates the edges in backing-array order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.items.iter()
    }

    /// Draws an edge uniformly at random, or `None` when empty.
    pub fn choose(&self, rng: &mut RngHandle) -> Option<Edge> {
        self.items.choose(rng).copied()
    }

    /// Returns the edges in canonical sorted order.
    pub fn sorted(&self) -> Vec<Edge> {
        let mut edges = self.items.clone();
        edges.sort();
        edges
    }
}
