#![deny(missing_docs)]
#![doc = "Core traits and data types for the arbor biased spanning-tree sampler."]

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ArborError, ErrorInfo};
pub use rng::{derive_substream_seed, RngHandle};

/// A lattice vertex addressed by its (row, col) grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Vertex {
    /// Row index, `0 <= row < rows`.
    pub row: usize,
    /// Column index, `0 <= col < cols`.
    pub col: usize,
}

impl Vertex {
    /// Creates a vertex from its grid coordinates.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An unordered pair of lattice vertices.
///
/// The constructor canonicalises endpoint order, so two edges built from the
/// same endpoints in either order compare equal and hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(Vertex, Vertex)", into = "(Vertex, Vertex)")]
pub struct Edge {
    a: Vertex,
    b: Vertex,
}

impl From<(Vertex, Vertex)> for Edge {
    fn from((u, v): (Vertex, Vertex)) -> Self {
        Edge::new(u, v)
    }
}

impl From<Edge> for (Vertex, Vertex) {
    fn from(edge: Edge) -> Self {
        (edge.a, edge.b)
    }
}

impl Edge {
    /// Creates a canonical edge between two vertices.
    pub fn new(u: Vertex, v: Vertex) -> Self {
        if v < u {
            Self { a: v, b: u }
        } else {
            Self { a: u, b: v }
        }
    }

    /// Returns the lexicographically smaller endpoint.
    pub fn a(&self) -> Vertex {
        self.a
    }

    /// Returns the lexicographically larger endpoint.
    pub fn b(&self) -> Vertex {
        self.b
    }

    /// Returns both endpoints in canonical order.
    pub fn endpoints(&self) -> (Vertex, Vertex) {
        (self.a, self.b)
    }

    /// Returns the endpoint opposite to `v`, or `None` if `v` is not incident.
    pub fn other(&self, v: Vertex) -> Option<Vertex> {
        if v == self.a {
            Some(self.b)
        } else if v == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// Per-axis periodic wraparound flags for the background lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Periodic {
    /// Whether row 0 wraps to the last row.
    #[serde(default)]
    pub rows: bool,
    /// Whether column 0 wraps to the last column.
    #[serde(default)]
    pub cols: bool,
}

impl Periodic {
    /// No wraparound on either axis.
    pub fn none() -> Self {
        Self::default()
    }

    /// Wraparound on both axes (torus).
    pub fn both() -> Self {
        Self {
            rows: true,
            cols: true,
        }
    }
}

/// Trial evaluation returned by [`SampleState::propose_move`].
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal<M> {
    /// Energy of the configuration the move would produce.
    pub candidate_energy: f64,
    /// The move itself, to be applied on acceptance or discarded on rejection.
    pub mv: M,
}

/// Capability set required of any microstate driven by the Metropolis kernel.
///
/// A state proposes one move at a time, evaluates the candidate energy
/// without mutating itself, and applies a move only when the driver accepts
/// it. The driver must only ever apply the most recently proposed move for
/// the current configuration; this is a correctness precondition, not
/// something the trait can enforce.
pub trait SampleState: Send + Sync {
    /// Move descriptor produced by proposals and consumed by `make_move`.
    type Move;

    /// Evaluates the energy of the current configuration.
    fn energy(&self) -> Result<f64, ArborError>;

    /// Proposes a single move and reports the candidate energy. Never
    /// mutates the state.
    fn propose_move(&self, rng: &mut RngHandle) -> Result<Proposal<Self::Move>, ArborError>;

    /// Applies a previously proposed move to the state.
    fn make_move(&mut self, mv: &Self::Move) -> Result<(), ArborError>;
}
