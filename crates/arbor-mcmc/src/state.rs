use arbor_core::errors::{ArborError, ErrorInfo};
use arbor_core::{Edge, Proposal, RngHandle, SampleState, Vertex};
use arbor_lattice::{aldous_broder, EdgeSet, LatticeGraph, SpanningTree};
use rand::RngCore;

use crate::config::EnergyParams;
use crate::energy::{self, EnergyBreakdown};

/// A single-edge tree rewiring, or the null move when no rewiring exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMove {
    /// No move possible (empty complement); an energy-neutral self-move.
    Stay,
    /// Exchange one complement edge for one cycle edge.
    Swap {
        /// Complement edge joining the tree.
        add: Edge,
        /// Cycle edge leaving the tree. May equal `add`, in which case the
        /// swap nets to a no-op; that proposal is still a valid draw and is
        /// never re-sampled.
        remove: Edge,
    },
}

/// A live spanning tree of a background lattice together with its edge
/// complement and the bound energy parameters.
///
/// The tree/complement pair partitions the background edge set at all
/// times: `tree ∪ complement == background` and the two are disjoint before
/// and after every applied move.
#[derive(Debug, Clone)]
pub struct SpanningTreeState {
    graph: LatticeGraph,
    tree: SpanningTree,
    complement: EdgeSet,
    params: EnergyParams,
}

impl SpanningTreeState {
    /// Creates a state over `graph`. A supplied `initial` tree is validated
    /// as a spanning tree of the lattice; with `None` a uniformly random
    /// spanning tree is drawn via Aldous-Broder.
    pub fn new(
        graph: LatticeGraph,
        params: EnergyParams,
        initial: Option<SpanningTree>,
        rng: &mut RngHandle,
    ) -> Result<Self, ArborError> {
        let tree = match initial {
            Some(tree) => {
                tree.validate_against(&graph)?;
                tree
            }
            None => aldous_broder(&graph, rng)?,
        };
        let complement = EdgeSet::from_edges(
            graph
                .edges()
                .iter()
                .copied()
                .filter(|edge| !tree.contains_edge(*edge)),
        );
        Ok(Self {
            graph,
            tree,
            complement,
            params,
        })
    }

    /// The background lattice.
    pub fn graph(&self) -> &LatticeGraph {
        &self.graph
    }

    /// Read-only view of the current tree. Renderers must treat this as
    /// valid only until the next accepted move.
    pub fn tree(&self) -> &SpanningTree {
        &self.tree
    }

    /// Read-only view of the complement edge set.
    pub fn complement(&self) -> &EdgeSet {
        &self.complement
    }

    /// The bound energy parameters.
    pub fn params(&self) -> &EnergyParams {
        &self.params
    }

    /// Full per-term energy breakdown of the current tree.
    pub fn energy_breakdown(&self) -> Result<EnergyBreakdown, ArborError> {
        energy::score(&self.tree, &self.params)
    }

    /// Total energy of an alternate tree configuration under the bound
    /// parameters.
    pub fn energy_of(&self, tree: &SpanningTree) -> Result<f64, ArborError> {
        energy::score(tree, &self.params).map(|breakdown| breakdown.total)
    }

    fn index_of(&self, v: Vertex) -> Result<usize, ArborError> {
        self.tree.index_of(v).ok_or_else(|| {
            ArborError::Tree(
                ErrorInfo::new("vertex-outside-lattice", "edge endpoint is not a lattice vertex")
                    .with_context("vertex", v.to_string()),
            )
        })
    }
}

impl SampleState for SpanningTreeState {
    type Move = TreeMove;

    fn energy(&self) -> Result<f64, ArborError> {
        self.energy_breakdown().map(|breakdown| breakdown.total)
    }

    /// Trial evaluation of a single-edge swap; never mutates the state.
    ///
    /// Picks a uniformly random complement edge, locates the unique cycle
    /// its addition would close (the tree path between its endpoints plus
    /// the edge itself), picks a uniformly random cycle edge to drop, and
    /// scores the resulting configuration on a cloned trial tree.
    fn propose_move(&self, rng: &mut RngHandle) -> Result<Proposal<TreeMove>, ArborError> {
        let Some(add) = self.complement.choose(rng) else {
            // Fully spanning background: the chain is stuck on its current
            // tree. Propose the current energy with a null move.
            return Ok(Proposal {
                candidate_energy: self.energy()?,
                mv: TreeMove::Stay,
            });
        };

        let from = self.index_of(add.a())?;
        let to = self.index_of(add.b())?;
        let path = self.tree.path_between(from, to).ok_or_else(|| {
            ArborError::Tree(
                ErrorInfo::new("disconnected-tree", "no tree path between edge endpoints")
                    .with_context("edge", add.to_string()),
            )
        })?;

        // The cycle has path.len() - 1 tree edges plus `add` itself, and
        // drawing `add` back out is a legitimate (self-cancelling) choice.
        let cycle_len = path.len();
        let pick = (rng.next_u64() as usize) % cycle_len;
        let remove = if pick + 1 == cycle_len {
            add
        } else {
            Edge::new(self.tree.vertex_at(path[pick]), self.tree.vertex_at(path[pick + 1]))
        };

        let mut trial = self.tree.clone();
        trial.add_edge(add)?;
        trial.remove_edge(remove)?;
        let candidate_energy = self.energy_of(&trial)?;

        Ok(Proposal {
            candidate_energy,
            mv: TreeMove::Swap { add, remove },
        })
    }

    /// Applies an accepted move, mirroring every tree edit in the
    /// complement so the partition invariant holds unconditionally. A swap
    /// with `add == remove` flows through the same path and nets to a
    /// no-op.
    fn make_move(&mut self, mv: &TreeMove) -> Result<(), ArborError> {
        let TreeMove::Swap { add, remove } = *mv else {
            return Ok(());
        };
        self.tree.add_edge(add)?;
        self.tree.remove_edge(remove)?;
        if !self.complement.remove(add) {
            return Err(ArborError::Tree(
                ErrorInfo::new("complement-out-of-sync", "added edge was not in the complement")
                    .with_context("edge", add.to_string())
                    .with_hint("only the most recently proposed move may be applied"),
            ));
        }
        if !self.complement.insert(remove) {
            return Err(ArborError::Tree(
                ErrorInfo::new("complement-out-of-sync", "removed edge was already in the complement")
                    .with_context("edge", remove.to_string())
                    .with_hint("only the most recently proposed move may be applied"),
            ));
        }
        Ok(())
    }
}
