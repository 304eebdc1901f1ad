#![deny(missing_docs)]

//! Metropolis-Hastings sampling of lattice spanning trees under a
//! structural energy functional.
//!
//! The chain explores the space of spanning trees of a 2D grid, biased
//! toward configurations scoring low on a weighted combination of tree
//! diameter, bend count, node-degree distribution and winding around
//! configured pivots. Renderers consume the live state through its
//! read-only tree snapshot, one accepted step at a time.

/// YAML configuration schema, energy parameter presets and defaults.
pub mod config;
/// Deterministic seed substream helpers.
pub mod determinism;
/// The energy functional and its four structural terms.
pub mod energy;
/// Metrics collection and coverage summaries.
pub mod metrics;
/// One-shot run driver and summary.
pub mod runner;
/// Generic Metropolis-Hastings driver.
pub mod sampler;
/// The live spanning-tree state and its edge-swap move.
pub mod state;

use arbor_core::{ArborError, Periodic, RngHandle};
use arbor_lattice::{LatticeGraph, SpanningTree};

pub use config::{EnergyParams, RunConfig, SeedPolicy, VortexPin};
pub use energy::{score, EnergyBreakdown};
pub use metrics::{CoverageMetrics, MetricSample, MetricsRecorder};
pub use runner::{run, RunSummary};
pub use sampler::{AcceptanceStats, MetropolisHastings, StepOutcome};
pub use state::{SpanningTreeState, TreeMove};

/// Builds a sampling state over a freshly constructed lattice. With
/// `initial == None` the starting tree is drawn uniformly at random from
/// `rng`; a supplied tree is validated against the lattice.
pub fn build_state(
    rows: usize,
    cols: usize,
    params: EnergyParams,
    initial: Option<SpanningTree>,
    periodic: Periodic,
    rng: &mut RngHandle,
) -> Result<SpanningTreeState, ArborError> {
    let graph = LatticeGraph::build(rows, cols, periodic)?;
    SpanningTreeState::new(graph, params, initial, rng)
}

/// Binds a state and an inverse temperature into a pull-based sampler.
pub fn build_sampler(
    state: SpanningTreeState,
    beta: f64,
    rng: RngHandle,
) -> Result<MetropolisHastings<SpanningTreeState>, ArborError> {
    MetropolisHastings::new(state, beta, rng)
}
