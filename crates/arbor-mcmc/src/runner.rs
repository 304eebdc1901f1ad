use std::path::PathBuf;

use arbor_core::errors::ErrorInfo;
use arbor_core::{ArborError, RngHandle};
use arbor_lattice::{aldous_broder, canonical_hash, LatticeGraph};
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::determinism;
use crate::energy::EnergyBreakdown;
use crate::metrics::{CoverageMetrics, MetricSample, MetricsRecorder};
use crate::sampler::MetropolisHastings;
use crate::state::SpanningTreeState;

/// Summary returned to callers after a one-shot run completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Number of chain steps executed.
    pub steps: usize,
    /// Fraction of proposals accepted over the whole run.
    pub acceptance_rate: f64,
    /// Coverage metrics over the recorded samples.
    pub coverage: CoverageMetrics,
    /// Energy breakdown of the final tree.
    pub final_energy: EnergyBreakdown,
    /// Canonical hash of the final tree.
    pub final_tree_hash: String,
    /// Metrics CSV written during the run, if configured.
    pub metrics_path: Option<PathBuf>,
    /// Metric samples collected (useful for tests/diagnostics).
    pub samples: Vec<MetricSample>,
}

/// Runs a chain from scratch with the provided configuration.
///
/// The initial tree is drawn on the walk substream of the master seed and
/// the chain consumes the chain substream, so runs are reproducible from
/// the configuration alone.
pub fn run(config: &RunConfig) -> Result<RunSummary, ArborError> {
    let master_seed = config.seed_policy.master_seed;
    let graph = LatticeGraph::build(config.rows, config.cols, config.periodic)?;

    let mut walk_rng = RngHandle::from_seed(determinism::initial_tree_seed(master_seed));
    let initial = aldous_broder(&graph, &mut walk_rng)?;
    let state = SpanningTreeState::new(graph, config.params.clone(), Some(initial), &mut walk_rng)?;

    let chain_rng = RngHandle::from_seed(determinism::chain_seed(master_seed));
    let mut sampler = MetropolisHastings::new(state, config.beta, chain_rng)?;

    let mut recorder = MetricsRecorder::new();
    let thinning = config.thinning.max(1);
    for step in 0..config.steps {
        let outcome = sampler.step()?;
        recorder.note_outcome(&outcome);
        if step < config.burn_in || (step - config.burn_in) % thinning != 0 {
            continue;
        }
        recorder.push_sample(MetricSample {
            step,
            energy: sampler.state().energy_breakdown()?,
            accepted: outcome.accepted,
            tree_hash: canonical_hash(sampler.state().tree()),
        });
    }

    let final_energy = sampler.state().energy_breakdown()?;
    let final_tree_hash = canonical_hash(sampler.state().tree());

    let metrics_path = match &config.metrics_file {
        Some(path) => {
            recorder.write_csv(path).map_err(|err| {
                ArborError::Serde(
                    ErrorInfo::new("metrics-write", err.to_string())
                        .with_context("path", path.display().to_string()),
                )
            })?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(RunSummary {
        steps: config.steps,
        acceptance_rate: recorder.acceptance_rate(),
        coverage: recorder.coverage(),
        final_energy,
        final_tree_hash,
        metrics_path,
        samples: recorder.samples().to_vec(),
    })
}
