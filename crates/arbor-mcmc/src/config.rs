use std::path::{Path, PathBuf};

use arbor_core::errors::{ArborError, ErrorInfo};
use arbor_core::{Periodic, Vertex};
use serde::{Deserialize, Serialize};

/// A winding-number pivot together with its signed weight. Positive weight
/// penalises counter-clockwise circulation around the pivot, negative
/// favours it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VortexPin {
    /// Lattice vertex the winding number is measured around.
    pub pivot: Vertex,
    /// Signed weight applied to the accumulated winding.
    pub coeff: f64,
}

/// Weights for the four terms of the energy functional. Negative weights
/// favour larger values of a term, positive weights penalise them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyParams {
    /// Tree diameter weight.
    #[serde(default)]
    pub alpha: f64,
    /// Turn (passage bend) count weight.
    #[serde(default)]
    pub gamma: f64,
    /// Per-degree contribution, indexed by tree degree 0..=4.
    #[serde(default)]
    pub delta: [f64; 5],
    /// Winding-number pivots, each with its own weight. Empty disables the
    /// winding term.
    #[serde(default)]
    pub vortex: Vec<VortexPin>,
    /// BFS cutoff radius for the winding term, in hops. A fixed constant by
    /// design; it does not scale with grid size.
    #[serde(default = "default_winding_radius")]
    pub winding_radius: usize,
}

fn default_winding_radius() -> usize {
    10
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            gamma: 0.0,
            delta: [0.0; 5],
            vortex: Vec::new(),
            winding_radius: default_winding_radius(),
        }
    }
}

impl EnergyParams {
    /// Favours straight passages: penalises bending and branching.
    pub fn straight_corridors() -> Self {
        Self {
            alpha: 30.0,
            gamma: 40.0,
            delta: [0.0, 0.0, -20.0, 30.0, 30.0],
            ..Self::default()
        }
    }

    /// Favours long passages with many bends, penalises branching.
    pub fn winding_corridors() -> Self {
        Self {
            gamma: -40.0,
            delta: [0.0, 0.0, -30.0, 40.0, 40.0],
            ..Self::default()
        }
    }

    /// Favours crossroads, penalises bends and T-junctions.
    pub fn crossroads() -> Self {
        Self {
            gamma: 30.0,
            delta: [0.0, 0.0, 0.0, 30.0, -40.0],
            ..Self::default()
        }
    }

    /// Penalises bends and junctions while favouring a clockwise vortex
    /// distortion around the given pivot.
    pub fn vortex_swirl(pivot: Vertex) -> Self {
        Self {
            gamma: 20.0,
            delta: [0.0, 0.0, -30.0, 30.0, 30.0],
            vortex: vec![VortexPin {
                pivot,
                coeff: -500.0,
            }],
            ..Self::default()
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label used when documenting seed substreams.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x0A5B_0A5B_7EEE_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// YAML-configurable parameters governing a sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of lattice rows.
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Number of lattice columns.
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// Per-axis wraparound flags for the background lattice.
    #[serde(default)]
    pub periodic: Periodic,
    /// Number of chain steps to execute.
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Number of initial steps excluded from recorded metrics.
    #[serde(default)]
    pub burn_in: usize,
    /// Interval at which to record metric samples after burn-in.
    #[serde(default = "default_thinning")]
    pub thinning: usize,
    /// Inverse temperature. Smaller values admit more uphill fluctuation;
    /// larger values drive convergence to a metastable state.
    #[serde(default = "default_beta")]
    pub beta: f64,
    /// Energy functional weights.
    #[serde(default)]
    pub params: EnergyParams,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Optional CSV file the recorded metrics are written to.
    #[serde(default)]
    pub metrics_file: Option<PathBuf>,
}

fn default_rows() -> usize {
    30
}

fn default_cols() -> usize {
    40
}

fn default_steps() -> usize {
    40_000
}

fn default_thinning() -> usize {
    1
}

fn default_beta() -> f64 {
    0.1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            periodic: Periodic::default(),
            steps: default_steps(),
            burn_in: 0,
            thinning: default_thinning(),
            beta: default_beta(),
            params: EnergyParams::default(),
            seed_policy: SeedPolicy::default(),
            metrics_file: None,
        }
    }
}

impl RunConfig {
    /// Parses a run configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ArborError> {
        serde_yaml::from_str(text).map_err(|err| {
            ArborError::Serde(ErrorInfo::new("config-parse", err.to_string()))
        })
    }

    /// Loads a run configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ArborError> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            ArborError::Serde(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }
}
