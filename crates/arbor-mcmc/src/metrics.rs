use std::fs::File;
use std::io::Write;
use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::energy::EnergyBreakdown;
use crate::sampler::StepOutcome;

/// Per-step metrics stored for CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSample {
    /// Chain step the sample was recorded at.
    pub step: usize,
    /// Energy breakdown of the tree after the step.
    pub energy: EnergyBreakdown,
    /// Whether the step's proposal was accepted.
    pub accepted: bool,
    /// Canonical hash of the tree after the step.
    pub tree_hash: String,
}

/// Aggregate coverage metrics summarising the exploration quality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageMetrics {
    /// Number of unique tree hashes encountered among recorded samples.
    pub unique_tree_hashes: usize,
    /// Mean total energy over the recorded samples.
    pub mean_energy: f64,
    /// Variance of the recorded total energy values.
    pub energy_variance: f64,
}

impl CoverageMetrics {
    /// Returns an empty coverage descriptor.
    pub fn empty() -> Self {
        Self {
            unique_tree_hashes: 0,
            mean_energy: 0.0,
            energy_variance: 0.0,
        }
    }
}

/// Collects per-step metrics and computes aggregate coverage proxies.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    samples: Vec<MetricSample>,
    unique_hashes: IndexSet<String>,
    proposed: u64,
    accepted: u64,
}

impl MetricsRecorder {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a step outcome toward the acceptance rate. Every step is
    /// counted, including burned-in and thinned-out ones.
    pub fn note_outcome(&mut self, outcome: &StepOutcome) {
        self.proposed += 1;
        if outcome.accepted {
            self.accepted += 1;
        }
    }

    /// Records a metrics sample.
    pub fn push_sample(&mut self, sample: MetricSample) {
        self.unique_hashes.insert(sample.tree_hash.clone());
        self.samples.push(sample);
    }

    /// Returns an immutable view over the recorded samples.
    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    /// Fraction of noted outcomes that were accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }

    /// Computes coverage metrics from the recorded data.
    pub fn coverage(&self) -> CoverageMetrics {
        if self.samples.is_empty() {
            return CoverageMetrics::empty();
        }
        let energies: Vec<f64> = self
            .samples
            .iter()
            .map(|sample| sample.energy.total)
            .collect();
        let mean_energy = energies.iter().sum::<f64>() / energies.len() as f64;
        let variance = if energies.len() > 1 {
            let mean_sq = energies.iter().map(|&e| e * e).sum::<f64>() / energies.len() as f64;
            (mean_sq - mean_energy * mean_energy).max(0.0)
        } else {
            0.0
        };

        CoverageMetrics {
            unique_tree_hashes: self.unique_hashes.len(),
            mean_energy,
            energy_variance: variance,
        }
    }

    /// Writes the recorded metrics to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(
            file,
            "step,energy,diameter,turns,degree,winding,accepted,tree_hash"
        )?;
        for sample in &self.samples {
            writeln!(
                file,
                "{},{:.6},{:.6},{:.6},{:.6},{:.6},{},{}",
                sample.step,
                sample.energy.total,
                sample.energy.diameter,
                sample.energy.turns,
                sample.energy.degree,
                sample.energy.winding,
                sample.accepted,
                sample.tree_hash
            )?;
        }
        Ok(())
    }
}
