use arbor_core::errors::{ArborError, ErrorInfo};
use arbor_core::{RngHandle, SampleState};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome of one Metropolis step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Whether the proposal was applied.
    pub accepted: bool,
    /// Energy before the step.
    pub current_energy: f64,
    /// Energy the proposal would have produced (equals `current_energy`
    /// for a null move).
    pub proposed_energy: f64,
    /// Metropolis acceptance probability used for the decision.
    pub acceptance_prob: f64,
}

/// Running acceptance counters for a chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceStats {
    /// Number of proposals evaluated.
    pub proposed: u64,
    /// Number of proposals applied.
    pub accepted: u64,
}

impl AcceptanceStats {
    /// Fraction of proposals that were accepted.
    pub fn rate(&self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }
}

/// Generic Metropolis-Hastings driver over any [`SampleState`].
///
/// The driver owns the state and is its sole mutator; every applied move is
/// the one most recently proposed for the current configuration, which is
/// the correctness precondition of the propose/apply split. Advancement is
/// strictly pull-based: nothing happens between calls.
#[derive(Debug)]
pub struct MetropolisHastings<S> {
    state: S,
    beta: f64,
    rng: RngHandle,
    stats: AcceptanceStats,
}

impl<S: SampleState> MetropolisHastings<S> {
    /// Binds a state, an inverse temperature and an RNG stream. `beta` must
    /// be finite and non-negative; `beta == 0` degenerates to an unbiased
    /// random walk over configurations (every proposal accepted).
    pub fn new(state: S, beta: f64, rng: RngHandle) -> Result<Self, ArborError> {
        if !beta.is_finite() || beta < 0.0 {
            return Err(ArborError::Sampler(
                ErrorInfo::new("invalid-beta", "inverse temperature must be finite and >= 0")
                    .with_context("beta", beta.to_string()),
            ));
        }
        Ok(Self {
            state,
            beta,
            rng,
            stats: AcceptanceStats::default(),
        })
    }

    /// The bound inverse temperature.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Read-only view of the live state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Consumes the sampler, returning the final state.
    pub fn into_state(self) -> S {
        self.state
    }

    /// Acceptance counters accumulated so far.
    pub fn stats(&self) -> AcceptanceStats {
        self.stats
    }

    /// Executes exactly one propose/decide/apply cycle.
    ///
    /// Non-increasing energy is always accepted; uphill proposals are
    /// accepted with probability `exp(-beta * delta)`. A null move proposes
    /// the current energy and is therefore always accepted as an
    /// energy-neutral self-transition.
    pub fn step(&mut self) -> Result<StepOutcome, ArborError> {
        let current_energy = self.state.energy()?;
        let proposal = self.state.propose_move(&mut self.rng)?;
        let proposed_energy = proposal.candidate_energy;

        let acceptance_prob = if proposed_energy <= current_energy {
            1.0
        } else {
            (-self.beta * (proposed_energy - current_energy)).exp()
        };
        let draw: f64 = self.rng.gen();
        let accepted = draw < acceptance_prob;

        self.stats.proposed += 1;
        if accepted {
            self.state.make_move(&proposal.mv)?;
            self.stats.accepted += 1;
        }

        Ok(StepOutcome {
            accepted,
            current_energy,
            proposed_energy,
            acceptance_prob,
        })
    }

    /// Advances until a state is emitted under the `only_new` policy and
    /// returns a reference to it, valid until the next advance. With
    /// `only_new` set, rejected steps are suppressed and the chain keeps
    /// stepping; otherwise every step emits.
    pub fn advance(&mut self, only_new: bool) -> Result<&S, ArborError> {
        loop {
            let outcome = self.step()?;
            if outcome.accepted || !only_new {
                return Ok(&self.state);
            }
        }
    }
}
