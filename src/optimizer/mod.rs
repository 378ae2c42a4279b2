pub mod anneal;
pub mod mutation;
pub mod runner;
pub mod state;

pub use self::runner::{
    NoProgress, OptimizationOptions, Optimizer, ProgressCallback, TracingProgress,
};
pub use self::state::{Phase, SearchState};

use crate::config::{SearchMode, SearchParams};
use crate::keys::Neighbor;
use crate::scorer::Scorer;
use std::sync::Arc;

/// Knobs of a single local-search run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplicaParams {
    pub mode: SearchMode,
    pub initial_temperature: f64,
    pub cooling_rate: f64,
    pub stagnation_threshold: usize,
    pub perturbation_moves: usize,
    pub tie_acceptance: f64,
    pub restart_threshold: usize,
}

impl From<&SearchParams> for ReplicaParams {
    fn from(p: &SearchParams) -> Self {
        Self {
            mode: p.mode,
            initial_temperature: p.initial_temperature,
            cooling_rate: p.cooling_rate,
            stagnation_threshold: p.stagnation_threshold,
            perturbation_moves: p.perturbation_moves,
            tie_acceptance: p.tie_acceptance,
            restart_threshold: p.restart_threshold,
        }
    }
}

impl Default for ReplicaParams {
    fn default() -> Self {
        Self::from(&SearchParams::default())
    }
}

/// One sequential hill-climbing / annealing run over keys of type `K`.
pub struct Replica<K: Neighbor> {
    pub scorer: Arc<Scorer>,
    pub cipher: Arc<[u8]>,
    pub params: ReplicaParams,
    pub state: SearchState<K>,

    // Decryption scratch space, reused every step
    buffer: Vec<u8>,

    pub rng: fastrand::Rng,
}

impl<K: Neighbor> Replica<K> {
    pub fn new(
        scorer: Arc<Scorer>,
        cipher: Arc<[u8]>,
        initial: K,
        params: ReplicaParams,
        seed: Option<u64>,
    ) -> Self {
        let rng = if let Some(s) = seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };

        let mut buffer = Vec::with_capacity(cipher.len());
        initial.decrypt_into(&cipher, &mut buffer);
        let fitness = scorer.score_or_worst(&buffer);

        let temperature = match params.mode {
            SearchMode::Anneal => params.initial_temperature,
            SearchMode::HillClimb => 0.0,
        };

        Replica {
            scorer,
            cipher,
            params,
            state: SearchState::new(initial, fitness, temperature),
            buffer,
            rng,
        }
    }

    /// Decrypts with `key` and scores the result; rejected candidates get
    /// `f64::NEG_INFINITY`.
    #[inline]
    pub fn fitness_of(&mut self, key: &K) -> f64 {
        key.decrypt_into(&self.cipher, &mut self.buffer);
        self.scorer.score_or_worst(&self.buffer)
    }

    pub fn best(&self) -> (&K, f64) {
        (&self.state.best, self.state.best_fitness)
    }

    pub fn into_state(self) -> SearchState<K> {
        self.state
    }
}
