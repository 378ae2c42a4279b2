use super::anneal::RunOutcome;
use super::{Replica, ReplicaParams};
use crate::config::{Config, SearchParams};
use crate::error::QbResult;
use crate::keys::Neighbor;
use crate::results::ResultSet;
use crate::scorer::Scorer;
use crate::util;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct OptimizationOptions {
    pub replica: ReplicaParams,
    pub iterations: usize,
    pub restarts: usize,
    pub num_threads: usize,
    pub top_k: usize,
    pub seed: Option<u64>,
    pub max_time: Option<Duration>,
}

impl From<&SearchParams> for OptimizationOptions {
    fn from(p: &SearchParams) -> Self {
        Self {
            replica: ReplicaParams::from(p),
            iterations: p.max_iterations,
            restarts: p.restarts.max(1),
            num_threads: p.resolved_workers(),
            top_k: p.top_k,
            seed: p.seed,
            max_time: p.max_time(),
        }
    }
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self::from(&cfg.search)
    }
}

pub struct OptimizationResult<K> {
    pub results: ResultSet<K>,
    /// Steps taken across all runs.
    pub iterations: usize,
    /// `false` if any run stopped on the deadline or the callback.
    pub completed: bool,
}

/// Polled between iterations of every run; returning `false` stops that run.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(
        &self,
        run: usize,
        iteration: usize,
        best_fitness: f64,
        current_fitness: f64,
    ) -> bool;
}

/// Never interrupts.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _: usize, _: usize, _: f64, _: f64) -> bool {
        true
    }
}

/// Emits a `debug!` event on every poll.
pub struct TracingProgress;

impl ProgressCallback for TracingProgress {
    fn on_progress(&self, run: usize, iteration: usize, best: f64, current: f64) -> bool {
        debug!(run, iteration, best, current, "search progress");
        true
    }
}

/// Runs independent local searches in parallel and merges their bests.
pub struct Optimizer {
    scorer: Arc<Scorer>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, options: OptimizationOptions) -> Self {
        Self { scorer, options }
    }

    pub fn options(&self) -> &OptimizationOptions {
        &self.options
    }

    /// Searches keys for `ciphertext`. `initial(run, rng)` supplies the
    /// starting key of each run.
    ///
    /// Runs share nothing but the read-only scorer; run `i` is seeded with
    /// `seed + i`, so a fixed seed reproduces the whole search.
    pub fn run<K, F, CB>(
        &self,
        ciphertext: &str,
        initial: F,
        callback: &CB,
    ) -> QbResult<OptimizationResult<K>>
    where
        K: Neighbor,
        F: Fn(usize, &mut fastrand::Rng) -> K + Sync,
        CB: ProgressCallback + ?Sized,
    {
        let opts = &self.options;
        let alphabet = self.scorer.alphabet();
        let cipher: Arc<[u8]> = alphabet.encode(ciphertext).into();
        util::ensure_scorable(&cipher)?;
        let mut results = ResultSet::new(opts.top_k)?;
        let pool = util::build_pool(opts.num_threads)?;

        let deadline = opts.max_time.map(|d| Instant::now() + d);
        info!(
            "🚀 Starting {} run(s) x {} iterations on {} worker(s)",
            opts.restarts, opts.iterations, opts.num_threads
        );

        let finished: Vec<(K, f64, usize, RunOutcome)> = pool.install(|| {
            (0..opts.restarts)
                .into_par_iter()
                .map(|i| {
                    let run_seed = opts.seed.map(|s| s.wrapping_add(i as u64));
                    let mut init_rng = match opts.seed {
                        Some(s) => fastrand::Rng::with_seed(s.wrapping_add(9999 + i as u64)),
                        None => fastrand::Rng::new(),
                    };
                    let start = initial(i, &mut init_rng);

                    let mut replica = Replica::new(
                        self.scorer.clone(),
                        cipher.clone(),
                        start,
                        opts.replica,
                        run_seed,
                    );
                    let outcome = replica.run(i, opts.iterations, deadline, callback);
                    let state = replica.into_state();
                    debug!(
                        "Run {} finished after {} iterations: best {:.5} ({:?})",
                        i, state.iteration, state.best_fitness, outcome
                    );
                    (state.best, state.best_fitness, state.iteration, outcome)
                })
                .collect()
        });

        let mut iterations = 0;
        let mut completed = true;
        for (key, fitness, steps, outcome) in finished {
            iterations += steps;
            if outcome != RunOutcome::Completed {
                completed = false;
            }
            let plaintext = key.decrypt(ciphertext, alphabet);
            results.offer(fitness, plaintext, key);
        }

        if !completed {
            warn!("⏱️ Search stopped early (deadline or cancellation)");
        }
        if let Some(best) = results.best() {
            info!("🏆 Best fitness {:.5} after {} iterations", best.fitness, iterations);
        }

        Ok(OptimizationResult {
            results,
            iterations,
            completed,
        })
    }
}
