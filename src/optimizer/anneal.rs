use super::mutation;
use super::state::Phase;
use super::{ProgressCallback, Replica};
use crate::config::SearchMode;
use crate::keys::Neighbor;
use std::time::Instant;

/// Iterations between deadline / callback checks.
const CHECK_INTERVAL: usize = 256;

/// How a call to [`Replica::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    DeadlineReached,
    Cancelled,
}

impl<K: Neighbor> Replica<K> {
    /// One iteration: propose a neighbor, accept or reject it, then handle
    /// stagnation. Returns `true` if the best key improved.
    pub fn step(&mut self) -> bool {
        let candidate = self.state.current.neighbor(&mut self.rng);
        let fitness = self.fitness_of(&candidate);
        let current = self.state.current_fitness;

        let accept = if fitness > current {
            true
        } else if fitness == current {
            self.rng.f64() < self.params.tie_acceptance
        } else if self.params.mode == SearchMode::Anneal
            && self.state.temperature > 0.0
            && fitness.is_finite()
        {
            self.rng.f64() < ((fitness - current) / self.state.temperature).exp()
        } else {
            false
        };

        if accept {
            self.state.replace_current(candidate, fitness);
        }

        let improved = self.state.record_best();
        self.state.iteration += 1;

        if self.params.mode == SearchMode::Anneal {
            self.state.temperature *= self.params.cooling_rate;
        }

        if self.state.phase(self.params.stagnation_threshold) == Phase::Stagnating {
            self.escape_plateau();
        } else if self.params.restart_threshold > 0
            && self.state.since_improvement >= self.params.restart_threshold
        {
            self.restart();
        }

        improved
    }

    /// Kicks the search off a plateau: several forced moves away from the
    /// best key (not the wandering current one), temperature back to start.
    pub fn escape_plateau(&mut self) {
        let kicked = mutation::perturb(
            &self.state.best,
            self.params.perturbation_moves,
            &mut self.rng,
        );
        let fitness = self.fitness_of(&kicked);
        self.state.replace_current(kicked, fitness);
        self.state.stagnation = 0;
        self.reset_temperature();
    }

    /// Replaces the current key with a fresh random one. The best is kept.
    pub fn restart(&mut self) {
        let fresh = self.state.current.randomize(&mut self.rng);
        let fitness = self.fitness_of(&fresh);
        self.state.replace_current(fresh, fitness);
        self.state.stagnation = 0;
        self.state.since_improvement = 0;
        self.reset_temperature();
    }

    fn reset_temperature(&mut self) {
        if self.params.mode == SearchMode::Anneal {
            self.state.temperature = self.params.initial_temperature;
        }
    }

    pub fn evolve(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Runs up to `iterations` steps, stopping early at `deadline` or when
    /// `callback` asks to. The state is left at a step boundary either way.
    pub fn run<CB: ProgressCallback + ?Sized>(
        &mut self,
        run_id: usize,
        iterations: usize,
        deadline: Option<Instant>,
        callback: &CB,
    ) -> RunOutcome {
        for i in 0..iterations {
            if i > 0 && i % CHECK_INTERVAL == 0 {
                if let Some(limit) = deadline {
                    if Instant::now() >= limit {
                        return RunOutcome::DeadlineReached;
                    }
                }
                let keep_going = callback.on_progress(
                    run_id,
                    self.state.iteration,
                    self.state.best_fitness,
                    self.state.current_fitness,
                );
                if !keep_going {
                    return RunOutcome::Cancelled;
                }
            }
            self.step();
        }
        RunOutcome::Completed
    }

    /// Like [`evolve`](Self::evolve), recording the best fitness after each step.
    pub fn run_traced(&mut self, iterations: usize) -> Vec<f64> {
        let mut trace = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            self.step();
            trace.push(self.state.best_fitness);
        }
        trace
    }
}
