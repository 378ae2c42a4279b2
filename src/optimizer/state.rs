/// Where a run stands relative to its stagnation threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Exploring,
    Stagnating,
}

/// Snapshot of one local-search run. Every field is consistent between
/// iterations, so a run can be stopped or inspected at any step boundary.
#[derive(Debug, Clone)]
pub struct SearchState<K> {
    pub current: K,
    pub current_fitness: f64,
    pub best: K,
    pub best_fitness: f64,
    /// Iterations since the best improved or the last forced perturbation.
    pub stagnation: usize,
    /// Iterations since the best improved or the last random restart.
    pub since_improvement: usize,
    pub temperature: f64,
    pub iteration: usize,
}

impl<K: Clone> SearchState<K> {
    pub fn new(initial: K, fitness: f64, temperature: f64) -> Self {
        Self {
            best: initial.clone(),
            best_fitness: fitness,
            current: initial,
            current_fitness: fitness,
            stagnation: 0,
            since_improvement: 0,
            temperature,
            iteration: 0,
        }
    }

    pub fn phase(&self, stagnation_threshold: usize) -> Phase {
        if stagnation_threshold > 0 && self.stagnation >= stagnation_threshold {
            Phase::Stagnating
        } else {
            Phase::Exploring
        }
    }

    /// Promotes the current key to best if it is strictly better and updates
    /// the counters. Returns whether the best improved.
    pub fn record_best(&mut self) -> bool {
        if self.current_fitness > self.best_fitness {
            self.best = self.current.clone();
            self.best_fitness = self.current_fitness;
            self.stagnation = 0;
            self.since_improvement = 0;
            true
        } else {
            self.stagnation += 1;
            self.since_improvement += 1;
            false
        }
    }

    pub fn replace_current(&mut self, key: K, fitness: f64) {
        self.current = key;
        self.current_fitness = fitness;
    }
}
