use crate::consts::{DEFAULT_PERTURBATION_MOVES, DEFAULT_TOP_K, ENGLISH_IC};
use crate::error::{QbResult, QuadbreakError};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use strum_macros::{Display, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Only improving (or tied) moves are accepted.
    HillClimb,
    /// Worse moves are accepted with probability `exp(delta / T)`.
    #[default]
    Anneal,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    #[serde(default)]
    pub search: SearchParams,
    #[command(flatten)]
    #[serde(default)]
    pub vigenere: VigenereParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, value_enum, default_value_t = SearchMode::Anneal)]
    pub mode: SearchMode,
    #[arg(long, default_value_t = 20_000)]
    pub max_iterations: usize,
    #[arg(long, default_value_t = 0.0005)]
    pub initial_temperature: f64,
    #[arg(long, default_value_t = 0.999)]
    pub cooling_rate: f64,
    #[arg(long, default_value_t = 1_000)]
    pub stagnation_threshold: usize,
    #[arg(long, default_value_t = DEFAULT_PERTURBATION_MOVES)]
    pub perturbation_moves: usize,
    #[arg(long, default_value_t = 0.1)]
    pub tie_acceptance: f64,
    /// Iterations without a new best before a fresh random key; 0 disables.
    #[arg(long, default_value_t = 5_000)]
    pub restart_threshold: usize,
    /// Independent runs merged into one result set.
    #[arg(long, default_value_t = 4)]
    pub restarts: usize,
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,
    /// Worker threads; 0 uses every available core.
    #[arg(long, default_value_t = 0)]
    pub worker_count: usize,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub max_time_ms: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            mode: SearchMode::Anneal,
            max_iterations: 20_000,
            initial_temperature: 0.0005,
            cooling_rate: 0.999,
            stagnation_threshold: 1_000,
            perturbation_moves: DEFAULT_PERTURBATION_MOVES,
            tie_acceptance: 0.1,
            restart_threshold: 5_000,
            restarts: 4,
            top_k: DEFAULT_TOP_K,
            worker_count: 0,
            seed: None,
            max_time_ms: None,
        }
    }
}

impl SearchParams {
    pub fn max_time(&self) -> Option<Duration> {
        self.max_time_ms.map(Duration::from_millis)
    }

    pub fn resolved_workers(&self) -> usize {
        if self.worker_count > 0 {
            self.worker_count
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VigenereParams {
    #[arg(long, default_value_t = 16)]
    pub max_key_length: usize,
    /// Best-ranked key lengths to try (near-ties are added on top).
    #[arg(long, default_value_t = 3)]
    pub lengths_to_try: usize,
    /// Lengths whose IC distance is within this of the last one tried are tried too.
    #[arg(long, default_value_t = 0.002)]
    pub length_tolerance: f64,
    #[arg(long, default_value_t = 5)]
    pub num_candidates: usize,
    /// Upper bound on the candidate product evaluated per key length.
    #[arg(long, default_value_t = 500_000)]
    pub max_candidate_keys: usize,
    /// Hill-climb iterations spent polishing the best candidate; 0 disables.
    #[arg(long, default_value_t = 2_000)]
    pub refine_iterations: usize,
    #[arg(long, default_value_t = ENGLISH_IC)]
    pub target_ic: f64,
}

impl Default for VigenereParams {
    fn default() -> Self {
        Self {
            max_key_length: 16,
            lengths_to_try: 3,
            length_tolerance: 0.002,
            num_candidates: 5,
            max_candidate_keys: 500_000,
            refine_iterations: 2_000,
            target_ic: ENGLISH_IC,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> QbResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> QbResult<()> {
        let s = &self.search;
        if s.top_k == 0 {
            return Err(QuadbreakError::Config("top_k must be at least 1".into()));
        }
        if !(s.cooling_rate > 0.0 && s.cooling_rate <= 1.0) {
            return Err(QuadbreakError::Config(format!(
                "cooling_rate {} must lie in (0, 1]",
                s.cooling_rate
            )));
        }
        if !(0.0..=1.0).contains(&s.tie_acceptance) {
            return Err(QuadbreakError::Config(format!(
                "tie_acceptance {} must lie in [0, 1]",
                s.tie_acceptance
            )));
        }
        if s.mode == SearchMode::Anneal && s.initial_temperature <= 0.0 {
            return Err(QuadbreakError::Config(
                "annealing needs a positive initial_temperature".into(),
            ));
        }
        let v = &self.vigenere;
        if v.max_key_length == 0 {
            return Err(QuadbreakError::Config(
                "max_key_length must be at least 1".into(),
            ));
        }
        if v.num_candidates == 0 {
            return Err(QuadbreakError::Config(
                "num_candidates must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
