pub mod builder;
pub mod engine;
pub mod loader;
pub mod model;

pub use self::builder::{ScorerBuildParams, TableLayout};
pub use self::model::{ModelInfo, QuadgramModel};
use crate::alphabet::Alphabet;
use crate::error::QbResult;
use std::sync::Arc;

/// Quadgram fitness scorer. Cheap to clone; the table is shared read-only.
#[derive(Debug, Clone)]
pub struct Scorer {
    model: Arc<QuadgramModel>,
}

impl Scorer {
    pub fn new(model: QuadgramModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    pub fn from_shared(model: Arc<QuadgramModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &QuadgramModel {
        &self.model
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.model.alphabet()
    }

    /// Fitness of `text`; characters outside the alphabet are ignored.
    ///
    /// # Errors
    /// `InsufficientLength` when fewer than 4 alphabet symbols remain.
    pub fn score(&self, text: &str) -> QbResult<f64> {
        engine::score_text(&self.model, text)
    }

    /// Fitness of an already encoded symbol sequence.
    pub fn score_indices(&self, indices: &[u8]) -> QbResult<f64> {
        engine::score_stream(&self.model, indices.iter().copied())
    }

    /// Like [`score_indices`](Self::score_indices) but maps a rejected
    /// candidate to `f64::NEG_INFINITY`, so batch searches never abort.
    #[inline]
    pub fn score_or_worst(&self, indices: &[u8]) -> f64 {
        self.score_indices(indices).unwrap_or(f64::NEG_INFINITY)
    }
}
