use crate::config::Config;
use crate::error::{QbResult, QuadbreakError};
use crate::keys::{AffineKey, CipherKey, Key, KeyKind, SubstitutionKey, VigenereKey};
use crate::optimizer::{
    mutation, OptimizationOptions, Optimizer, ProgressCallback, TracingProgress,
};
use crate::results::ResultSet;
use crate::scorer::loader::load_model;
use crate::scorer::Scorer;
use crate::search::{AffineSearch, VigenereSearch};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Flattened view of the best result, ready for display or JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub kind: KeyKind,
    pub key: String,
    pub fitness: f64,
    pub plaintext: String,
}

/// Entry point tying a scorer and a configuration to the three key searches.
pub struct Cracker {
    scorer: Arc<Scorer>,
    config: Config,
}

impl Cracker {
    pub fn new(scorer: Scorer, config: Config) -> QbResult<Self> {
        config.validate()?;
        Ok(Self {
            scorer: Arc::new(scorer),
            config,
        })
    }

    pub fn from_model_file<P: AsRef<Path>>(path: P, config: Config) -> QbResult<Self> {
        Self::new(Scorer::new(load_model(path)?), config)
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn score(&self, text: &str) -> QbResult<f64> {
        self.scorer.score(text)
    }

    pub fn crack_affine(&self, ciphertext: &str) -> QbResult<ResultSet<AffineKey>> {
        AffineSearch::from_params(self.scorer.clone(), &self.config.search).run(ciphertext)
    }

    /// Substitution search: the first run starts from the frequency-seeded
    /// key, every other run from a random permutation.
    pub fn crack_substitution(&self, ciphertext: &str) -> QbResult<ResultSet<SubstitutionKey>> {
        self.crack_substitution_with(ciphertext, &TracingProgress)
    }

    pub fn crack_substitution_with<CB: ProgressCallback + ?Sized>(
        &self,
        ciphertext: &str,
        callback: &CB,
    ) -> QbResult<ResultSet<SubstitutionKey>> {
        let alphabet = self.scorer.alphabet();
        let m = alphabet.len();
        let cipher = alphabet.encode(ciphertext);
        let seeded = mutation::frequency_seeded_key(&cipher, m, &mutation::language_order(alphabet));

        let optimizer = Optimizer::new(
            self.scorer.clone(),
            OptimizationOptions::from(&self.config),
        );
        let outcome = optimizer.run(
            ciphertext,
            |run, rng| {
                if run == 0 {
                    seeded.clone()
                } else {
                    SubstitutionKey::random(m, rng)
                }
            },
            callback,
        )?;
        Ok(outcome.results)
    }

    pub fn crack_vigenere(&self, ciphertext: &str) -> QbResult<ResultSet<VigenereKey>> {
        VigenereSearch::new(
            self.scorer.clone(),
            self.config.vigenere.clone(),
            self.config.search.clone(),
        )
        .run(ciphertext)
    }

    pub fn crack(&self, kind: KeyKind, ciphertext: &str) -> QbResult<ResultSet<Key>> {
        Ok(match kind {
            KeyKind::Affine => self.crack_affine(ciphertext)?.map_keys(Key::from),
            KeyKind::Substitution => self.crack_substitution(ciphertext)?.map_keys(Key::from),
            KeyKind::Vigenere => self.crack_vigenere(ciphertext)?.map_keys(Key::from),
        })
    }

    /// Best result of [`crack`](Self::crack).
    pub fn solve(&self, kind: KeyKind, ciphertext: &str) -> QbResult<Solution> {
        let results = self.crack(kind, ciphertext)?;
        let best = results.into_vec().into_iter().next().ok_or_else(|| {
            QuadbreakError::Validation("search produced no scorable candidate".to_string())
        })?;
        Ok(Solution {
            kind,
            key: best.key.describe(self.scorer.alphabet()),
            fitness: best.fitness,
            plaintext: best.plaintext,
        })
    }
}
