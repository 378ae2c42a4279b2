use crate::config::SearchParams;
use crate::error::QbResult;
use crate::keys::{AffineKey, CipherKey};
use crate::results::{ResultSet, ScoredCandidate};
use crate::scorer::Scorer;
use crate::util;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::info;

/// Exhaustive affine key search: all `φ(m) × m` keys are tried.
pub struct AffineSearch {
    scorer: Arc<Scorer>,
    top_k: usize,
    num_threads: usize,
}

impl AffineSearch {
    pub fn new(scorer: Arc<Scorer>, top_k: usize, num_threads: usize) -> Self {
        Self {
            scorer,
            top_k,
            num_threads,
        }
    }

    pub fn from_params(scorer: Arc<Scorer>, params: &SearchParams) -> Self {
        Self::new(scorer, params.top_k, params.worker_count)
    }

    /// The `top_k` best keys for `ciphertext`.
    ///
    /// # Errors
    /// `InsufficientLength` when the ciphertext holds fewer than 4 alphabet
    /// symbols (checked once, not per key); `Config` on a zero `top_k`.
    pub fn run(&self, ciphertext: &str) -> QbResult<ResultSet<AffineKey>> {
        let alphabet = self.scorer.alphabet();
        let cipher = alphabet.encode(ciphertext);
        util::ensure_scorable(&cipher)?;
        let empty = ResultSet::new(self.top_k)?;
        let keys = AffineKey::all(alphabet.len());
        let pool = util::build_pool(self.num_threads)?;

        let results = pool.install(|| {
            keys.par_iter()
                .fold(
                    || (empty.clone(), Vec::with_capacity(cipher.len())),
                    |(mut local, mut buf), key| {
                        key.decrypt_into(&cipher, &mut buf);
                        let fitness = self.scorer.score_or_worst(&buf);
                        if fitness.is_finite() && local.admits(fitness) {
                            local.offer(fitness, key.decrypt(ciphertext, alphabet), *key);
                        }
                        (local, buf)
                    },
                )
                .map(|(local, _)| local)
                .reduce(
                    || empty.clone(),
                    |mut a, b| {
                        a.merge(b);
                        a
                    },
                )
        });

        if let Some(best) = results.best() {
            info!(
                "🔑 Affine: best of {} keys is {} ({:.5})",
                keys.len(),
                best.key.describe(alphabet),
                best.fitness
            );
        }
        Ok(results)
    }

    /// Every key with its fitness, best first. Used to judge how far the
    /// winner stands out from the rest of the keyspace.
    pub fn score_all(&self, ciphertext: &str) -> QbResult<Vec<ScoredCandidate<AffineKey>>> {
        let alphabet = self.scorer.alphabet();
        let cipher = alphabet.encode(ciphertext);
        util::ensure_scorable(&cipher)?;
        let pool = util::build_pool(self.num_threads)?;

        let mut all: Vec<ScoredCandidate<AffineKey>> = pool.install(|| {
            AffineKey::all(alphabet.len())
                .into_par_iter()
                .map(|key| {
                    let plain = key.decrypt_indices(&cipher);
                    ScoredCandidate {
                        fitness: self.scorer.score_or_worst(&plain),
                        plaintext: alphabet.decode(&plain),
                        key,
                    }
                })
                .collect()
        });
        all.sort_by(|a, b| {
            b.fitness
                .partial_cmp(&a.fitness)
                .unwrap_or(Ordering::Equal)
        });
        Ok(all)
    }
}
