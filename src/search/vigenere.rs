use crate::analysis::{self, KeyLengthScore};
use crate::config::{SearchMode, SearchParams, VigenereParams};
use crate::error::QbResult;
use crate::keys::{CipherKey, VigenereKey};
use crate::optimizer::{mutation, Replica, ReplicaParams};
use crate::results::ResultSet;
use crate::scorer::Scorer;
use crate::util;
use itertools::Itertools;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn, Level};

/// Vigenère key recovery: IC-ranked key lengths, per-position shift
/// candidates, parallel evaluation of their product, then a hill-climb over
/// single-position changes of the winner.
pub struct VigenereSearch {
    scorer: Arc<Scorer>,
    params: VigenereParams,
    search: SearchParams,
}

impl VigenereSearch {
    pub fn new(scorer: Arc<Scorer>, params: VigenereParams, search: SearchParams) -> Self {
        Self {
            scorer,
            params,
            search,
        }
    }

    pub fn rank_lengths(&self, cipher: &[u8]) -> Vec<KeyLengthScore> {
        analysis::rank_key_lengths(
            cipher,
            self.scorer.alphabet().len(),
            self.params.max_key_length,
            self.params.target_ic,
        )
    }

    /// Largest per-position breadth whose product stays within
    /// `max_candidate_keys`.
    pub fn breadth_for(&self, length: usize) -> usize {
        let cap = self.params.max_candidate_keys.max(1);
        let mut n = self.params.num_candidates.max(1);
        while n > 1 && n.checked_pow(length as u32).map_or(true, |p| p > cap) {
            n -= 1;
        }
        n
    }

    /// For each key position, the shifts that would turn one of the block's
    /// `breadth` most frequent symbols into the language's most frequent one.
    pub fn candidate_shifts(&self, cipher: &[u8], length: usize, breadth: usize) -> Vec<Vec<u8>> {
        let alphabet = self.scorer.alphabet();
        let m = alphabet.len();
        let top_plain = mutation::language_order(alphabet)[0] as usize;

        analysis::split_blocks(cipher, length)
            .iter()
            .map(|block| {
                let shifts: Vec<u8> = analysis::frequency_order(block, m)
                    .into_iter()
                    .take(breadth)
                    .map(|c| ((c as usize + m - top_plain) % m) as u8)
                    .collect();
                if shifts.is_empty() {
                    vec![0]
                } else {
                    shifts
                }
            })
            .collect()
    }

    /// Scores every key in the product of `candidates` in parallel. Each
    /// worker keeps a private top-K; they are merged in product order, so ties
    /// resolve the same way on every run.
    pub fn evaluate_candidates(
        &self,
        ciphertext: &str,
        cipher: &[u8],
        candidates: &[Vec<u8>],
        empty: &ResultSet<VigenereKey>,
    ) -> ResultSet<VigenereKey> {
        let alphabet = self.scorer.alphabet();
        let m = alphabet.len();

        let keys: Vec<Vec<u8>> = candidates
            .iter()
            .cloned()
            .multi_cartesian_product()
            .collect();

        keys.into_par_iter()
            .fold(
                || (empty.clone(), Vec::with_capacity(cipher.len())),
                |(mut local, mut buf), shifts| {
                    if let Ok(key) = VigenereKey::new(shifts, m) {
                        key.decrypt_into(cipher, &mut buf);
                        let fitness = self.scorer.score_or_worst(&buf);
                        if fitness.is_finite() && local.admits(fitness) {
                            let plaintext = key.decrypt(ciphertext, alphabet);
                            local.offer(fitness, plaintext, key);
                        }
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
    }

    /// Hill-climbs from `key` over single-position replacements.
    pub fn refine(&self, cipher: &[u8], key: VigenereKey) -> (VigenereKey, f64) {
        let params = ReplicaParams {
            mode: SearchMode::HillClimb,
            restart_threshold: 0,
            ..ReplicaParams::from(&self.search)
        };
        let mut replica = Replica::new(
            self.scorer.clone(),
            Arc::from(cipher),
            key,
            params,
            self.search.seed,
        );
        replica.evolve(self.params.refine_iterations);
        let state = replica.into_state();
        (state.best, state.best_fitness)
    }

    pub fn run(&self, ciphertext: &str) -> QbResult<ResultSet<VigenereKey>> {
        let alphabet = self.scorer.alphabet();
        let cipher = alphabet.encode(ciphertext);
        util::ensure_scorable(&cipher)?;
        let empty = ResultSet::new(self.search.top_k)?;
        let pool = util::build_pool(self.search.worker_count)?;

        let ranked = self.rank_lengths(&cipher);
        let lengths = analysis::select_key_lengths(
            &ranked,
            self.params.lengths_to_try,
            self.params.length_tolerance,
        );
        if tracing::enabled!(Level::DEBUG) {
            let kasiski = analysis::kasiski(&cipher, self.params.max_key_length);
            debug!(
                "Kasiski suggests {:?}, IC ranking tries {:?}",
                kasiski.suggested_lengths().iter().take(5).collect::<Vec<_>>(),
                lengths
            );
        }

        let mut results = empty.clone();
        for &length in &lengths {
            let breadth = self.breadth_for(length);
            if breadth < self.params.num_candidates {
                warn!(
                    "⚠️ Key length {}: product capped, {} candidates per position instead of {}",
                    length, breadth, self.params.num_candidates
                );
            }
            let candidates = self.candidate_shifts(&cipher, length, breadth);
            let found =
                pool.install(|| self.evaluate_candidates(ciphertext, &cipher, &candidates, &empty));
            if let Some(best) = found.best() {
                debug!(
                    "Length {}: best {} ({:.5})",
                    length,
                    best.key.describe(alphabet),
                    best.fitness
                );
            }
            results.merge(found);
        }

        if self.params.refine_iterations > 0 {
            if let Some(best) = results.best() {
                let (key, fitness) = self.refine(&cipher, best.key.clone());
                if fitness.is_finite() {
                    let plaintext = key.decrypt(ciphertext, alphabet);
                    results.offer(fitness, plaintext, key);
                }
            }
        }

        if let Some(best) = results.best() {
            info!(
                "🔑 Vigenère: best key {} ({:.5})",
                best.key.describe(alphabet),
                best.fitness
            );
        }
        Ok(results)
    }
}
