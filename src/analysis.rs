//! Descriptive statistics over encoded ciphertext: symbol frequencies, Index
//! of Coincidence, key-length ranking and Kasiski examination.

use crate::consts::{KASISKI_MAX_LEN, KASISKI_MIN_LEN};
use fnv::FnvHashMap;
use itertools::Itertools;
use std::cmp::Ordering;

pub fn symbol_counts(indices: &[u8], m: usize) -> Vec<usize> {
    let mut counts = vec![0usize; m];
    for &i in indices {
        if let Some(c) = counts.get_mut(i as usize) {
            *c += 1;
        }
    }
    counts
}

/// Symbols present in `indices`, most frequent first; ties by symbol index.
pub fn frequency_order(indices: &[u8], m: usize) -> Vec<u8> {
    let counts = symbol_counts(indices, m);
    (0..m as u8)
        .filter(|&s| counts[s as usize] > 0)
        .sorted_by(|&a, &b| {
            counts[b as usize]
                .cmp(&counts[a as usize])
                .then(a.cmp(&b))
        })
        .collect()
}

/// `Σ f(f-1) / (n(n-1))`; zero for fewer than two symbols.
pub fn index_of_coincidence(indices: &[u8], m: usize) -> f64 {
    let n = indices.len();
    if n < 2 {
        return 0.0;
    }
    let total: usize = symbol_counts(indices, m)
        .iter()
        .map(|&f| f * f.saturating_sub(1))
        .sum();
    total as f64 / (n * (n - 1)) as f64
}

/// Splits `indices` into `len` interleaved blocks; block `j` holds every
/// symbol at a position congruent to `j` modulo `len`.
pub fn split_blocks(indices: &[u8], len: usize) -> Vec<Vec<u8>> {
    let len = len.max(1);
    let mut blocks = vec![Vec::with_capacity(indices.len() / len + 1); len];
    for (i, &s) in indices.iter().enumerate() {
        blocks[i % len].push(s);
    }
    blocks
}

pub fn average_ic(indices: &[u8], m: usize, len: usize) -> f64 {
    let blocks = split_blocks(indices, len);
    let sum: f64 = blocks.iter().map(|b| index_of_coincidence(b, m)).sum();
    sum / blocks.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyLengthScore {
    pub length: usize,
    pub average_ic: f64,
    /// `|average_ic - target|`.
    pub distance: f64,
}

/// Ranks key lengths `1..=max_len` by how close their average block IC is to
/// `target_ic`. Lengths longer than the text are skipped.
pub fn rank_key_lengths(
    indices: &[u8],
    m: usize,
    max_len: usize,
    target_ic: f64,
) -> Vec<KeyLengthScore> {
    let upper = max_len.min(indices.len()).max(1);
    (1..=upper)
        .map(|length| {
            let average_ic = average_ic(indices, m, length);
            KeyLengthScore {
                length,
                average_ic,
                distance: (average_ic - target_ic).abs(),
            }
        })
        .sorted_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
                .then(a.length.cmp(&b.length))
        })
        .collect()
}

/// The first `count` ranked lengths, plus every later one whose distance is
/// within `tolerance` of the last one taken.
pub fn select_key_lengths(ranked: &[KeyLengthScore], count: usize, tolerance: f64) -> Vec<usize> {
    let count = count.max(1).min(ranked.len());
    let Some(cutoff) = ranked.get(count.wrapping_sub(1)).map(|s| s.distance) else {
        return Vec::new();
    };
    ranked
        .iter()
        .enumerate()
        .take_while(|(i, s)| *i < count || s.distance <= cutoff + tolerance)
        .map(|(_, s)| s.length)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct KasiskiReport {
    /// Repeated sequence -> distances between its consecutive occurrences.
    pub spacings: FnvHashMap<Vec<u8>, Vec<usize>>,
    /// `(factor, number of spacings divisible by it)`, most common first.
    pub factor_counts: Vec<(usize, usize)>,
}

impl KasiskiReport {
    /// Factors ordered by how many spacings they divide.
    pub fn suggested_lengths(&self) -> Vec<usize> {
        self.factor_counts.iter().map(|&(f, _)| f).collect()
    }
}

/// Finds sequences of 3 to 5 symbols that occur more than once and tallies
/// the factors `2..=max_factor` of their spacings.
///
/// One pass per sequence length indexes every window by its start positions,
/// so the cost is linear in the text length.
pub fn kasiski(indices: &[u8], max_factor: usize) -> KasiskiReport {
    let mut spacings: FnvHashMap<Vec<u8>, Vec<usize>> = FnvHashMap::default();

    for seq_len in KASISKI_MIN_LEN..=KASISKI_MAX_LEN {
        if indices.len() < 2 * seq_len {
            break;
        }
        let mut positions: FnvHashMap<&[u8], Vec<usize>> = FnvHashMap::default();
        for (i, window) in indices.windows(seq_len).enumerate() {
            positions.entry(window).or_default().push(i);
        }
        for (seq, starts) in positions {
            if starts.len() < 2 {
                continue;
            }
            // distance from each occurrence to the next one
            let gaps = starts.iter().tuple_windows().map(|(a, b)| b - a).collect();
            spacings.insert(seq.to_vec(), gaps);
        }
    }

    let mut tally: FnvHashMap<usize, usize> = FnvHashMap::default();
    for &spacing in spacings.values().flatten() {
        for f in 2..=max_factor {
            if spacing % f == 0 {
                *tally.entry(f).or_default() += 1;
            }
        }
    }
    let factor_counts = tally
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .collect();

    KasiskiReport {
        spacings,
        factor_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ic_uniform_and_constant() {
        let constant = vec![3u8; 50];
        assert_eq!(index_of_coincidence(&constant, 26), 1.0);
        let all: Vec<u8> = (0..26).collect();
        assert_eq!(index_of_coincidence(&all, 26), 0.0);
        assert_eq!(index_of_coincidence(&[1], 26), 0.0);
    }

    #[test]
    fn test_split_blocks_interleaves() {
        let blocks = split_blocks(&[0, 1, 2, 3, 4, 5, 6], 3);
        assert_eq!(blocks, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn test_frequency_order_ties_by_index() {
        assert_eq!(frequency_order(&[2, 1, 1, 2, 0], 4), vec![1, 2, 0]);
    }

    #[test]
    fn test_select_includes_near_ties() {
        let ranked = vec![
            KeyLengthScore { length: 6, average_ic: 0.066, distance: 0.002 },
            KeyLengthScore { length: 12, average_ic: 0.064, distance: 0.004 },
            KeyLengthScore { length: 3, average_ic: 0.058, distance: 0.010 },
            KeyLengthScore { length: 9, average_ic: 0.057, distance: 0.011 },
            KeyLengthScore { length: 2, average_ic: 0.040, distance: 0.028 },
        ];
        assert_eq!(select_key_lengths(&ranked, 3, 0.002), vec![6, 12, 3, 9]);
        assert_eq!(select_key_lengths(&ranked, 3, 0.0), vec![6, 12, 3]);
        assert!(select_key_lengths(&[], 3, 0.1).is_empty());
    }

    #[test]
    fn test_kasiski_finds_period() {
        // "abcxyabcxyabc": "abc" repeats every 5 symbols
        let text = [0u8, 1, 2, 23, 24, 0, 1, 2, 23, 24, 0, 1, 2];
        let report = kasiski(&text, 10);
        assert_eq!(report.spacings.get(&vec![0u8, 1, 2]), Some(&vec![5, 5]));
        assert_eq!(report.suggested_lengths()[0], 5);
    }
}
