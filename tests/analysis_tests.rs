mod common;

use common::*;
use quadbreak::alphabet::Alphabet;
use quadbreak::analysis;
use quadbreak::consts::ENGLISH_IC;
use quadbreak::keys::{CipherKey, VigenereKey};
use std::time::{Duration, Instant};

#[test]
fn test_english_ic_is_near_reference() {
    let alphabet = Alphabet::english();
    let ic = analysis::index_of_coincidence(&alphabet.encode(CORPUS), 26);
    assert!((ic - ENGLISH_IC).abs() < 0.01, "corpus IC {}", ic);
}

#[test]
fn test_vigenere_sample_ranks_true_length() {
    let alphabet = Alphabet::english();
    let cipher = alphabet.encode(VIGENERE_SAMPLE);
    let ranked = analysis::rank_key_lengths(&cipher, 26, 16, ENGLISH_IC);

    assert_eq!(ranked.len(), 16);
    let top: Vec<usize> = ranked.iter().take(3).map(|s| s.length).collect();
    assert!(top.contains(&6), "top lengths {:?}", top);
    assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn test_selection_adds_near_ties() {
    let ranked: Vec<analysis::KeyLengthScore> = [(6, 0.001), (12, 0.002), (3, 0.010), (9, 0.011), (2, 0.05)]
        .iter()
        .map(|&(length, distance)| analysis::KeyLengthScore {
            length,
            average_ic: ENGLISH_IC - distance,
            distance,
        })
        .collect();
    assert_eq!(analysis::select_key_lengths(&ranked, 3, 0.002), vec![6, 12, 3, 9]);
    assert_eq!(analysis::select_key_lengths(&ranked, 2, 0.0), vec![6, 12]);
    assert!(analysis::select_key_lengths(&[], 3, 0.1).is_empty());
}

#[test]
fn test_rank_clamps_to_text_length() {
    let ranked = analysis::rank_key_lengths(&[0, 1, 2, 3, 4], 26, 16, ENGLISH_IC);
    assert_eq!(ranked.len(), 5);
}

#[test]
fn test_kasiski_points_at_key_length() {
    let alphabet = Alphabet::english();
    let cipher = alphabet.encode(VIGENERE_SAMPLE);
    let report = analysis::kasiski(&cipher, 16);

    assert!(!report.spacings.is_empty());
    let top: Vec<usize> = report.suggested_lengths().into_iter().take(3).collect();
    assert!(top.contains(&6), "kasiski suggests {:?}", top);
}

#[test]
fn test_frequency_order_breaks_ties_by_index() {
    // b:3, a:2, c:2, d:1
    let order = analysis::frequency_order(&[1, 0, 2, 1, 3, 2, 1, 0], 26);
    assert_eq!(order, vec![1, 0, 2, 3]);
}

#[test]
fn test_kasiski_stays_linear_on_long_text() {
    let alphabet = Alphabet::english();
    let key = VigenereKey::from_word("crypto", &alphabet).unwrap();
    let plain = alphabet.encode(&CORPUS.repeat(8));
    let cipher = key.encrypt_indices(&plain);
    assert!(cipher.len() > 35_000);

    let start = Instant::now();
    let report = analysis::kasiski(&cipher, 16);
    let elapsed = start.elapsed();

    assert!(elapsed < Duration::from_secs(3), "kasiski took {:?}", elapsed);
    let top: Vec<usize> = report.suggested_lengths().into_iter().take(3).collect();
    assert!(top.contains(&6), "kasiski suggests {:?}", top);
    // spacings are gaps between consecutive occurrences
    assert!(report
        .spacings
        .values()
        .all(|gaps| !gaps.is_empty() && gaps.iter().all(|&g| g > 0)));
}
