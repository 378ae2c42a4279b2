mod common;

use common::*;
use quadbreak::alphabet::Alphabet;
use quadbreak::config::Config;
use quadbreak::keys::{AffineKey, CipherKey, Key, KeyKind};
use quadbreak::{Cracker, Scorer, Solution};
use std::str::FromStr;
use strum::IntoEnumIterator;

fn cracker() -> Cracker {
    let mut config = Config::default();
    config.search.seed = Some(5);
    config.search.worker_count = 2;
    config.search.max_iterations = 2_000;
    config.search.restarts = 2;
    config.vigenere.max_candidate_keys = 20_000;
    Cracker::new(Scorer::clone(&english_scorer()), config).unwrap()
}

#[test]
fn test_solve_affine() {
    let alphabet = Alphabet::english();
    let ciphertext = AffineKey::new(7, 3, 26).unwrap().encrypt(HELD_OUT, &alphabet);

    let solution = cracker().solve(KeyKind::Affine, &ciphertext).unwrap();
    assert_eq!(solution.kind, KeyKind::Affine);
    assert_eq!(solution.key, "a=7, b=3");
    assert_eq!(solution.plaintext, HELD_OUT);
    assert_eq!(solution.fitness, cracker().score(HELD_OUT).unwrap());
}

#[test]
fn test_crack_vigenere_through_facade() {
    let results = cracker().crack(KeyKind::Vigenere, VIGENERE_SAMPLE).unwrap();
    let best = results.best().unwrap();
    assert!(matches!(best.key, Key::Vigenere(_)));
    assert_eq!(best.key.kind(), KeyKind::Vigenere);
    assert!(best.plaintext.to_lowercase().starts_with("ilearned"));
}

#[test]
fn test_crack_substitution_fitness_matches_plaintext() {
    let c = cracker();
    let results = c.crack_substitution(SUBSTITUTION_SAMPLE).unwrap();
    assert!(!results.is_empty());
    assert!(results.len() <= c.config().search.top_k);
    let best = results.best().unwrap();
    assert_eq!(best.fitness, c.score(&best.plaintext).unwrap());
}

#[test]
fn test_key_kind_parsing() {
    assert_eq!(KeyKind::from_str("affine").unwrap(), KeyKind::Affine);
    assert_eq!(KeyKind::from_str("Vigenere").unwrap(), KeyKind::Vigenere);
    assert_eq!(KeyKind::from_str("SUBSTITUTION").unwrap(), KeyKind::Substitution);
    assert!(KeyKind::from_str("playfair").is_err());
    assert_eq!(KeyKind::Affine.to_string(), "affine");
}

#[test]
fn test_every_kind_round_trips_through_its_name() {
    let kinds: Vec<KeyKind> = KeyKind::iter().collect();
    assert_eq!(kinds.len(), 3);
    for kind in kinds {
        assert_eq!(KeyKind::from_str(&kind.to_string()).unwrap(), kind);
    }
}

#[test]
fn test_too_short_input_fails_for_every_kind() {
    let c = cracker();
    for kind in KeyKind::iter() {
        assert!(c.crack(kind, "ab!").is_err(), "{} accepted 2 symbols", kind);
    }
}

#[test]
fn test_solution_serializes_camel_case() {
    let solution = Solution {
        kind: KeyKind::Vigenere,
        key: "CRYPTO".to_string(),
        fitness: -0.47,
        plaintext: "hello".to_string(),
    };
    let json = serde_json::to_value(&solution).unwrap();
    assert_eq!(json["key"], "CRYPTO");
    assert_eq!(json["plaintext"], "hello");
    let back: Solution = serde_json::from_value(json).unwrap();
    assert_eq!(back, solution);
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let mut config = Config::default();
    config.search.top_k = 0;
    assert!(Cracker::new(Scorer::clone(&english_scorer()), config).is_err());
}
