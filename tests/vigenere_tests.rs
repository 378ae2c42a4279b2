mod common;

use common::*;
use quadbreak::alphabet::Alphabet;
use quadbreak::config::{SearchParams, VigenereParams};
use quadbreak::keys::{CipherKey, VigenereKey};
use quadbreak::results::ResultSet;
use quadbreak::search::VigenereSearch;
use quadbreak::util;
use rstest::rstest;

fn search(max_candidate_keys: usize) -> VigenereSearch {
    let params = VigenereParams {
        max_candidate_keys,
        ..VigenereParams::default()
    };
    let search = SearchParams {
        seed: Some(1),
        worker_count: 2,
        ..SearchParams::default()
    };
    VigenereSearch::new(english_scorer(), params, search)
}

#[test]
fn test_sample_is_broken() {
    let alphabet = Alphabet::english();
    let truth = VigenereKey::from_word("crypto", &alphabet).unwrap();
    let expected = truth.decrypt(VIGENERE_SAMPLE, &alphabet);

    let results = search(20_000).run(VIGENERE_SAMPLE).unwrap();
    let best = results.best().unwrap();

    assert_eq!(best.plaintext, expected);
    // any repetition of the true key decrypts identically
    let found = best.key.describe(&alphabet);
    assert_eq!(found.len() % 6, 0);
    assert_eq!(found, "CRYPTO".repeat(found.len() / 6));
}

#[test]
fn test_candidates_cover_most_true_shifts() {
    let alphabet = Alphabet::english();
    let truth = VigenereKey::from_word("crypto", &alphabet).unwrap();
    let cipher = alphabet.encode(VIGENERE_SAMPLE);

    let candidates = search(500_000).candidate_shifts(&cipher, 6, 5);
    assert_eq!(candidates.len(), 6);
    assert!(candidates.iter().all(|c| c.len() == 5));

    let covered = candidates
        .iter()
        .zip(truth.shifts())
        .filter(|(c, s)| c.contains(s))
        .count();
    assert!(covered >= 5, "only {} of 6 positions covered", covered);
}

#[test]
fn test_refine_repairs_one_wrong_position() {
    let alphabet = Alphabet::english();
    let cipher = alphabet.encode(VIGENERE_SAMPLE);
    let almost = VigenereKey::from_word("crypao", &alphabet).unwrap();

    let (key, fitness) = search(500_000).refine(&cipher, almost);
    assert_eq!(key.describe(&alphabet), "CRYPTO");
    assert!(fitness.is_finite());
}

#[test]
fn test_candidate_evaluation_is_order_stable() {
    let alphabet = Alphabet::english();
    let cipher = alphabet.encode(VIGENERE_SAMPLE);
    let s = search(20_000);
    let candidates = s.candidate_shifts(&cipher, 6, 4);
    let empty = ResultSet::new(10).unwrap();

    let ranked_on = |threads: usize| -> Vec<(u64, Vec<u8>)> {
        let pool = util::build_pool(threads).unwrap();
        pool.install(|| s.evaluate_candidates(VIGENERE_SAMPLE, &cipher, &candidates, &empty))
            .iter()
            .map(|c| (c.fitness.to_bits(), c.key.shifts().to_vec()))
            .collect()
    };

    let single = ranked_on(1);
    assert_eq!(single.len(), 10);
    for threads in [2, 4, 8] {
        assert_eq!(ranked_on(threads), single, "{} workers", threads);
    }
}

#[rstest]
#[case(1, 20_000, 5)]
#[case(6, 20_000, 5)]
#[case(9, 20_000, 3)]
#[case(12, 20_000, 2)]
#[case(30, 20_000, 1)]
#[case(6, 1, 1)]
fn test_breadth_respects_product_cap(
    #[case] length: usize,
    #[case] cap: usize,
    #[case] expected: usize,
) {
    let s = search(cap);
    let breadth = s.breadth_for(length);
    assert_eq!(breadth, expected);
    if breadth > 1 {
        assert!(breadth.pow(length as u32) <= cap);
    }
}

#[test]
fn test_short_ciphertext_rejected() {
    assert!(search(20_000).run("ab").is_err());
}
