use crate::alphabet::Alphabet;
use crate::analysis;
use crate::consts::ENGLISH_FREQUENCY_ORDER;
use crate::keys::{Neighbor, SubstitutionKey};
use fastrand::Rng;

/// Alphabet indices in expected plaintext frequency order. Symbols the
/// language order does not mention follow in alphabet order.
pub fn language_order(alphabet: &Alphabet) -> Vec<u8> {
    let mut order: Vec<u8> = ENGLISH_FREQUENCY_ORDER
        .bytes()
        .filter_map(|b| alphabet.index_of_byte(b))
        .collect();
    for idx in 0..alphabet.len() as u8 {
        if !order.contains(&idx) {
            order.push(idx);
        }
    }
    order
}

/// Substitution key that sends the `r`-th most frequent ciphertext symbol to
/// the `r`-th most frequent plaintext symbol of `language`.
///
/// Ciphertext symbols that never occur take the leftover images in order.
pub fn frequency_seeded_key(cipher: &[u8], m: usize, language: &[u8]) -> SubstitutionKey {
    let mut images = vec![u8::MAX; m];
    let mut used = vec![false; m];

    let ranked = analysis::frequency_order(cipher, m);
    for (&c, &p) in ranked.iter().zip(language.iter()) {
        if (p as usize) < m && !used[p as usize] {
            images[c as usize] = p;
            used[p as usize] = true;
        }
    }

    let mut leftovers = (0..m as u8).filter(|&p| !used[p as usize]);
    for slot in images.iter_mut().filter(|s| **s == u8::MAX) {
        if let Some(p) = leftovers.next() {
            *slot = p;
        }
    }

    // Every slot is filled from disjoint pools, so this is a permutation.
    SubstitutionKey::new(images).unwrap_or_else(|_| SubstitutionKey::identity(m))
}

/// Applies `moves` successive neighbor steps to `key`.
pub fn perturb<K: Neighbor>(key: &K, moves: usize, rng: &mut Rng) -> K {
    let mut next = key.clone();
    for _ in 0..moves {
        next = next.neighbor(rng);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::CipherKey;

    #[test]
    fn test_language_order_covers_alphabet() {
        let order = language_order(&Alphabet::english());
        assert_eq!(order.len(), 26);
        assert_eq!(order[0], 4); // 'e'
        let small = Alphabet::new("xyzab").unwrap();
        let order = language_order(&small);
        // a, y, b, x, z
        assert_eq!(order, vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn test_frequency_seed_maps_most_common_to_e() {
        let alphabet = Alphabet::english();
        // 'q' is the most frequent ciphertext symbol
        let cipher = alphabet.encode("qqqqqxxxab");
        let key = frequency_seeded_key(&cipher, 26, &language_order(&alphabet));
        assert_eq!(key.decrypt_symbol(0, 16), 4);
        assert_eq!(key.decrypt_symbol(0, 23), 19); // 't'
        assert_eq!(key.modulus(), 26);
    }
}
