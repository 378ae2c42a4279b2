use super::{CipherKey, KeyKind, Neighbor};
use crate::alphabet::Alphabet;
use crate::error::{QbResult, QuadbreakError};

/// Repeating-shift key. Plaintext index = `(c - shifts[pos % L]) mod m`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VigenereKey {
    shifts: Vec<u8>,
    m: usize,
}

impl VigenereKey {
    pub fn new(shifts: Vec<u8>, m: usize) -> QbResult<Self> {
        if shifts.is_empty() {
            return Err(QuadbreakError::InvalidKey(
                "vigenere key must have at least one symbol".to_string(),
            ));
        }
        if let Some(&bad) = shifts.iter().find(|&&s| s as usize >= m) {
            return Err(QuadbreakError::InvalidKey(format!(
                "shift {} out of range for modulus {}",
                bad, m
            )));
        }
        Ok(Self { shifts, m })
    }

    pub fn from_word(word: &str, alphabet: &Alphabet) -> QbResult<Self> {
        let shifts = word
            .chars()
            .map(|c| {
                alphabet.index_of(c).ok_or_else(|| {
                    QuadbreakError::InvalidKey(format!("'{}' is not in the alphabet", c))
                })
            })
            .collect::<QbResult<Vec<u8>>>()?;
        Self::new(shifts, alphabet.len())
    }

    pub fn random(len: usize, m: usize, rng: &mut fastrand::Rng) -> Self {
        let shifts = (0..len.max(1)).map(|_| rng.u8(0..m as u8)).collect();
        Self { shifts, m }
    }

    pub fn shifts(&self) -> &[u8] {
        &self.shifts
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

impl CipherKey for VigenereKey {
    fn kind(&self) -> KeyKind {
        KeyKind::Vigenere
    }

    fn modulus(&self) -> usize {
        self.m
    }

    #[inline(always)]
    fn decrypt_symbol(&self, pos: usize, c: u8) -> u8 {
        let k = self.shifts[pos % self.shifts.len()] as usize;
        ((c as usize + self.m - k) % self.m) as u8
    }

    #[inline(always)]
    fn encrypt_symbol(&self, pos: usize, p: u8) -> u8 {
        let k = self.shifts[pos % self.shifts.len()] as usize;
        ((p as usize + k) % self.m) as u8
    }

    fn describe(&self, alphabet: &Alphabet) -> String {
        alphabet.decode(&self.shifts).to_uppercase()
    }
}

impl Neighbor for VigenereKey {
    /// Replaces one key position with a different symbol.
    fn neighbor(&self, rng: &mut fastrand::Rng) -> Self {
        let mut next = self.clone();
        if self.m < 2 {
            return next;
        }
        let pos = rng.usize(0..self.shifts.len());
        let old = self.shifts[pos];
        let mut new = rng.u8(0..(self.m - 1) as u8);
        if new >= old {
            new += 1;
        }
        next.shifts[pos] = new;
        next
    }

    fn randomize(&self, rng: &mut fastrand::Rng) -> Self {
        Self::random(self.shifts.len(), self.m, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_skips_punctuation() {
        let alphabet = Alphabet::english();
        let key = VigenereKey::from_word("ab", &alphabet).unwrap();
        assert_eq!(key.encrypt("aa, aa", &alphabet), "ab, ab");
        assert_eq!(key.decrypt("Ab, ab", &alphabet), "Aa, aa");
    }

    #[test]
    fn test_neighbor_changes_one_position() {
        let mut rng = fastrand::Rng::with_seed(9);
        let key = VigenereKey::random(6, 26, &mut rng);
        for _ in 0..100 {
            let next = key.neighbor(&mut rng);
            let diff = key
                .shifts()
                .iter()
                .zip(next.shifts())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(diff, 1);
        }
    }
}
