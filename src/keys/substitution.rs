use super::{CipherKey, KeyKind, Neighbor};
use crate::alphabet::Alphabet;
use crate::error::{QbResult, QuadbreakError};

/// Monoalphabetic substitution: `images[c]` is the plaintext symbol for
/// ciphertext symbol `c`. Always a permutation of `0..m`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubstitutionKey {
    images: Vec<u8>,
    inverse: Vec<u8>,
}

impl SubstitutionKey {
    pub fn new(images: Vec<u8>) -> QbResult<Self> {
        let m = images.len();
        if m == 0 {
            return Err(QuadbreakError::InvalidKey(
                "substitution key is empty".to_string(),
            ));
        }
        let mut inverse = vec![u8::MAX; m];
        for (c, &p) in images.iter().enumerate() {
            if p as usize >= m || inverse[p as usize] != u8::MAX {
                return Err(QuadbreakError::InvalidKey(format!(
                    "substitution images are not a permutation of 0..{}",
                    m
                )));
            }
            inverse[p as usize] = c as u8;
        }
        Ok(Self { images, inverse })
    }

    pub fn identity(m: usize) -> Self {
        let images: Vec<u8> = (0..m as u8).collect();
        Self {
            inverse: images.clone(),
            images,
        }
    }

    pub fn random(m: usize, rng: &mut fastrand::Rng) -> Self {
        let mut images: Vec<u8> = (0..m as u8).collect();
        rng.shuffle(&mut images);
        Self::from_permutation(images)
    }

    /// Parses a key written as the plaintext image of each alphabet symbol
    /// in alphabet order, e.g. `"qwertyuiopasdfghjklzxcvbnm"`.
    pub fn parse(images: &str, alphabet: &Alphabet) -> QbResult<Self> {
        let encoded: Vec<u8> = images
            .chars()
            .map(|c| {
                alphabet.index_of(c).ok_or_else(|| {
                    QuadbreakError::InvalidKey(format!("'{}' is not in the alphabet", c))
                })
            })
            .collect::<QbResult<_>>()?;
        if encoded.len() != alphabet.len() {
            return Err(QuadbreakError::InvalidKey(format!(
                "substitution key needs {} symbols, got {}",
                alphabet.len(),
                encoded.len()
            )));
        }
        Self::new(encoded)
    }

    fn from_permutation(images: Vec<u8>) -> Self {
        let mut inverse = vec![0; images.len()];
        for (c, &p) in images.iter().enumerate() {
            inverse[p as usize] = c as u8;
        }
        Self { images, inverse }
    }

    pub fn images(&self) -> &[u8] {
        &self.images
    }

    /// The key that undoes this one.
    pub fn inverse(&self) -> SubstitutionKey {
        Self {
            images: self.inverse.clone(),
            inverse: self.images.clone(),
        }
    }

    /// Exchanges the plaintext images of ciphertext symbols `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.images.swap(a, b);
        self.inverse[self.images[a] as usize] = a as u8;
        self.inverse[self.images[b] as usize] = b as u8;
    }
}

impl CipherKey for SubstitutionKey {
    fn kind(&self) -> KeyKind {
        KeyKind::Substitution
    }

    fn modulus(&self) -> usize {
        self.images.len()
    }

    #[inline(always)]
    fn decrypt_symbol(&self, _pos: usize, c: u8) -> u8 {
        self.images[c as usize]
    }

    #[inline(always)]
    fn encrypt_symbol(&self, _pos: usize, p: u8) -> u8 {
        self.inverse[p as usize]
    }

    fn describe(&self, alphabet: &Alphabet) -> String {
        alphabet.decode(&self.images)
    }
}

impl Neighbor for SubstitutionKey {
    fn neighbor(&self, rng: &mut fastrand::Rng) -> Self {
        let mut next = self.clone();
        let m = self.images.len();
        if m < 2 {
            return next;
        }
        let a = rng.usize(0..m);
        let mut b = rng.usize(0..m - 1);
        if b >= a {
            b += 1;
        }
        next.swap(a, b);
        next
    }

    fn randomize(&self, rng: &mut fastrand::Rng) -> Self {
        Self::random(self.images.len(), rng)
    }
}
