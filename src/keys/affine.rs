use super::{CipherKey, KeyKind};
use crate::alphabet::Alphabet;
use crate::error::{QbResult, QuadbreakError};

pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Multiplicative inverse of `a` modulo `m` by trial search over `[1, m)`.
/// `None` whenever `gcd(a, m) != 1`.
pub fn mod_inverse(a: usize, m: usize) -> Option<usize> {
    if m == 0 {
        return None;
    }
    let a = a % m;
    (1..m).find(|&x| (a * x) % m == 1)
}

/// Affine key: plaintext `x` encrypts to `(a*x + b) mod m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffineKey {
    a: usize,
    b: usize,
    a_inv: usize,
    m: usize,
}

impl AffineKey {
    pub fn new(a: usize, b: usize, m: usize) -> QbResult<Self> {
        if a == 0 || a >= m {
            return Err(QuadbreakError::InvalidKey(format!(
                "affine a={} must lie in [1, {})",
                a, m
            )));
        }
        if b >= m {
            return Err(QuadbreakError::InvalidKey(format!(
                "affine b={} must lie in [0, {})",
                b, m
            )));
        }
        let a_inv = mod_inverse(a, m).ok_or_else(|| {
            QuadbreakError::InvalidKey(format!("a={} has no inverse modulo {}", a, m))
        })?;
        Ok(Self { a, b, a_inv, m })
    }

    /// Every valid key for modulus `m`, `a` ascending then `b` ascending.
    pub fn all(m: usize) -> Vec<AffineKey> {
        (1..m)
            .filter_map(|a| mod_inverse(a, m).map(|a_inv| (a, a_inv)))
            .flat_map(|(a, a_inv)| (0..m).map(move |b| AffineKey { a, b, a_inv, m }))
            .collect()
    }

    pub fn a(&self) -> usize {
        self.a
    }

    pub fn b(&self) -> usize {
        self.b
    }

    pub fn a_inv(&self) -> usize {
        self.a_inv
    }
}

impl CipherKey for AffineKey {
    fn kind(&self) -> KeyKind {
        KeyKind::Affine
    }

    fn modulus(&self) -> usize {
        self.m
    }

    #[inline(always)]
    fn decrypt_symbol(&self, _pos: usize, c: u8) -> u8 {
        ((self.a_inv * (c as usize + self.m - self.b)) % self.m) as u8
    }

    #[inline(always)]
    fn encrypt_symbol(&self, _pos: usize, p: u8) -> u8 {
        ((self.a * p as usize + self.b) % self.m) as u8
    }

    fn describe(&self, _alphabet: &Alphabet) -> String {
        format!("a={}, b={}", self.a, self.b)
    }
}
