pub mod affine;
pub mod substitution;
pub mod vigenere;

pub use self::affine::{gcd, mod_inverse, AffineKey};
pub use self::substitution::SubstitutionKey;
pub use self::vigenere::VigenereKey;

use crate::alphabet::Alphabet;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum KeyKind {
    Substitution,
    Affine,
    Vigenere,
}

/// A classical cipher key acting on symbol indices.
///
/// Implementors only supply the per-symbol maps; `pos` counts alphabet
/// symbols only, so punctuation never advances a periodic key.
pub trait CipherKey: Clone + Send + Sync {
    fn kind(&self) -> KeyKind;

    /// Size of the alphabet the key is defined over.
    fn modulus(&self) -> usize;

    fn decrypt_symbol(&self, pos: usize, c: u8) -> u8;

    fn encrypt_symbol(&self, pos: usize, p: u8) -> u8;

    /// Human-readable form using `alphabet` symbols.
    fn describe(&self, alphabet: &Alphabet) -> String;

    /// Decrypts into a reusable buffer.
    fn decrypt_into(&self, cipher: &[u8], out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            cipher
                .iter()
                .enumerate()
                .map(|(pos, &c)| self.decrypt_symbol(pos, c)),
        );
    }

    fn decrypt_indices(&self, cipher: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(cipher.len());
        self.decrypt_into(cipher, &mut out);
        out
    }

    fn encrypt_indices(&self, plain: &[u8]) -> Vec<u8> {
        plain
            .iter()
            .enumerate()
            .map(|(pos, &p)| self.encrypt_symbol(pos, p))
            .collect()
    }

    /// Decrypts `text`, keeping case and passing non-alphabet characters through.
    fn decrypt(&self, text: &str, alphabet: &Alphabet) -> String {
        alphabet.transform(text, |pos, c| self.decrypt_symbol(pos, c))
    }

    fn encrypt(&self, text: &str, alphabet: &Alphabet) -> String {
        alphabet.transform(text, |pos, p| self.encrypt_symbol(pos, p))
    }
}

/// Keys that local search can walk through.
pub trait Neighbor: CipherKey {
    /// One minimal random perturbation of `self`.
    fn neighbor(&self, rng: &mut fastrand::Rng) -> Self;

    /// A fresh uniformly random key of the same shape.
    fn randomize(&self, rng: &mut fastrand::Rng) -> Self;
}

/// Any supported key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Substitution(SubstitutionKey),
    Affine(AffineKey),
    Vigenere(VigenereKey),
}

impl Key {
    /// A neighboring key, or `None` for affine keys, which are only ever
    /// enumerated exhaustively.
    pub fn neighbor(&self, rng: &mut fastrand::Rng) -> Option<Key> {
        match self {
            Key::Substitution(k) => Some(Key::Substitution(k.neighbor(rng))),
            Key::Vigenere(k) => Some(Key::Vigenere(k.neighbor(rng))),
            Key::Affine(_) => None,
        }
    }
}

macro_rules! delegate {
    ($self:ident, $k:ident => $e:expr) => {
        match $self {
            Key::Substitution($k) => $e,
            Key::Affine($k) => $e,
            Key::Vigenere($k) => $e,
        }
    };
}

impl CipherKey for Key {
    fn kind(&self) -> KeyKind {
        delegate!(self, k => k.kind())
    }

    fn modulus(&self) -> usize {
        delegate!(self, k => k.modulus())
    }

    #[inline]
    fn decrypt_symbol(&self, pos: usize, c: u8) -> u8 {
        delegate!(self, k => k.decrypt_symbol(pos, c))
    }

    #[inline]
    fn encrypt_symbol(&self, pos: usize, p: u8) -> u8 {
        delegate!(self, k => k.encrypt_symbol(pos, p))
    }

    fn describe(&self, alphabet: &Alphabet) -> String {
        delegate!(self, k => k.describe(alphabet))
    }
}

impl From<SubstitutionKey> for Key {
    fn from(k: SubstitutionKey) -> Self {
        Key::Substitution(k)
    }
}

impl From<AffineKey> for Key {
    fn from(k: AffineKey) -> Self {
        Key::Affine(k)
    }
}

impl From<VigenereKey> for Key {
    fn from(k: VigenereKey) -> Self {
        Key::Vigenere(k)
    }
}
