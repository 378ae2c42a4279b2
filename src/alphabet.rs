use crate::consts::{MAX_ALPHABET_SIZE, SYMBOL_NOT_FOUND};
use crate::error::{QbResult, QuadbreakError};
use std::fmt;

/// An ordered set of distinct ASCII letters. The position of a symbol is the
/// numeric value every key, table and scorer works with.
///
/// Lookups are case-insensitive; symbols are stored lowercase.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
    lookup: [u8; 128],
}

impl Alphabet {
    pub fn new(symbols: &str) -> QbResult<Self> {
        if symbols.is_empty() {
            return Err(QuadbreakError::InvalidAlphabet(
                "alphabet must not be empty".to_string(),
            ));
        }
        if !symbols.is_ascii() {
            return Err(QuadbreakError::InvalidAlphabet(format!(
                "alphabet '{}' contains non-ASCII symbols",
                symbols
            )));
        }

        let bytes: Vec<u8> = symbols.bytes().map(|b| b.to_ascii_lowercase()).collect();
        if bytes.len() > MAX_ALPHABET_SIZE {
            return Err(QuadbreakError::InvalidAlphabet(format!(
                "alphabet has {} symbols, at most {} are supported",
                bytes.len(),
                MAX_ALPHABET_SIZE
            )));
        }

        let mut seen = [false; 128];
        for &b in &bytes {
            if std::mem::replace(&mut seen[b as usize], true) {
                return Err(QuadbreakError::InvalidAlphabet(format!(
                    "duplicate symbol '{}'",
                    b as char
                )));
            }
        }

        Ok(Self::build(bytes))
    }

    /// The 26-letter Latin alphabet.
    pub fn english() -> Self {
        Self::build((b'a'..=b'z').collect())
    }

    /// Indexes already validated lowercase symbols, both cases.
    fn build(symbols: Vec<u8>) -> Self {
        let mut lookup = [SYMBOL_NOT_FOUND; 128];
        for (i, &b) in symbols.iter().enumerate() {
            lookup[b as usize] = i as u8;
            lookup[b.to_ascii_uppercase() as usize] = i as u8;
        }
        Self { symbols, lookup }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Bits needed to hold one symbol index (at least 1).
    pub fn bits_per_symbol(&self) -> u32 {
        let m = self.symbols.len().max(2);
        usize::BITS - (m - 1).leading_zeros()
    }

    #[inline(always)]
    pub fn index_of(&self, c: char) -> Option<u8> {
        if !c.is_ascii() {
            return None;
        }
        match self.lookup[c as usize] {
            SYMBOL_NOT_FOUND => None,
            idx => Some(idx),
        }
    }

    #[inline(always)]
    pub fn index_of_byte(&self, b: u8) -> Option<u8> {
        if b >= 128 {
            return None;
        }
        match self.lookup[b as usize] {
            SYMBOL_NOT_FOUND => None,
            idx => Some(idx),
        }
    }

    /// Lowercase symbol at `idx`.
    #[inline(always)]
    pub fn symbol(&self, idx: u8) -> char {
        self.symbols[idx as usize] as char
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Indices of every alphabet symbol in `text`, skipping everything else.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.bytes().filter_map(|b| self.index_of_byte(b)).collect()
    }

    pub fn decode(&self, indices: &[u8]) -> String {
        indices.iter().map(|&i| self.symbol(i)).collect()
    }

    /// Renders `idx` in the case of `template`.
    #[inline(always)]
    pub fn symbol_like(&self, idx: u8, template: char) -> char {
        let c = self.symbol(idx);
        if template.is_ascii_uppercase() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Rewrites every alphabet symbol of `text` through `map`, keeping case and
    /// passing other characters through untouched. `map` receives the position
    /// among alphabet symbols and the symbol index.
    pub fn transform<F>(&self, text: &str, mut map: F) -> String
    where
        F: FnMut(usize, u8) -> u8,
    {
        let mut pos = 0;
        text.chars()
            .map(|c| match self.index_of(c) {
                Some(idx) => {
                    let out = self.symbol_like(map(pos, idx), c);
                    pos += 1;
                    out
                }
                None => c,
            })
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alphabet({})", self)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.symbols {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}
