use crate::alphabet::Alphabet;
use crate::consts::{NORMALIZATION, OUT_OF_TABLE_PENALTY, QUADGRAM_LEN};
use crate::error::{QbResult, QuadbreakError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Descriptive statistics of a quadgram table. Reporting only; the search
/// never reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub nbr_quadgrams: u64,
    pub most_frequent_quadgram: String,
    /// Already divided by the normalization constant.
    pub average_fitness: f64,
    /// Already divided by the normalization constant.
    pub max_fitness: f64,
}

/// Immutable quadgram table, stored in the bit-packed layout the rolling
/// window produces: index = `i0 << 3b | i1 << 2b | i2 << b | i3` with
/// `b = alphabet.bits_per_symbol()`.
#[derive(Debug, Clone)]
pub struct QuadgramModel {
    alphabet: Alphabet,
    bits: u32,
    table: Vec<f64>,
    info: ModelInfo,
}

impl QuadgramModel {
    /// Builds a model from a dense table with `m^4` entries in base-`m` order.
    pub fn from_dense(alphabet: Alphabet, dense: &[f64]) -> QbResult<Self> {
        let m = alphabet.len();
        let expected = m.pow(QUADGRAM_LEN as u32);
        if dense.len() != expected {
            return Err(QuadbreakError::Validation(format!(
                "dense table for {} symbols needs {} entries, got {}",
                m,
                expected,
                dense.len()
            )));
        }

        let bits = alphabet.bits_per_symbol();
        let mut table = vec![OUT_OF_TABLE_PENALTY; 1usize << (QUADGRAM_LEN as u32 * bits)];
        for (dense_idx, &value) in dense.iter().enumerate() {
            let (i0, i1, i2, i3) = split_base(dense_idx, m);
            table[pack(bits, i0, i1, i2, i3)] = value;
        }

        let info = summarize(&alphabet, dense);
        debug!(
            "Repacked dense table ({} entries) into {} slots",
            dense.len(),
            table.len()
        );
        Ok(Self {
            alphabet,
            bits,
            table,
            info,
        })
    }

    /// Builds a model from a table that is already in the packed layout. The
    /// table may be shorter than the full packed space; lookups past its end
    /// score [`OUT_OF_TABLE_PENALTY`].
    pub fn from_packed(alphabet: Alphabet, table: Vec<f64>) -> QbResult<Self> {
        if table.is_empty() {
            return Err(QuadbreakError::Validation(
                "quadgram table is empty".to_string(),
            ));
        }
        let bits = alphabet.bits_per_symbol();
        let m = alphabet.len();

        let mut present = Vec::new();
        for idx in 0..m.pow(QUADGRAM_LEN as u32) {
            let (i0, i1, i2, i3) = split_base(idx, m);
            present.push(
                table
                    .get(pack(bits, i0, i1, i2, i3))
                    .copied()
                    .unwrap_or(OUT_OF_TABLE_PENALTY),
            );
        }
        let info = summarize(&alphabet, &present);

        debug!("Loaded packed table with {} slots", table.len());
        Ok(Self {
            alphabet,
            bits,
            table,
            info,
        })
    }

    /// Replaces the computed statistics with externally supplied ones.
    pub fn with_info(mut self, info: ModelInfo) -> Self {
        self.info = info;
        self
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline(always)]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    #[inline(always)]
    pub fn lookup(&self, packed: usize) -> f64 {
        match self.table.get(packed) {
            Some(&v) => v,
            None => OUT_OF_TABLE_PENALTY,
        }
    }

    /// Contribution of the quadgram spelled by four symbol indices.
    pub fn quadgram_value(&self, q: [u8; 4]) -> f64 {
        self.lookup(pack(
            self.bits,
            q[0] as usize,
            q[1] as usize,
            q[2] as usize,
            q[3] as usize,
        ))
    }
}

#[inline(always)]
fn pack(bits: u32, i0: usize, i1: usize, i2: usize, i3: usize) -> usize {
    (((((i0 << bits) | i1) << bits) | i2) << bits) | i3
}

fn split_base(idx: usize, m: usize) -> (usize, usize, usize, usize) {
    let i3 = idx % m;
    let i2 = (idx / m) % m;
    let i1 = (idx / (m * m)) % m;
    let i0 = idx / (m * m * m);
    (i0, i1, i2, i3)
}

fn summarize(alphabet: &Alphabet, dense: &[f64]) -> ModelInfo {
    let m = alphabet.len();
    let mut max_idx = 0;
    let mut max_val = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for (i, &v) in dense.iter().enumerate() {
        sum += v;
        if v > max_val {
            max_val = v;
            max_idx = i;
        }
    }
    let (i0, i1, i2, i3) = split_base(max_idx, m);
    let most_frequent_quadgram = [i0, i1, i2, i3]
        .iter()
        .map(|&i| alphabet.symbol(i as u8))
        .collect();

    ModelInfo {
        nbr_quadgrams: dense.len() as u64,
        most_frequent_quadgram,
        average_fitness: sum / dense.len().max(1) as f64 / NORMALIZATION,
        max_fitness: max_val / NORMALIZATION,
    }
}
