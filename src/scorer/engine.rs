use super::model::QuadgramModel;
use crate::consts::{NORMALIZATION, QUADGRAM_LEN};
use crate::error::{QbResult, QuadbreakError};

/// Mean per-quadgram contribution of a stream of symbol indices, divided by
/// the normalization constant.
///
/// The window is packed with `model.bits()` bits per symbol: the three
/// previous symbols are masked off, shifted up and the new index ORed in, so
/// every symbol costs one mask, one shift and one table read.
#[inline]
pub fn score_stream<I>(model: &QuadgramModel, indices: I) -> QbResult<f64>
where
    I: IntoIterator<Item = u8>,
{
    let bits = model.bits();
    let mask = (1usize << (3 * bits)) - 1;

    let mut window = 0usize;
    let mut seen = 0usize;
    let mut sum = 0.0;
    let mut count = 0usize;

    for idx in indices {
        window = ((window & mask) << bits) | idx as usize;
        seen += 1;
        if seen >= QUADGRAM_LEN {
            sum += model.lookup(window);
            count += 1;
        }
    }

    if count == 0 {
        return Err(QuadbreakError::InsufficientLength { found: seen });
    }

    Ok(sum / count as f64 / NORMALIZATION)
}

/// Scores raw text, skipping every character outside the model's alphabet.
pub fn score_text(model: &QuadgramModel, text: &str) -> QbResult<f64> {
    let alphabet = model.alphabet();
    score_stream(model, text.bytes().filter_map(|b| alphabet.index_of_byte(b)))
}
