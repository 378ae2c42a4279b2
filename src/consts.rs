/// Largest alphabet the bit-packed quadgram window supports (5 bits per symbol).
pub const MAX_ALPHABET_SIZE: usize = 32;

/// Number of symbols in one scored window.
pub const QUADGRAM_LEN: usize = 4;

/// Every score is divided by this after averaging, so that search fitness and
/// the reporting metadata live on the same scale.
pub const NORMALIZATION: f64 = 10.0;

/// Contribution of a quadgram whose packed index falls outside the table.
pub const OUT_OF_TABLE_PENALTY: f64 = -10.0;

/// Sentinel in the ASCII lookup for "not an alphabet symbol".
pub const SYMBOL_NOT_FOUND: u8 = 255;

/// Expected Index of Coincidence of English plaintext.
pub const ENGLISH_IC: f64 = 0.068;

/// English letters from most to least frequent.
pub const ENGLISH_FREQUENCY_ORDER: &str = "etaoinshrdlcumwfgypbvkjxqz";

/// Lengths of the repeated sequences considered by Kasiski examination.
pub const KASISKI_MIN_LEN: usize = 3;
pub const KASISKI_MAX_LEN: usize = 5;

/// Forced moves applied to the best key when a search stagnates.
pub const DEFAULT_PERTURBATION_MOVES: usize = 5;

/// Default size of a result set.
pub const DEFAULT_TOP_K: usize = 5;
