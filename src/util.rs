use crate::consts::QUADGRAM_LEN;
use crate::error::{QbResult, QuadbreakError};
use rayon::ThreadPool;

/// Dedicated rayon pool; `num_threads == 0` lets rayon pick one per core.
pub fn build_pool(num_threads: usize) -> QbResult<ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| QuadbreakError::Config(format!("worker pool: {}", e)))
}

/// Rejects ciphertexts that cannot form a single quadgram.
pub fn ensure_scorable(cipher: &[u8]) -> QbResult<()> {
    if cipher.len() < QUADGRAM_LEN {
        return Err(QuadbreakError::InsufficientLength {
            found: cipher.len(),
        });
    }
    Ok(())
}
