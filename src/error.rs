use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuadbreakError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Insufficient Length: need at least 4 alphabet symbols, found {found}")]
    InsufficientLength { found: usize },

    #[error("Invalid Key: {0}")]
    InvalidKey(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type QbResult<T> = Result<T, QuadbreakError>;
