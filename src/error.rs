//! Error Types
//!
//! Construction errors are fatal; query errors cover the degenerate
//! compositions that would otherwise divide by zero.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dimension mismatch: expected {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Subword vector table should contain a vector for \"__eps__\"")]
    MissingSentinel,

    #[error("At least one of the word or subword vector tables is required")]
    NoTableProvided,

    #[error("Invalid n-gram range: minn={min_n}, maxn={max_n} (need 1 <= minn <= maxn)")]
    InvalidNgramRange { min_n: usize, max_n: usize },

    #[error("No vector contributed to the composition of {word:?}")]
    NoContribution { word: String },

    #[error("Vector for {word:?} has zero norm")]
    ZeroNorm { word: String },

    #[error("Similarity of {w1:?} and {w2:?} is not finite")]
    NonFiniteSimilarity { w1: String, w2: String },
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;
