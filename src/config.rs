//! Embeddings Configuration

use std::path::PathBuf;

use crate::error::{EmbeddingError, Result};

/// Where to load the vector tables from and how to read them
#[derive(Debug, Clone)]
pub struct EmbeddingsConfig {
    /// Whole-word vector file
    pub word_vectors: Option<PathBuf>,

    /// Character n-gram vector file (headerless, must contain `__eps__`)
    pub ngram_vectors: Option<PathBuf>,

    /// Vector dimension shared by both files
    pub dimension: usize,

    /// Shortest n-gram length
    pub min_n: usize,

    /// Longest n-gram length
    pub max_n: usize,

    /// Whether the word file starts with a `<vocab_size> <dim>` line
    pub word_header: bool,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            word_vectors: None,
            ngram_vectors: None,
            dimension: 300,
            min_n: 3, // fastText defaults
            max_n: 6,
            word_header: true,
        }
    }
}

impl EmbeddingsConfig {
    pub fn with_word_vectors<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.word_vectors = Some(path.into());
        self
    }

    pub fn with_ngram_vectors<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.ngram_vectors = Some(path.into());
        self
    }

    pub fn with_dimension(mut self, dim: usize) -> Self {
        self.dimension = dim;
        self
    }

    /// Set the inclusive n-gram length range
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.min_n = min_n;
        self.max_n = max_n;
        self
    }

    pub fn with_word_header(mut self, has_header: bool) -> Self {
        self.word_header = has_header;
        self
    }

    /// Check the settings before touching any file
    pub fn validate(&self) -> Result<()> {
        if self.word_vectors.is_none() && self.ngram_vectors.is_none() {
            return Err(EmbeddingError::NoTableProvided);
        }
        if self.ngram_vectors.is_some() && (self.min_n == 0 || self.min_n > self.max_n) {
            return Err(EmbeddingError::InvalidNgramRange {
                min_n: self.min_n,
                max_n: self.max_n,
            });
        }
        Ok(())
    }
}
