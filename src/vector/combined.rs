//! Combined Embeddings
//!
//! Composes a vector for any string from whole-word and n-gram tables and
//! scores pairs of words by cosine similarity.

use std::time::Instant;
use tracing::{debug, info};

use super::ngram::{NgramVectorTable, EPS};
use super::similarity::{add_assign, dot_product, euclidean_norm, scale};
use super::table::VectorTable;
use crate::config::EmbeddingsConfig;
use crate::error::{EmbeddingError, Result};
use crate::metrics::Metrics;

/// A composed vector and how it was built
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Averaged vector
    pub vector: Vec<f32>,
    /// Denominator of the average, dropped n-grams included
    pub count: usize,
    /// Whole-word lookup outcome, `None` when it was not attempted
    pub word_hit: Option<bool>,
    /// N-grams without a table entry, in enumeration order
    pub dropped: Vec<String>,
}

/// Word + subword embeddings
///
/// Immutable after construction; queries only read the tables.
#[derive(Debug)]
pub struct CombinedEmbeddings {
    word_vectors: Option<VectorTable>,
    ngram_vectors: Option<NgramVectorTable>,
    dimension: usize,
    metrics: Metrics,
}

impl CombinedEmbeddings {
    /// Combine already loaded tables
    pub fn new(
        word_vectors: Option<VectorTable>,
        ngram_vectors: Option<NgramVectorTable>,
    ) -> Result<Self> {
        let dimension = match (&word_vectors, &ngram_vectors) {
            (None, None) => return Err(EmbeddingError::NoTableProvided),
            (Some(w), Some(g)) if w.dimension() != g.dimension() => {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: w.dimension(),
                    found: g.dimension(),
                });
            }
            (Some(w), _) => w.dimension(),
            (None, Some(g)) => g.dimension(),
        };

        Ok(Self {
            word_vectors,
            ngram_vectors,
            dimension,
            metrics: Metrics::new(),
        })
    }

    /// Load the tables named by `config`
    pub fn from_config(config: &EmbeddingsConfig) -> Result<Self> {
        config.validate()?;

        let word_vectors = config
            .word_vectors
            .as_ref()
            .map(|path| VectorTable::load_path(path, config.dimension, config.word_header))
            .transpose()?;

        let ngram_vectors = config
            .ngram_vectors
            .as_ref()
            .map(|path| {
                NgramVectorTable::load_path(path, config.dimension, config.min_n, config.max_n)
            })
            .transpose()?;

        let embeddings = Self::new(word_vectors, ngram_vectors)?;
        info!(
            words = embeddings.word_vectors.as_ref().map_or(0, VectorTable::len),
            ngrams = embeddings
                .ngram_vectors
                .as_ref()
                .map_or(0, |g| g.table().len()),
            dimension = embeddings.dimension,
            "Embeddings ready"
        );
        Ok(embeddings)
    }

    /// Compose a vector for `word`, keeping the bookkeeping
    ///
    /// Every enumerated n-gram adds one to the denominator, found or not.
    /// Dropped n-grams contribute nothing to the sum.
    pub fn compose(&self, word: &str, use_full_word: bool) -> Result<Composition> {
        let mut vector = vec![0.0f32; self.dimension];
        let mut count = 0usize;
        let mut word_hit = None;
        let mut dropped = Vec::new();
        let mut ngram_hits = 0u64;

        if use_full_word {
            if let Some(words) = &self.word_vectors {
                match words.lookup(word) {
                    Some(v) => {
                        add_assign(&mut vector, v);
                        count += 1;
                        word_hit = Some(true);
                    }
                    None => word_hit = Some(false),
                }
            }
        }

        if let Some(ngrams) = &self.ngram_vectors {
            for gram in ngrams.ngrams(word) {
                match ngrams.lookup(&gram) {
                    Some(v) => {
                        add_assign(&mut vector, v);
                        ngram_hits += 1;
                    }
                    None => {
                        debug!("dropped: {}", gram);
                        dropped.push(gram);
                    }
                }
                count += 1;
            }
        }

        self.metrics
            .record_composition(word_hit, ngram_hits, dropped.len() as u64);

        if count == 0 {
            return Err(EmbeddingError::NoContribution {
                word: word.to_string(),
            });
        }

        scale(&mut vector, 1.0 / count as f32);
        Ok(Composition {
            vector,
            count,
            word_hit,
            dropped,
        })
    }

    /// Compose a vector for `word`
    pub fn compose_vector(&self, word: &str, use_full_word: bool) -> Result<Vec<f32>> {
        self.compose(word, use_full_word).map(|c| c.vector)
    }

    /// Vector and Euclidean norm for `word`
    ///
    /// The sentinel `__eps__` is never composed: its stored n-gram vector is
    /// returned as is.
    pub fn get_vector(&self, word: &str, use_full_word: bool) -> Result<(Vec<f32>, f64)> {
        if word == EPS {
            return self.get_eps();
        }
        let vector = self.compose_vector(word, use_full_word)?;
        let norm = euclidean_norm(&vector);
        Ok((vector, norm))
    }

    /// The sentinel's stored vector and norm
    pub fn get_eps(&self) -> Result<(Vec<f32>, f64)> {
        let vector = self
            .ngram_vectors
            .as_ref()
            .and_then(NgramVectorTable::eps)
            .ok_or(EmbeddingError::MissingSentinel)?
            .to_vec();
        let norm = euclidean_norm(&vector);
        Ok((vector, norm))
    }

    /// Cosine similarity of two words
    ///
    /// Not clamped; rounding can land slightly outside [-1, 1]. Computed in
    /// f64, a non-finite result (an accumulator that overflowed f32 during
    /// composition) is an error.
    pub fn cosine_similarity(&self, w1: &str, w2: &str, use_full_word: bool) -> Result<f32> {
        let start = Instant::now();
        let result = self.score(w1, w2, use_full_word);
        self.metrics.record_similarity(start.elapsed());
        result
    }

    fn score(&self, w1: &str, w2: &str, use_full_word: bool) -> Result<f32> {
        let (v1, n1) = self.get_vector(w1, use_full_word)?;
        let (v2, n2) = self.get_vector(w2, use_full_word)?;

        if n1 == 0.0 {
            return Err(EmbeddingError::ZeroNorm { word: w1.to_string() });
        }
        if n2 == 0.0 {
            return Err(EmbeddingError::ZeroNorm { word: w2.to_string() });
        }

        let sim = dot_product(&v1, &v2) / (n1 * n2);
        if !sim.is_finite() {
            return Err(EmbeddingError::NonFiniteSimilarity {
                w1: w1.to_string(),
                w2: w2.to_string(),
            });
        }
        Ok(sim as f32)
    }

    pub fn word_vectors(&self) -> Option<&VectorTable> {
        self.word_vectors.as_ref()
    }

    pub fn ngram_vectors(&self) -> Option<&NgramVectorTable> {
        self.ngram_vectors.as_ref()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
