//! SUBSIM - Word Similarity from Word and Subword Embeddings
//!
//! Scores any pair of strings, misspellings and out-of-vocabulary forms
//! included, by averaging whole-word and character n-gram vectors and taking
//! the cosine of the results.

pub mod config;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod vector;

pub use config::EmbeddingsConfig;
pub use error::{EmbeddingError, Result};
pub use metrics::Metrics;
pub use vector::{CombinedEmbeddings, Composition, NgramVectorTable, VectorTable, EPS};
