//! Vector Module
//!
//! Vector tables, subword composition and similarity scoring.

mod combined;
mod ngram;
mod similarity;
mod table;

pub use combined::{CombinedEmbeddings, Composition};
pub use ngram::{enumerate_ngrams, NgramVectorTable, BOW, EOW, EPS};
pub use similarity::{add_assign, dot_product, euclidean_norm, scale};
pub use table::VectorTable;
