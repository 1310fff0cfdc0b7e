//! Subword (character n-gram) Vectors
//!
//! N-gram enumeration over boundary-decorated words and the n-gram table.

use std::path::Path;

use super::table::VectorTable;
use crate::error::{EmbeddingError, Result};

/// Reserved sentinel token, required in every n-gram table
pub const EPS: &str = "__eps__";

/// Word start marker
pub const BOW: char = '<';

/// Word end marker
pub const EOW: char = '>';

/// Enumerate the character n-grams of `word`
///
/// The word is decorated as `<word>`. For each `n` in `[min_n, max_n]` and
/// each start offset of the decorated word, the slice `[i, i + n)` is taken,
/// truncated at the end of the string. The lone markers `<` and `>` are
/// skipped. Repeats are kept.
///
/// ```
/// use subsim::vector::enumerate_ngrams;
///
/// assert_eq!(
///     enumerate_ngrams("abc", 2, 3),
///     vec!["<a", "ab", "bc", "c>", "<ab", "abc", "bc>", "c>"]
/// );
/// ```
pub fn enumerate_ngrams(word: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let mut decorated: Vec<char> = Vec::with_capacity(word.len() + 2);
    decorated.push(BOW);
    decorated.extend(word.chars());
    decorated.push(EOW);

    let len = decorated.len();
    let mut ngrams = Vec::new();

    for n in min_n..=max_n {
        for i in 0..len {
            let end = i.saturating_add(n).min(len);
            let gram = &decorated[i..end];
            if gram.len() == 1 && (gram[0] == BOW || gram[0] == EOW) {
                continue;
            }
            ngrams.push(gram.iter().collect());
        }
    }

    ngrams
}

/// Vector table of character n-grams
#[derive(Debug, Clone)]
pub struct NgramVectorTable {
    table: VectorTable,
    min_n: usize,
    max_n: usize,
}

impl NgramVectorTable {
    /// Wrap a loaded table, checking the n-gram range and the sentinel
    pub fn new(table: VectorTable, min_n: usize, max_n: usize) -> Result<Self> {
        if min_n == 0 || min_n > max_n {
            return Err(EmbeddingError::InvalidNgramRange { min_n, max_n });
        }
        if !table.contains(EPS) {
            return Err(EmbeddingError::MissingSentinel);
        }
        Ok(Self { table, min_n, max_n })
    }

    /// Load from a headerless file
    pub fn load_path<P: AsRef<Path>>(
        path: P,
        dimension: usize,
        min_n: usize,
        max_n: usize,
    ) -> Result<Self> {
        let table = VectorTable::load_path(path, dimension, false)?;
        Self::new(table, min_n, max_n)
    }

    /// N-grams of `word` for this table's range
    pub fn ngrams(&self, word: &str) -> Vec<String> {
        enumerate_ngrams(word, self.min_n, self.max_n)
    }

    #[inline]
    pub fn lookup(&self, ngram: &str) -> Option<&[f32]> {
        self.table.lookup(ngram)
    }

    /// The sentinel's stored vector
    pub fn eps(&self) -> Option<&[f32]> {
        self.table.lookup(EPS)
    }

    pub fn table(&self) -> &VectorTable {
        &self.table
    }

    pub fn dimension(&self) -> usize {
        self.table.dimension()
    }

    pub fn min_n(&self) -> usize {
        self.min_n
    }

    pub fn max_n(&self) -> usize {
        self.max_n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ngram_table(data: &str) -> VectorTable {
        VectorTable::load(Cursor::new(data), 2, false).unwrap()
    }

    #[test]
    fn test_enumerate_order() {
        assert_eq!(
            enumerate_ngrams("abc", 2, 3),
            vec!["<a", "ab", "bc", "c>", "<ab", "abc", "bc>", "c>"]
        );
    }

    #[test]
    fn test_enumerate_unigrams_skip_markers() {
        assert_eq!(enumerate_ngrams("ab", 1, 1), vec!["a", "b"]);
    }

    #[test]
    fn test_enumerate_keeps_repeats() {
        let grams = enumerate_ngrams("aaa", 1, 1);
        assert_eq!(grams, vec!["a", "a", "a"]);
    }

    #[test]
    fn test_enumerate_truncated_tail_slices() {
        // "<a>" with n=4: every slice runs off the end
        assert_eq!(enumerate_ngrams("a", 4, 4), vec!["<a>", "a>"]);
    }

    #[test]
    fn test_enumerate_huge_length() {
        assert_eq!(
            enumerate_ngrams("ab", usize::MAX, usize::MAX),
            vec!["<ab>", "ab>", "b>"]
        );
    }

    #[test]
    fn test_enumerate_empty_word() {
        assert_eq!(enumerate_ngrams("", 1, 2), vec!["<>"]);
    }

    #[test]
    fn test_enumerate_multibyte() {
        assert_eq!(enumerate_ngrams("né", 2, 2), vec!["<n", "né", "é>"]);
    }

    #[test]
    fn test_new_requires_sentinel() {
        let result = NgramVectorTable::new(ngram_table("ab 1 0\n"), 1, 2);
        assert!(matches!(result, Err(EmbeddingError::MissingSentinel)));
    }

    #[test]
    fn test_new_checks_range() {
        let result = NgramVectorTable::new(ngram_table("__eps__ 1 1\n"), 3, 2);
        assert!(matches!(
            result,
            Err(EmbeddingError::InvalidNgramRange { min_n: 3, max_n: 2 })
        ));

        let result = NgramVectorTable::new(ngram_table("__eps__ 1 1\n"), 0, 2);
        assert!(matches!(result, Err(EmbeddingError::InvalidNgramRange { .. })));
    }

    #[test]
    fn test_eps_lookup() {
        let table = NgramVectorTable::new(ngram_table("__eps__ 1 1\nab 1 0\n"), 2, 2).unwrap();
        assert_eq!(table.eps().unwrap(), &[1.0, 1.0]);
        assert_eq!(table.ngrams("ab"), vec!["<a", "ab", "b>"]);
    }
}
