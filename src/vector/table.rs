//! Vector Table
//!
//! Token -> vector mapping loaded once from a whitespace-separated text file.

use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

use crate::error::{EmbeddingError, Result};

/// Immutable token -> vector table
///
/// Tokens get indices in first-seen order. A token seen twice keeps its
/// first index and takes the later vector.
#[derive(Debug, Clone)]
pub struct VectorTable {
    /// Fixed vector length
    dimension: usize,
    /// Token -> index
    token_to_index: HashMap<String, usize>,
    /// Index -> token
    index_to_token: Vec<String>,
    /// Index -> vector
    vectors: Vec<Vec<f32>>,
}

impl VectorTable {
    /// Create an empty table
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            token_to_index: HashMap::new(),
            index_to_token: Vec::new(),
            vectors: Vec::new(),
        }
    }

    /// Load a table from a file path
    pub fn load_path<P: AsRef<Path>>(path: P, dimension: usize, has_header: bool) -> Result<Self> {
        let path = path.as_ref();
        info!("reading: {}", path.display());
        let file = File::open(path)?;
        Self::load(BufReader::new(file), dimension, has_header)
    }

    /// Load a table from text records
    ///
    /// Format (header optional):
    /// ```text
    /// <vocab_size> <dim>
    /// <token> <v1> <v2> ... <v_dim>
    /// ```
    pub fn load<R: BufRead>(reader: R, dimension: usize, has_header: bool) -> Result<Self> {
        let mut table = Self::new(dimension);
        let mut declared_vocab = None;

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line_idx == 0 && has_header {
                declared_vocab = Some(parse_header(&line, dimension)?);
                continue;
            }

            let mut fields = line.split_whitespace();
            let token = match fields.next() {
                Some(token) => token,
                None => continue,
            };

            let vector = fields
                .map(|f| match f.parse::<f32>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    Ok(_) => Err(EmbeddingError::MalformedRecord {
                        line: line_idx + 1,
                        reason: format!("non-finite component {:?}", f),
                    }),
                    Err(e) => Err(EmbeddingError::MalformedRecord {
                        line: line_idx + 1,
                        reason: format!("bad component {:?}: {}", f, e),
                    }),
                })
                .collect::<Result<Vec<f32>>>()?;

            if vector.len() != dimension {
                return Err(EmbeddingError::MalformedRecord {
                    line: line_idx + 1,
                    reason: format!("expected {} components, got {}", dimension, vector.len()),
                });
            }

            table.insert(token, vector)?;
        }

        info!(
            tokens = table.len(),
            declared = ?declared_vocab,
            dimension,
            "Vector table loaded"
        );
        Ok(table)
    }

    /// Get the index for a token, assigning the next one if it is new
    pub fn add_token(&mut self, token: &str) -> usize {
        if let Some(&idx) = self.token_to_index.get(token) {
            return idx;
        }
        let idx = self.index_to_token.len();
        self.token_to_index.insert(token.to_string(), idx);
        self.index_to_token.push(token.to_string());
        idx
    }

    /// Store a vector for a token, replacing any previous one
    pub fn insert(&mut self, token: &str, vector: Vec<f32>) -> Result<usize> {
        if vector.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                found: vector.len(),
            });
        }
        let idx = self.add_token(token);
        if idx == self.vectors.len() {
            self.vectors.push(vector);
        } else {
            self.vectors[idx] = vector;
        }
        Ok(idx)
    }

    /// Look up a token's vector
    #[inline]
    pub fn lookup(&self, token: &str) -> Option<&[f32]> {
        self.token_to_index
            .get(token)
            .map(|&idx| self.vectors[idx].as_slice())
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.token_to_index.get(token).copied()
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.index_to_token.get(index).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_to_index.contains_key(token)
    }

    /// Tokens in first-seen order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.index_to_token.iter().map(String::as_str)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.index_to_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_token.is_empty()
    }
}

/// Parse `<vocab_size> <dim>` and check the dimension
fn parse_header(line: &str, dimension: usize) -> Result<usize> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(EmbeddingError::MalformedHeader(format!(
            "expected \"<vocab_size> <dim>\", got {:?}",
            line
        )));
    }

    let vocab = fields[0]
        .parse::<usize>()
        .map_err(|e| EmbeddingError::MalformedHeader(format!("vocab size {:?}: {}", fields[0], e)))?;
    let declared = fields[1]
        .parse::<usize>()
        .map_err(|e| EmbeddingError::MalformedHeader(format!("dimension {:?}: {}", fields[1], e)))?;

    if declared != dimension {
        return Err(EmbeddingError::DimensionMismatch {
            expected: dimension,
            found: declared,
        });
    }
    Ok(vocab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_with_header() {
        let data = "2 3\nhello 1 0 0\nworld 0.5 0.5 -1\n";
        let table = VectorTable::load(Cursor::new(data), 3, true).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("hello").unwrap(), &[1.0, 0.0, 0.0]);
        assert_eq!(table.lookup("world").unwrap(), &[0.5, 0.5, -1.0]);
        assert!(table.lookup("missing").is_none());
    }

    #[test]
    fn test_every_vector_has_dimension() {
        let data = "a 1 2\nb 3 4\nc 5 6\n";
        let table = VectorTable::load(Cursor::new(data), 2, false).unwrap();
        for token in table.tokens() {
            assert_eq!(table.lookup(token).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_header_dimension_mismatch() {
        let data = "2 4\nhello 1 0 0\n";
        let result = VectorTable::load(Cursor::new(data), 3, true);
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch { expected: 3, found: 4 })
        ));
    }

    #[test]
    fn test_malformed_header() {
        let result = VectorTable::load(Cursor::new("300\nhello 1\n"), 1, true);
        assert!(matches!(result, Err(EmbeddingError::MalformedHeader(_))));
    }

    #[test]
    fn test_malformed_record() {
        let result = VectorTable::load(Cursor::new("a 1 2\nb 1\n"), 2, false);
        assert!(matches!(
            result,
            Err(EmbeddingError::MalformedRecord { line: 2, .. })
        ));

        let result = VectorTable::load(Cursor::new("a 1 x\n"), 2, false);
        assert!(matches!(
            result,
            Err(EmbeddingError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_non_finite_components_rejected() {
        for data in ["a NaN 0\n", "a 0 inf\n", "b 1 2\na -inf 0\n", "a 1e39 0\n"] {
            let result = VectorTable::load(Cursor::new(data), 2, false);
            assert!(
                matches!(result, Err(EmbeddingError::MalformedRecord { .. })),
                "{:?} should not load",
                data
            );
        }
    }

    #[test]
    fn test_first_seen_order_and_idempotent_add() {
        let mut table = VectorTable::new(1);
        assert_eq!(table.add_token("b"), 0);
        assert_eq!(table.add_token("a"), 1);
        assert_eq!(table.add_token("b"), 0);
        assert_eq!(table.tokens().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(table.token(1), Some("a"));
        assert_eq!(table.index_of("a"), Some(1));
    }

    #[test]
    fn test_duplicate_token_keeps_index_takes_last_vector() {
        let data = "x 1\ny 2\nx 3\n";
        let table = VectorTable::load(Cursor::new(data), 1, false).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.index_of("x"), Some(0));
        assert_eq!(table.lookup("x").unwrap(), &[3.0]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = VectorTable::load(Cursor::new("a 1\n\nb 2\n\n"), 1, false).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_insert_wrong_dimension() {
        let mut table = VectorTable::new(2);
        assert!(table.insert("a", vec![1.0]).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1 2").unwrap();
        writeln!(file, "café 0.25 -0.75").unwrap();

        let table = VectorTable::load_path(file.path(), 2, true).unwrap();
        assert_eq!(table.lookup("café").unwrap(), &[0.25, -0.75]);
    }

    #[test]
    fn test_load_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = VectorTable::load_path(dir.path().join("nope.vec"), 2, false);
        assert!(matches!(result, Err(EmbeddingError::Io(_))));
    }
}
