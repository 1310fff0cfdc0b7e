//! Text normalization
//!
//! Callers apply these before querying; the composition code never does.
//! Vector files are usually built from normalized text, so queries should be
//! normalized the same way.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Remove accents: NFD decompose, then drop combining marks
///
/// ```
/// use subsim::normalize::strip_accents;
///
/// assert_eq!(strip_accents("café naïve"), "cafe naive");
/// ```
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// NFKC fold, lowercase and trim
pub fn normalize(s: &str) -> String {
    let folded: String = s.nfkc().collect();
    folded.trim().to_lowercase()
}
