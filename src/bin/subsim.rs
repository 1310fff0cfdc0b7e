//! SUBSIM CLI
//!
//! Loads word and subword vectors and prints cosine similarities for word
//! pairs given on the command line, on stdin, or from the built-in demo list.

use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use subsim::normalize::{normalize, strip_accents};
use subsim::{CombinedEmbeddings, EmbeddingsConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// SUBSIM - similarity of arbitrary words from word + subword vectors
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Whole-word vector file (first line "<vocab_size> <dim>")
    #[arg(long)]
    word_vec: Option<PathBuf>,

    /// Character n-gram vector file (no header, must contain __eps__)
    #[arg(long)]
    ngram_vec: Option<PathBuf>,

    /// Vector dimension
    #[arg(long)]
    dim: usize,

    /// Shortest n-gram length
    #[arg(long, default_value_t = 3)]
    minn: usize,

    /// Longest n-gram length
    #[arg(long, default_value_t = 6)]
    maxn: usize,

    /// Word vector file has no header line
    #[arg(long, default_value_t = false)]
    no_header: bool,

    /// Normalize and strip accents from words before scoring
    #[arg(long, default_value_t = false)]
    normalize: bool,

    /// Ignore whole-word vectors and use n-grams only
    #[arg(long, default_value_t = false)]
    subword_only: bool,

    /// Read "word1 word2" pairs from stdin, one per line
    #[arg(long, default_value_t = false)]
    stdin: bool,

    /// Word pairs as "word1,word2"
    #[arg(value_name = "PAIR")]
    pairs: Vec<String>,
}

const DIFF_PAIRS: &[(&str, &str)] = &[
    ("travel", "tourist"),
    ("traveler", "tourist"),
    ("travel", "hair"),
    ("kids", "children"),
    ("loving", "like"),
    ("hello", "hey"),
    ("book", "write"),
    ("nice", "good"),
    ("nice", "bad"),
];

const TYPO_PAIRS: &[(&str, &str)] = &[
    ("keds", "children"),
    ("loveing", "like"),
    ("helo", "hey"),
    ("bok", "write"),
];

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so scores on stdout stay clean
    fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("subsim=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = EmbeddingsConfig::default()
        .with_dimension(args.dim)
        .with_ngram_range(args.minn, args.maxn)
        .with_word_header(!args.no_header);
    if let Some(path) = &args.word_vec {
        config = config.with_word_vectors(path);
    }
    if let Some(path) = &args.ngram_vec {
        config = config.with_ngram_vectors(path);
    }

    let embeddings = CombinedEmbeddings::from_config(&config)?;
    let use_full_word = !args.subword_only;

    if args.stdin {
        for line in io::stdin().lock().lines() {
            let line = line?;
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                [] => continue,
                [w1, w2] => report(&embeddings, w1, w2, use_full_word, args.normalize),
                _ => eprintln!("Error: expected two words, got {:?}", line),
            }
        }
    } else if !args.pairs.is_empty() {
        for pair in &args.pairs {
            match pair.split_once(',') {
                Some((w1, w2)) => report(&embeddings, w1, w2, use_full_word, args.normalize),
                None => eprintln!("Error: expected \"word1,word2\", got {:?}", pair),
            }
        }
    } else {
        run_demo(&embeddings, args.normalize);
    }

    info!("{}", embeddings.metrics().summary());
    Ok(())
}

fn run_demo(embeddings: &CombinedEmbeddings, normalize_words: bool) {
    for (title, pairs) in [("DIFF", DIFF_PAIRS), ("TYPOS", TYPO_PAIRS)] {
        println!("\n----------------{}-------------------\n", title);
        for use_full_word in [true, false] {
            for (w1, w2) in pairs {
                report(embeddings, w1, w2, use_full_word, normalize_words);
            }
        }
    }
}

fn report(
    embeddings: &CombinedEmbeddings,
    w1: &str,
    w2: &str,
    use_full_word: bool,
    normalize_words: bool,
) {
    let (w1, w2) = if normalize_words {
        (prepare(w1), prepare(w2))
    } else {
        (w1.to_string(), w2.to_string())
    };

    match embeddings.cosine_similarity(&w1, &w2, use_full_word) {
        Ok(sim) => println!(
            "{}, {} (full_word={}) {:.4}",
            w1, w2, use_full_word as u8, sim
        ),
        Err(e) => eprintln!("Error: {}, {}: {}", w1, w2, e),
    }
}

fn prepare(word: &str) -> String {
    strip_accents(&normalize(word))
}
