//! Basic Metrics
//!
//! Composition counters and similarity latency tracking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector
///
/// Every counter is a relaxed atomic so queries can share one instance
/// through `&self`.
#[derive(Debug)]
pub struct Metrics {
    /// Composed vectors
    compositions: AtomicU64,

    /// Whole-word lookups
    word_hits: AtomicU64,
    word_misses: AtomicU64,

    /// N-gram lookups (misses are the dropped n-grams)
    ngram_hits: AtomicU64,
    ngram_misses: AtomicU64,

    /// Similarity queries (including failed ones)
    similarity_queries: AtomicU64,

    /// Latency tracking (simplified)
    latency_sum_us: AtomicU64,
    latency_count: AtomicU64,
    latency_min_us: AtomicU64,
    latency_max_us: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            compositions: AtomicU64::new(0),
            word_hits: AtomicU64::new(0),
            word_misses: AtomicU64::new(0),
            ngram_hits: AtomicU64::new(0),
            ngram_misses: AtomicU64::new(0),
            similarity_queries: AtomicU64::new(0),
            latency_sum_us: AtomicU64::new(0),
            latency_count: AtomicU64::new(0),
            latency_min_us: AtomicU64::new(u64::MAX),
            latency_max_us: AtomicU64::new(0),
        }
    }

    /// Record one composition and its lookup outcomes
    pub fn record_composition(&self, word_hit: Option<bool>, ngram_hits: u64, ngram_misses: u64) {
        self.compositions.fetch_add(1, Ordering::Relaxed);
        match word_hit {
            Some(true) => {
                self.word_hits.fetch_add(1, Ordering::Relaxed);
            }
            Some(false) => {
                self.word_misses.fetch_add(1, Ordering::Relaxed);
            }
            None => {}
        }
        self.ngram_hits.fetch_add(ngram_hits, Ordering::Relaxed);
        self.ngram_misses.fetch_add(ngram_misses, Ordering::Relaxed);
    }

    /// Record a similarity query
    pub fn record_similarity(&self, latency: Duration) {
        self.similarity_queries.fetch_add(1, Ordering::Relaxed);

        let latency_us = latency.as_micros() as u64;
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);

        // Update min (atomic min)
        let mut current_min = self.latency_min_us.load(Ordering::Relaxed);
        while latency_us < current_min {
            match self.latency_min_us.compare_exchange_weak(
                current_min,
                latency_us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(c) => current_min = c,
            }
        }

        // Update max (atomic max)
        let mut current_max = self.latency_max_us.load(Ordering::Relaxed);
        while latency_us > current_max {
            match self.latency_max_us.compare_exchange_weak(
                current_max,
                latency_us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(c) => current_max = c,
            }
        }
    }

    pub fn compositions(&self) -> u64 {
        self.compositions.load(Ordering::Relaxed)
    }

    pub fn word_hits(&self) -> u64 {
        self.word_hits.load(Ordering::Relaxed)
    }

    pub fn word_misses(&self) -> u64 {
        self.word_misses.load(Ordering::Relaxed)
    }

    pub fn ngram_hits(&self) -> u64 {
        self.ngram_hits.load(Ordering::Relaxed)
    }

    /// Dropped n-grams
    pub fn ngram_misses(&self) -> u64 {
        self.ngram_misses.load(Ordering::Relaxed)
    }

    pub fn similarity_queries(&self) -> u64 {
        self.similarity_queries.load(Ordering::Relaxed)
    }

    /// Get average latency in microseconds
    pub fn avg_latency_us(&self) -> f64 {
        let count = self.latency_count.load(Ordering::Relaxed);
        if count == 0 {
            return 0.0;
        }
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        sum as f64 / count as f64
    }

    /// Get min latency in microseconds
    pub fn min_latency_us(&self) -> u64 {
        let min = self.latency_min_us.load(Ordering::Relaxed);
        if min == u64::MAX {
            0
        } else {
            min
        }
    }

    /// Get max latency in microseconds
    pub fn max_latency_us(&self) -> u64 {
        self.latency_max_us.load(Ordering::Relaxed)
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "compositions={} word_hits={} word_misses={} ngram_hits={} ngram_dropped={} \
             similarity_queries={} latency_us(avg/min/max)={:.1}/{}/{}",
            self.compositions(),
            self.word_hits(),
            self.word_misses(),
            self.ngram_hits(),
            self.ngram_misses(),
            self.similarity_queries(),
            self.avg_latency_us(),
            self.min_latency_us(),
            self.max_latency_us(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_composition() {
        let metrics = Metrics::new();
        metrics.record_composition(Some(true), 3, 2);
        metrics.record_composition(Some(false), 0, 1);
        metrics.record_composition(None, 4, 0);

        assert_eq!(metrics.compositions(), 3);
        assert_eq!(metrics.word_hits(), 1);
        assert_eq!(metrics.word_misses(), 1);
        assert_eq!(metrics.ngram_hits(), 7);
        assert_eq!(metrics.ngram_misses(), 3);
    }

    #[test]
    fn test_latency_tracking() {
        let metrics = Metrics::new();
        assert_eq!(metrics.min_latency_us(), 0);

        metrics.record_similarity(Duration::from_micros(100));
        metrics.record_similarity(Duration::from_micros(200));
        metrics.record_similarity(Duration::from_micros(300));

        assert_eq!(metrics.similarity_queries(), 3);
        assert!((metrics.avg_latency_us() - 200.0).abs() < 1.0);
        assert_eq!(metrics.min_latency_us(), 100);
        assert_eq!(metrics.max_latency_us(), 300);
        assert!(metrics.summary().contains("similarity_queries=3"));
    }
}
