//! Metrics for a single encoding run.
//!
//! Collected once the pipeline has produced its artifacts: input size,
//! alphabet size, tree shape and encoded size, plus wall-clock timing.
//!
//! # Thread Safety
//!
//! `Metrics` is a plain value owned by one run; nothing is shared.

use std::time::{Duration, Instant};

use crate::Compression;

/// Observable numbers from one encoding run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// Number of input symbols
    pub input_symbols: u64,

    /// Number of distinct symbols
    pub distinct_symbols: u64,

    // === Code ===
    /// Merge steps performed while building the tree
    pub tree_merges: u64,

    /// Longest assigned code length
    pub max_code_length: u64,

    // === Output ===
    /// Input size at 8 bits per symbol
    pub original_bits: u64,

    /// Exact encoded size in bits
    pub compressed_bits: u64,

    /// Encoded size once packed into bytes
    pub packed_bytes: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_symbols: 0,
            distinct_symbols: 0,
            tree_merges: 0,
            max_code_length: 0,
            original_bits: 0,
            compressed_bits: 0,
            packed_bytes: 0,
        }
    }

    /// Record the sizes of a finished pipeline run.
    pub fn record(&mut self, compression: &Compression) {
        self.input_symbols = compression.frequencies.total();
        self.distinct_symbols = compression.frequencies.len() as u64;
        self.tree_merges = compression.tree.merges() as u64;
        self.max_code_length = compression.lengths.max_length() as u64;
        self.original_bits = compression.stream.original_bits();
        self.compressed_bits = compression.stream.compressed_bits();
        self.packed_bytes = compression.stream.packed_bytes().len() as u64;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (compressed / original).
    ///
    /// Returns 0.0 if nothing was encoded.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_bits == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / self.original_bits as f64
        }
    }

    /// Size reduction in percent, `(1 - ratio) * 100`.
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.compression_ratio()) * 100.0
    }

    /// Average code length weighted by occurrence.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.compressed_bits as f64 / self.input_symbols as f64
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_us={}\n\
             input_symbols={}\n\
             distinct_symbols={}\n\
             tree_merges={}\n\
             max_code_length={}\n\
             original_bits={}\n\
             compressed_bits={}\n\
             packed_bytes={}\n\
             compression_ratio={:.6}\n\
             bits_per_symbol={:.4}\n",
            self.duration().as_micros(),
            self.input_symbols,
            self.distinct_symbols,
            self.tree_merges,
            self.max_code_length,
            self.original_bits,
            self.compressed_bits,
            self.packed_bytes,
            self.compression_ratio(),
            self.bits_per_symbol(),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
