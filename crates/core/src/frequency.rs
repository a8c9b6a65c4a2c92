//! Symbol frequency counting.
//!
//! A `FrequencyTable` maps each distinct byte of an input to its number of
//! occurrences. It is built once and never mutated afterwards.

use crate::bitio::MAX_CODEWORD_BITS;
use crate::error::{HuffmanError, Result};
use crate::tree::HuffmanTree;

/// Number of distinct 8-bit symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence counts for every symbol present in an input.
///
/// # Invariants
/// - at least one symbol has a non-zero count
/// - `total` equals the sum of all counts
/// - no symbol's Huffman code is longer than `MAX_CODEWORD_BITS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl FrequencyTable {
    /// Tally every byte of `symbols`.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyInput` if `symbols` is empty
    /// - `HuffmanError::CodeTooLong` if the resulting code would not fit a
    ///   `Codeword`
    pub fn count(symbols: &[u8]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(HuffmanError::EmptyInput.into());
        }

        let mut counts = [0u64; ALPHABET_SIZE];
        for &symbol in symbols {
            counts[symbol as usize] += 1;
        }

        Self {
            counts,
            total: symbols.len() as u64,
        }
        .ensure_codable()
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Repeated symbols accumulate; zero counts are ignored.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyInput` if no pair carries a non-zero count
    /// - `HuffmanError::FrequencyOverflow` if the counts sum past `u64::MAX`
    /// - `HuffmanError::CodeTooLong` if the distribution is skewed enough
    ///   (Fibonacci-like) that a code would not fit a `Codeword`
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut counts = [0u64; ALPHABET_SIZE];
        let mut total = 0u64;
        for (symbol, count) in pairs {
            // Every per-symbol count is bounded by the total
            total = total
                .checked_add(count)
                .ok_or(HuffmanError::FrequencyOverflow)?;
            counts[symbol as usize] += count;
        }

        if total == 0 {
            return Err(HuffmanError::EmptyInput.into());
        }

        Self { counts, total }.ensure_codable()
    }

    /// Reject tables whose deepest leaf would not fit a `Codeword`.
    fn ensure_codable(self) -> Result<Self> {
        let depth = HuffmanTree::build(&self)?.max_depth();
        if depth > MAX_CODEWORD_BITS as usize {
            return Err(HuffmanError::CodeTooLong {
                length: depth,
                max: MAX_CODEWORD_BITS,
            }
            .into());
        }
        Ok(self)
    }

    /// Count for `symbol`, `None` if it never occurs.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.counts[symbol as usize] {
            0 => None,
            count => Some(count),
        }
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Never true for a table built by `count` or `from_pairs`.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Sum of all counts, equal to the input length.
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Tally the symbols of an input sequence.
///
/// # Errors
/// See `FrequencyTable::count`.
pub fn count(symbols: &[u8]) -> Result<FrequencyTable> {
    FrequencyTable::count(symbols)
}
