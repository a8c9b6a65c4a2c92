//! Error types for the canonical Huffman pipeline.
//!
//! All operations return structured errors rather than panicking. The core
//! never logs or recovers; presenting an error is the caller's job.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Huffman: code construction or encoding failures
/// - Bit I/O: writing bits into the packed output stream
#[derive(Debug, Error)]
pub enum Error {
    /// Huffman pipeline error (empty input, broken stage contract)
    #[error("huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Bit I/O operation failed
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),
}

/// Huffman pipeline errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// No symbols to count, or no entries to build a tree from
    #[error("empty input: cannot build a code table")]
    EmptyInput,

    /// The canonical table has no entry for a symbol of the input.
    ///
    /// The table is derived from the same input, so this signals a broken
    /// contract between stages rather than bad user data.
    #[error("no code entry for symbol {symbol:#04x}")]
    MissingCodeEntry { symbol: u8 },

    /// Symbol counts add up to more than `u64::MAX`
    #[error("frequency total overflows u64")]
    FrequencyOverflow,

    /// A code length exceeds the widest codeword the encoder can hold
    #[error("code length {length} exceeds the {max}-bit codeword limit")]
    CodeTooLong { length: usize, max: u8 },

    /// Code lengths claim more code space than exists (Kraft sum above 1)
    #[error("code lengths over-subscribe the code space")]
    OversubscribedLengths,
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Invalid bit count (more than 64 bits in one write)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
