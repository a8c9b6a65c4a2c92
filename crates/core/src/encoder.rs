//! Bitstream encoding with a canonical code table.
//!
//! Each input symbol is replaced by its codeword, in input order, and the
//! codewords are concatenated MSB-first into a `BitStream`. Bit counts are
//! tracked exactly; the zero padding of the packed form never enters them.

use crate::bitio::{BitStream, BitWriter};
use crate::canonical::CanonicalCodeTable;
use crate::error::{HuffmanError, Result};

/// The encoded form of one input plus its size accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedStream {
    bits: BitStream,
    symbols: usize,
}

impl EncodedStream {
    /// The concatenated codewords.
    pub fn bits(&self) -> &BitStream {
        &self.bits
    }

    /// Number of input symbols encoded.
    pub fn symbols(&self) -> usize {
        self.symbols
    }

    /// Size of the input at 8 bits per symbol.
    pub fn original_bits(&self) -> u64 {
        self.symbols as u64 * 8
    }

    /// Exact encoded size in bits, without padding.
    pub fn compressed_bits(&self) -> u64 {
        self.bits.len() as u64
    }

    /// Encoded bytes, MSB-first, last byte zero-padded.
    pub fn packed_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// Consume the stream, keeping only the bits.
    pub fn into_bits(self) -> BitStream {
        self.bits
    }
}

/// Encode `symbols` with `table`.
///
/// # Errors
/// - `HuffmanError::MissingCodeEntry` if a symbol has no codeword; the table
///   should cover every symbol of the input it was derived from
/// - `BitIoError` if a codeword cannot be written
pub fn encode(table: &CanonicalCodeTable, symbols: &[u8]) -> Result<EncodedStream> {
    let estimated_bits = symbols.len() * 4;
    let mut writer = BitWriter::with_capacity(estimated_bits);

    for &symbol in symbols {
        let codeword = table
            .get(symbol)
            .ok_or(HuffmanError::MissingCodeEntry { symbol })?;
        writer.write_codeword(codeword)?;
    }

    Ok(EncodedStream {
        bits: writer.finish(),
        symbols: symbols.len(),
    })
}
