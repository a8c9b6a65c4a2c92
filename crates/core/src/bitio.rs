//! Bit-level output for the encoded stream.
//!
//! `Codeword` is a single fixed-width bit pattern. `BitWriter` appends
//! codewords MSB-first into a packed byte buffer and `finish` hands back a
//! `BitStream`: the packed bytes plus the exact number of meaningful bits.
//!
//! # Padding Rules
//! - BitWriter: pads the final incomplete byte with trailing zeros
//! - BitStream: `len()` is always the true, unpadded bit count
//!
//! # Example
//! ```
//! use canonical_huffman_core::bitio::BitWriter;
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();  // Write 3 bits: 1, 0, 1
//! writer.write_bits(0b11, 2).unwrap();   // Write 2 bits: 1, 1
//! // Total: 10111 -> packed as 10111000
//!
//! let stream = writer.finish();
//! assert_eq!(stream.len(), 5);
//! assert_eq!(stream.as_bytes(), &[0b10111000]);
//! assert_eq!(stream.to_string(), "10111");
//! ```

use std::fmt;

use crate::error::{BitIoError, Result};

/// Widest codeword a `Codeword` can hold.
///
/// `FrequencyTable` and `CodeLengths` reject anything that would need more.
pub const MAX_CODEWORD_BITS: u8 = 64;

/// A bit pattern of `len` bits, stored right-aligned in `value`.
///
/// Rendered MSB-first and zero-padded on the left to exactly `len` digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword {
    value: u64,
    len: u8,
}

impl Codeword {
    pub fn new(value: u64, len: u8) -> Self {
        debug_assert!(len > 0 && len <= MAX_CODEWORD_BITS, "codeword length {len}");
        debug_assert!(len == 64 || value >> len == 0, "value wider than {len} bits");
        Self { value, len }
    }

    /// Integer value of the pattern.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Number of bits.
    pub fn len(&self) -> u8 {
        self.len
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        if self.len > other.len {
            return false;
        }
        other.value >> (other.len - self.len) == self.value
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.len as usize)
    }
}

/// Writes bits MSB-first into a byte buffer.
///
/// Accumulates bits in a buffer and flushes complete bytes to the output.
/// When finished, pads the final partial byte with zeros.
///
/// # Invariants
/// - `bit_buffer` contains up to 7 bits (never a full byte)
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Create a BitWriter with room for roughly `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write up to 64 bits to the output.
    ///
    /// Bits are written MSB-first. For example, writing value=0b101 with count=3
    /// writes bits 1, 0, 1 in that order.
    ///
    /// # Arguments
    /// - `value`: the bits to write (only the lowest `count` bits are used)
    /// - `count`: number of bits to write (0-64)
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        if count == 0 {
            return Ok(());
        }

        let mut remaining = count;
        let mut val = if count == 64 {
            value
        } else {
            value & ((1u64 << count) - 1)
        };

        while remaining > 0 {
            // How many bits fit in the current byte
            let bits_to_write = remaining.min(8 - self.bit_count as usize);

            // Top bits_to_write bits of what is left
            let shift = remaining - bits_to_write;
            let bits = ((val >> shift) & ((1u64 << bits_to_write) - 1)) as u8;

            self.bit_buffer |= bits << (8 - self.bit_count as usize - bits_to_write);
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            val &= (1u64 << shift) - 1;
            remaining -= bits_to_write;
        }

        Ok(())
    }

    /// Append one codeword, MSB-first.
    pub fn write_codeword(&mut self, codeword: Codeword) -> Result<()> {
        self.write_bits(codeword.value(), codeword.len() as usize)
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Finish writing and return the packed stream.
    ///
    /// Remaining bits in the buffer are flushed as a final byte padded with
    /// trailing zeros; the returned stream still reports the unpadded length.
    pub fn finish(mut self) -> BitStream {
        let bit_len = self.bit_len();
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        BitStream {
            bytes: self.bytes,
            bit_len,
        }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered, MSB-first sequence of bits stored packed into bytes.
///
/// # Invariants
/// - `bytes.len() == bit_len.div_ceil(8)`
/// - bits past `bit_len` in the last byte are zero
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitStream {
    /// Number of meaningful bits (never counts padding).
    pub fn len(&self) -> usize {
        self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Bit at `index`, `true` for 1. `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }
        let byte = self.bytes[index / 8];
        Some(byte & (0x80 >> (index % 8)) != 0)
    }

    /// Iterate the bits in stream order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_len).map(move |i| self.bytes[i / 8] & (0x80 >> (i % 8)) != 0)
    }

    /// Packed bytes, MSB-first, last byte zero-padded on the right.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of zero bits appended to complete the last byte.
    pub fn padding_bits(&self) -> usize {
        self.bytes.len() * 8 - self.bit_len
    }

    /// Render the first `max_bits` bits as a string of '0' and '1'.
    pub fn prefix_string(&self, max_bits: usize) -> String {
        self.iter()
            .take(max_bits)
            .map(|bit| if bit { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix_string(self.bit_len))
    }
}
