//! Canonical code assignment from code lengths.
//!
//! Given only each symbol's code length, assigns the standard canonical
//! prefix code (the one DEFLATE uses):
//!
//! 1. Order symbols by `(length, symbol)`.
//! 2. `bl_count[l]` = number of symbols of length `l`.
//! 3. `next_code[l] = (next_code[l - 1] + bl_count[l - 1]) << 1`, starting
//!    from `next_code[0] = 0`.
//! 4. Walk the ordered symbols, giving each `next_code[len]` and bumping it.
//!
//! Codes of one length are consecutive integers, and every code is strictly
//! greater than all codes that precede it in `(length, symbol)` order. Anyone
//! holding the length list can rebuild the same table.

use crate::bitio::Codeword;
use crate::frequency::ALPHABET_SIZE;
use crate::tree::CodeLengths;

/// Canonical codeword for every symbol of a `CodeLengths`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCodeTable {
    /// Indexed by symbol
    codes: Vec<Option<Codeword>>,
    /// `(symbol, codeword)` in `(length, symbol)` order
    ordered: Vec<(u8, Codeword)>,
}

impl CanonicalCodeTable {
    /// Assign canonical codes for `lengths`.
    pub fn from_lengths(lengths: &CodeLengths) -> Self {
        let mut sorted: Vec<(u8, u8)> = lengths.iter().collect();
        sorted.sort_unstable_by_key(|&(symbol, len)| (len, symbol));

        let max_len = lengths.max_length() as usize;

        let mut bl_count = vec![0u64; max_len + 1];
        for &(_, len) in &sorted {
            bl_count[len as usize] += 1;
        }

        let mut next_code = vec![0u64; max_len + 1];
        let mut code = 0u64;
        for bits in 1..=max_len {
            code = (code + bl_count[bits - 1]) << 1;
            next_code[bits] = code;
        }

        let mut codes = vec![None; ALPHABET_SIZE];
        let mut ordered = Vec::with_capacity(sorted.len());
        for (symbol, len) in sorted {
            let codeword = Codeword::new(next_code[len as usize], len);
            next_code[len as usize] += 1;

            codes[symbol as usize] = Some(codeword);
            ordered.push((symbol, codeword));
        }

        Self { codes, ordered }
    }

    /// Codeword for `symbol`, `None` if it is not in the table.
    pub fn get(&self, symbol: u8) -> Option<Codeword> {
        self.codes[symbol as usize]
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Codeword)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|code| (symbol as u8, code)))
    }

    /// Entries in canonical `(length, symbol)` order.
    pub fn canonical_order(&self) -> &[(u8, Codeword)] {
        &self.ordered
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Assign canonical codes for `lengths`. Never fails.
pub fn assign_canonical(lengths: &CodeLengths) -> CanonicalCodeTable {
    CanonicalCodeTable::from_lengths(lengths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_of(table: &CanonicalCodeTable) -> Vec<(u8, String)> {
        table
            .iter()
            .map(|(symbol, code)| (symbol, code.to_string()))
            .collect()
    }

    #[test]
    fn test_reference_codes() {
        let lengths = CodeLengths::from_pairs([
            (b'A', 4),
            (b'B', 4),
            (b'C', 3),
            (b'D', 3),
            (b'E', 3),
            (b'F', 1),
        ])
        .unwrap();
        let table = assign_canonical(&lengths);

        assert_eq!(
            codes_of(&table),
            vec![
                (b'A', "1110".to_string()),
                (b'B', "1111".to_string()),
                (b'C', "100".to_string()),
                (b'D', "101".to_string()),
                (b'E', "110".to_string()),
                (b'F', "0".to_string()),
            ]
        );

        let order: Vec<u8> = table.canonical_order().iter().map(|&(s, _)| s).collect();
        assert_eq!(order, b"FCDEAB".to_vec());
    }

    #[test]
    fn test_deflate_rfc1951_example() {
        // RFC 1951 section 3.2.2: lengths (3, 3, 3, 3, 3, 2, 4, 4) for A..H
        let lengths =
            CodeLengths::from_pairs(b"ABCDEFGH".iter().copied().zip([3, 3, 3, 3, 3, 2, 4, 4])).unwrap();
        let table = assign_canonical(&lengths);

        let expected = ["010", "011", "100", "101", "110", "00", "1110", "1111"];
        for (symbol, code) in b"ABCDEFGH".iter().zip(expected) {
            assert_eq!(table.get(*symbol).unwrap().to_string(), code);
        }
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let lengths = CodeLengths::from_pairs([(b'q', 1)]).unwrap();
        let table = assign_canonical(&lengths);

        assert_eq!(table.len(), 1);
        let code = table.get(b'q').unwrap();
        assert_eq!(code.len(), 1);
        assert_eq!(code.to_string(), "0");
    }

    #[test]
    fn test_two_symbols_lower_gets_zero() {
        let lengths = CodeLengths::from_pairs([(b'b', 1), (b'a', 1)]).unwrap();
        let table = assign_canonical(&lengths);

        assert_eq!(table.get(b'a').unwrap().to_string(), "0");
        assert_eq!(table.get(b'b').unwrap().to_string(), "1");
    }

    #[test]
    fn test_absent_symbol() {
        let lengths = CodeLengths::from_pairs([(b'a', 1), (b'b', 1)]).unwrap();
        let table = assign_canonical(&lengths);
        assert_eq!(table.get(b'c'), None);
    }

    #[test]
    fn test_canonical_order_strictly_increasing() {
        let lengths = CodeLengths::from_pairs([
            (0x00, 2),
            (0x10, 3),
            (0x7f, 2),
            (0x20, 3),
            (0xff, 3),
            (0x41, 3),
        ])
        .unwrap();
        let table = assign_canonical(&lengths);

        for pair in table.canonical_order().windows(2) {
            let (a, b) = (pair[0].1, pair[1].1);
            // Compare as left-aligned fractions so different lengths line up
            let shift_a = 64 - a.len() as u32;
            let shift_b = 64 - b.len() as u32;
            assert!((a.value() << shift_a) < (b.value() << shift_b));
            if a.len() == b.len() {
                assert_eq!(a.value() + 1, b.value());
            }
        }
    }
}
