//! Integration tests for the full canonical Huffman pipeline.
//!
//! These tests verify end-to-end behavior: input -> frequencies -> tree ->
//! lengths -> canonical table -> bitstream, and check the stream decodes back
//! to the input with a small test-only decoder.

use canonical_huffman_core::{
    assign_canonical, build_tree, compress, count, encode, BitStream, CanonicalCodeTable,
    CodeLengths, Codeword, Error, FrequencyTable, HuffmanError,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Decode `bits` by reading until the accumulated prefix matches a codeword.
fn decode(table: &CanonicalCodeTable, bits: &BitStream) -> Vec<u8> {
    let mut output = Vec::new();
    let mut value = 0u64;
    let mut len = 0u8;

    for bit in bits.iter() {
        value = (value << 1) | bit as u64;
        len += 1;
        let hit = table
            .iter()
            .find(|(_, code)| code.len() == len && code.value() == value);
        if let Some((symbol, _)) = hit {
            output.push(symbol);
            value = 0;
            len = 0;
        }
    }

    assert_eq!(len, 0, "trailing bits do not form a codeword");
    output
}

/// Random input over a skewed alphabet of `alphabet` symbols.
fn random_input(rng: &mut ChaCha8Rng, len: usize, alphabet: u16) -> Vec<u8> {
    (0..len)
        .map(|_| {
            // Squaring skews toward low symbols so code lengths vary
            let r: f64 = rng.gen();
            ((r * r) * alphabet as f64) as u8
        })
        .collect()
}

fn reference_frequencies() -> Vec<(u8, u64)> {
    vec![
        (b'A', 5),
        (b'B', 9),
        (b'C', 12),
        (b'D', 13),
        (b'E', 16),
        (b'F', 45),
    ]
}

/// The reference distribution end to end.
#[test]
fn test_reference_scenario() {
    let freqs = FrequencyTable::from_pairs(reference_frequencies()).unwrap();
    let (_, lengths) = build_tree(&freqs).unwrap();

    let expected_lengths = [(b'A', 4), (b'B', 4), (b'C', 3), (b'D', 3), (b'E', 3), (b'F', 1)];
    assert_eq!(lengths.iter().collect::<Vec<_>>(), expected_lengths);
    assert_eq!(lengths.weighted_bits(&freqs), 224);

    let table = assign_canonical(&lengths);
    let codes: Vec<(u8, String)> = table
        .canonical_order()
        .iter()
        .map(|&(symbol, code)| (symbol, code.to_string()))
        .collect();
    assert_eq!(
        codes,
        vec![
            (b'F', "0".to_string()),
            (b'C', "100".to_string()),
            (b'D', "101".to_string()),
            (b'E', "110".to_string()),
            (b'A', "1110".to_string()),
            (b'B', "1111".to_string()),
        ]
    );

    let stream = encode(&table, b"FAC").unwrap();
    assert_eq!(stream.bits().to_string(), "01110100");
    assert_eq!(stream.compressed_bits(), 8);
}

/// The root carries the total of all counts.
#[test]
fn test_conservation() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..50 {
        let len = rng.gen_range(1..2000);
        let alphabet = rng.gen_range(1..=256);
        let input = random_input(&mut rng, len, alphabet);

        let freqs = count(&input).unwrap();
        let (tree, lengths) = build_tree(&freqs).unwrap();

        assert_eq!(freqs.total(), input.len() as u64);
        assert_eq!(tree.total_freq(), freqs.total());
        assert_eq!(tree.merges(), freqs.len() - 1);
        assert_eq!(lengths.len(), freqs.len());
    }
}

/// Insertion order of the frequency pairs never changes the result.
#[test]
fn test_determinism_under_insertion_order() {
    let mut rng = ChaCha8Rng::seed_from_u64(12345);

    // Many equal counts so tie-breaking matters
    let mut pairs: Vec<(u8, u64)> = (0u8..40).map(|s| (s, (s % 4) as u64 + 1)).collect();
    let baseline_freqs = FrequencyTable::from_pairs(pairs.clone()).unwrap();
    let (baseline_tree, baseline_lengths) = build_tree(&baseline_freqs).unwrap();
    let baseline_table = assign_canonical(&baseline_lengths);

    for _ in 0..20 {
        pairs.shuffle(&mut rng);
        let freqs = FrequencyTable::from_pairs(pairs.clone()).unwrap();
        let (tree, lengths) = build_tree(&freqs).unwrap();
        let table = assign_canonical(&lengths);

        assert_eq!(tree, baseline_tree);
        assert_eq!(lengths, baseline_lengths);
        assert_eq!(table, baseline_table);
    }
}

/// Two runs over the same input agree bit for bit.
#[test]
fn test_repeat_runs_identical() {
    let input = b"It was the best of times, it was the worst of times.";
    let first = compress(input).unwrap();
    let second = compress(input).unwrap();

    assert_eq!(first.tree, second.tree);
    assert_eq!(first.table, second.table);
    assert_eq!(first.stream, second.stream);
}

/// No codeword is a prefix of another.
#[test]
fn test_prefix_freedom() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..30 {
        let alphabet = rng.gen_range(2..=256);
        let input = random_input(&mut rng, 3000, alphabet);
        let compression = compress(&input).unwrap();
        let codes: Vec<Codeword> = compression.table.iter().map(|(_, code)| code).collect();

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }
}

/// Codes follow the canonical recurrence in (length, symbol) order.
#[test]
fn test_canonical_ordering() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..30 {
        let alphabet = rng.gen_range(2..=256);
        let input = random_input(&mut rng, 5000, alphabet);
        let compression = compress(&input).unwrap();
        let ordered = compression.table.canonical_order();

        // Symbols are sorted by (length, symbol)
        for pair in ordered.windows(2) {
            let (sa, a) = pair[0];
            let (sb, b) = pair[1];
            assert!((a.len(), sa) < (b.len(), sb));
        }

        // First code is 0; each next code is previous + 1, shifted left by
        // the length difference
        let (_, first) = ordered[0];
        assert_eq!(first.value(), 0);
        for pair in ordered.windows(2) {
            let (a, b) = (pair[0].1, pair[1].1);
            let expected = (a.value() + 1) << (b.len() - a.len());
            assert_eq!(b.value(), expected);
        }

        // Complete code: Kraft sum is exactly 1
        let max_len = compression.lengths.max_length() as u32;
        let kraft: u128 = ordered
            .iter()
            .map(|(_, code)| 1u128 << (max_len - code.len() as u32))
            .sum();
        assert_eq!(kraft, 1u128 << max_len);
    }
}

/// The table can be rebuilt from the (symbol, length) list alone.
#[test]
fn test_reconstructible_from_lengths() {
    let compression = compress(b"canonical codes only need their lengths").unwrap();

    let pairs: Vec<(u8, u8)> = compression
        .table
        .canonical_order()
        .iter()
        .map(|&(symbol, code)| (symbol, code.len()))
        .collect();
    let rebuilt = assign_canonical(&CodeLengths::from_pairs(pairs).unwrap());

    assert_eq!(rebuilt, compression.table);
}

/// One distinct symbol still gets a 1-bit code.
#[test]
fn test_degenerate_alphabet() {
    let freqs = FrequencyTable::from_pairs([(b'#', 17)]).unwrap();
    let (tree, lengths) = build_tree(&freqs).unwrap();
    let table = assign_canonical(&lengths);

    assert_eq!(tree.merges(), 0);
    assert_eq!(lengths.get(b'#'), Some(1));
    assert_eq!(table.get(b'#').unwrap().to_string(), "0");

    let stream = encode(&table, b"###").unwrap();
    assert_eq!(stream.bits().to_string(), "000");
    assert_eq!(decode(&table, stream.bits()), b"###");
}

/// Equal-frequency pair: the lower symbol gets 0.
#[test]
fn test_two_equal_symbols() {
    let compression = compress(b"baba").unwrap();

    assert_eq!(compression.table.get(b'a').unwrap().to_string(), "0");
    assert_eq!(compression.table.get(b'b').unwrap().to_string(), "1");
    assert_eq!(compression.stream.bits().to_string(), "1010");
}

/// Encoding then decoding with the same table reproduces the input.
#[test]
fn test_round_trip_decodability() {
    let mut rng = ChaCha8Rng::seed_from_u64(31337);

    for _ in 0..25 {
        let len = rng.gen_range(1..4000);
        let alphabet = rng.gen_range(1..=256);
        let input = random_input(&mut rng, len, alphabet);

        let compression = compress(&input).unwrap();
        assert_eq!(decode(&compression.table, compression.stream.bits()), input);
    }
}

/// All 256 byte values, including non-printable ones.
#[test]
fn test_all_symbols() {
    let input: Vec<u8> = (0..=255).collect();
    let compression = compress(&input).unwrap();

    // Uniform counts over 256 symbols give a flat 8-bit code
    assert!(compression.table.iter().all(|(_, code)| code.len() == 8));
    assert_eq!(compression.stream.compressed_bits(), 256 * 8);
    assert_eq!(decode(&compression.table, compression.stream.bits()), input);
}

/// Huffman lengths are never worse than a fixed-width code.
#[test]
fn test_not_worse_than_fixed_width() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..20 {
        let alphabet = rng.gen_range(2..=256);
        let input = random_input(&mut rng, 2000, alphabet);
        let compression = compress(&input).unwrap();

        let distinct = compression.frequencies.len() as u64;
        let fixed_width = (64 - (distinct - 1).leading_zeros() as u64).max(1);
        assert!(compression.stream.compressed_bits() <= fixed_width * input.len() as u64);
        assert_eq!(
            compression.stream.compressed_bits(),
            compression.lengths.weighted_bits(&compression.frequencies)
        );
    }
}

/// Fibonacci counts 1, 1, 2, 3, 5, ... for symbols `0..n`.
fn fibonacci_pairs(n: u8) -> Vec<(u8, u64)> {
    let (mut a, mut b) = (1u64, 1u64);
    (0..n)
        .map(|symbol| {
            let count = a;
            (a, b) = (b, a + b);
            (symbol, count)
        })
        .collect()
}

/// The most skewed distribution that still fits 64-bit codewords encodes
/// and decodes; one that does not is rejected up front.
#[test]
fn test_fibonacci_depth_limit() {
    let freqs = FrequencyTable::from_pairs(fibonacci_pairs(65)).unwrap();
    let (_, lengths) = build_tree(&freqs).unwrap();
    assert_eq!(lengths.max_length(), 64);

    let table = assign_canonical(&lengths);
    let input: Vec<u8> = (0u8..65).rev().collect();
    let stream = encode(&table, &input).unwrap();
    assert_eq!(stream.compressed_bits(), lengths.iter().map(|(_, len)| len as u64).sum::<u64>());
    assert_eq!(decode(&table, stream.bits()), input);

    let result = FrequencyTable::from_pairs(fibonacci_pairs(70));
    assert!(matches!(
        result,
        Err(Error::Huffman(HuffmanError::CodeTooLong { length: 69, max: 64 }))
    ));
}

/// Lengths that no prefix code can have are refused before assignment.
#[test]
fn test_invalid_lengths_rejected() {
    let result = CodeLengths::from_pairs([(b'a', 1), (b'b', 1), (b'c', 1)]);
    assert!(matches!(
        result,
        Err(Error::Huffman(HuffmanError::OversubscribedLengths))
    ));
}

/// Counts summing past `u64::MAX` are refused instead of wrapping.
#[test]
fn test_frequency_overflow_rejected() {
    let result = FrequencyTable::from_pairs([(b'a', 1 << 63), (b'b', 1 << 63)]);
    assert!(matches!(
        result,
        Err(Error::Huffman(HuffmanError::FrequencyOverflow))
    ));
}
