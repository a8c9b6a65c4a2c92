//! Sample input generation.
//!
//! When `--sample` is given, we generate a line of text-like printable ASCII
//! so the code tables are interesting: a skewed letter distribution, word
//! breaks, and occasional punctuation.
//!
//! # Design
//!
//! Generated text has:
//! - Letters drawn with English-like skew (frequent letters first)
//! - Words of 1-8 letters separated by single spaces
//! - A sprinkling of punctuation at word ends
//!
//! Every byte is in 32..=126, so samples always pass input validation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Letters ordered roughly by English frequency.
const LETTERS: &[u8] = b"etaoinshrdlcumwfgypbvkjxqz";

const PUNCTUATION: &[u8] = b".,;!?";

/// Generate a sample line of exactly `len` printable bytes.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `len`: exact length of the generated text
pub fn generate_sample_text(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = Vec::with_capacity(len + 9);

    while text.len() < len {
        if !text.is_empty() {
            text.push(b' ');
        }

        let word_len = rng.gen_range(1..=8);
        for _ in 0..word_len {
            text.push(pick_letter(&mut rng));
        }

        // ~15% of words end with punctuation
        if rng.gen_bool(0.15) {
            let idx = rng.gen_range(0..PUNCTUATION.len());
            text.push(PUNCTUATION[idx]);
        }
    }

    text.truncate(len);
    text
}

/// Pick a letter, biased toward the front of `LETTERS`.
fn pick_letter(rng: &mut ChaCha8Rng) -> u8 {
    let r: f64 = rng.gen();
    let idx = ((r * r) * LETTERS.len() as f64) as usize;
    LETTERS[idx.min(LETTERS.len() - 1)]
}
