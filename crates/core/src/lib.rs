//! canonical-huffman-core: canonical Huffman code construction and encoding
//!
//! This library turns a byte sequence into an optimal prefix code in
//! canonical form and encodes the sequence with it:
//! - Counts symbol frequencies
//! - Builds a Huffman tree with a deterministic merge order
//! - Derives canonical codes from code lengths alone
//! - Concatenates codewords into a packed MSB-first bitstream
//!
//! # Architecture
//!
//! The pipeline is a strict forward chain; each module only consumes the
//! output of the one before it:
//! - `frequency`: symbol counting (`count`)
//! - `tree`: greedy merge tree and code lengths (`build_tree`)
//! - `canonical`: canonical code assignment (`assign_canonical`)
//! - `encoder`: bitstream encoding (`encode`)
//! - `bitio`: codewords and packed bit streams
//! - `metrics`: per-run numbers for reporting
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and returned to the caller
//! - **Deterministic**: Every tie-break is a total order, so identical input
//!   yields an identical tree, lengths and code table
//! - **Silent**: The core never logs; presentation belongs to the caller
//!
//! # Example
//! ```
//! let compression = canonical_huffman_core::compress(b"FAC").unwrap();
//! assert_eq!(compression.stream.original_bits(), 24);
//! assert_eq!(compression.stream.compressed_bits(), 5);
//! ```

pub mod bitio;
pub mod canonical;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use bitio::{BitStream, Codeword};
pub use canonical::{assign_canonical, CanonicalCodeTable};
pub use encoder::{encode, EncodedStream};
pub use error::{Error, HuffmanError, Result};
pub use frequency::{count, FrequencyTable};
pub use tree::{build_tree, CodeLengths, HuffmanTree, Node, NodeId};

/// Every artifact of one run of the pipeline over an input.
#[derive(Debug, Clone)]
pub struct Compression {
    pub frequencies: FrequencyTable,
    pub tree: HuffmanTree,
    pub lengths: CodeLengths,
    pub table: CanonicalCodeTable,
    pub stream: EncodedStream,
}

/// Run the whole pipeline: count, build the tree, assign canonical codes and
/// encode `symbols`.
///
/// # Errors
/// - `HuffmanError::EmptyInput` if `symbols` is empty
/// - `HuffmanError::CodeTooLong` if a code would exceed 64 bits
/// - `HuffmanError::MissingCodeEntry` if the stages disagree (a bug)
pub fn compress(symbols: &[u8]) -> Result<Compression> {
    let frequencies = count(symbols)?;
    let (tree, lengths) = build_tree(&frequencies)?;
    let table = assign_canonical(&lengths);
    let stream = encode(&table, symbols)?;

    Ok(Compression {
        frequencies,
        tree,
        lengths,
        table,
        stream,
    })
}
