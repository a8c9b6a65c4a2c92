//! Huffman tree construction by greedy pairwise merging.
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to their children by index,
//! so the tree is a plain value that can be cloned and compared.
//!
//! # Merge Order
//!
//! The priority queue is keyed by `(frequency, min_symbol)`, lowest first.
//! `min_symbol` is the smallest symbol in a node's subtree. Live subtrees are
//! disjoint, so the key is unique and the merge sequence (and therefore the
//! tree shape) never depends on insertion order. Of each popped pair, the
//! first becomes the left child and the second the right child.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::bitio::{Codeword, MAX_CODEWORD_BITS};
use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// A node of the Huffman tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A single symbol and its frequency.
    Leaf { symbol: u8, freq: u64 },
    /// Two children and the sum of their frequencies.
    Internal {
        freq: u64,
        /// Smallest symbol under this node, only used for tie-breaking
        min_symbol: u8,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match *self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => freq,
        }
    }

    pub fn min_symbol(&self) -> u8 {
        match *self {
            Node::Leaf { symbol, .. } => symbol,
            Node::Internal { min_symbol, .. } => min_symbol,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A live subtree waiting in the merge queue.
#[derive(Debug, Clone, Copy)]
struct MergeCandidate {
    freq: u64,
    min_symbol: u8,
    node: NodeId,
}

impl MergeCandidate {
    fn key(&self) -> (u64, u8) {
        (self.freq, self.min_symbol)
    }
}

// Ordering for the heap (min-heap: lowest frequency, then lowest symbol first)
impl PartialEq for MergeCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for MergeCandidate {}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest key
        other.key().cmp(&self.key())
    }
}

/// An optimal binary prefix tree over the symbols of a `FrequencyTable`.
///
/// # Invariants
/// - `nodes` holds `2k - 1` nodes for `k` distinct symbols
/// - every node except `root` is the child of exactly one internal node
/// - an internal node's frequency is the sum of its children's
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for `freqs`.
    ///
    /// A table with a single symbol yields a lone leaf and no merges.
    ///
    /// # Errors
    /// `HuffmanError::EmptyInput` if the table has no symbols.
    pub fn build(freqs: &FrequencyTable) -> Result<Self> {
        let distinct = freqs.len();
        if distinct == 0 {
            return Err(HuffmanError::EmptyInput.into());
        }

        let mut nodes = Vec::with_capacity(2 * distinct - 1);
        let mut queue = BinaryHeap::with_capacity(distinct);

        for (symbol, freq) in freqs.iter() {
            let node = nodes.len();
            nodes.push(Node::Leaf { symbol, freq });
            queue.push(MergeCandidate {
                freq,
                min_symbol: symbol,
                node,
            });
        }

        let root = loop {
            let Some(left) = queue.pop() else {
                return Err(HuffmanError::EmptyInput.into());
            };
            let Some(right) = queue.pop() else {
                break left.node;
            };

            // Bounded by the table total, which fits a u64
            let merged = MergeCandidate {
                freq: left.freq + right.freq,
                min_symbol: left.min_symbol.min(right.min_symbol),
                node: nodes.len(),
            };
            nodes.push(Node::Internal {
                freq: merged.freq,
                min_symbol: merged.min_symbol,
                left: left.node,
                right: right.node,
            });
            queue.push(merged);
        };

        Ok(Self { nodes, root })
    }

    /// Arena index of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node at `id`.
    ///
    /// # Panics
    /// If `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// All nodes: leaves first in ascending symbol order, then internal nodes
    /// in merge order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of merge steps performed (internal node count).
    pub fn merges(&self) -> usize {
        self.nodes.iter().filter(|node| !node.is_leaf()).count()
    }

    /// Total frequency at the root.
    pub fn total_freq(&self) -> u64 {
        self.nodes[self.root].freq()
    }

    /// Depth of the deepest leaf; 0 for a lone root leaf.
    pub fn max_depth(&self) -> usize {
        let mut max = 0;
        self.visit_leaves(|_, _, depth| max = max.max(depth));
        max
    }

    /// Code length of every symbol: the depth of its leaf.
    ///
    /// A lone root leaf gets length 1.
    pub fn code_lengths(&self) -> CodeLengths {
        let mut lengths = [0u8; ALPHABET_SIZE];
        // 256 leaves at most, so depth <= 255
        self.visit_leaves(|symbol, _, depth| lengths[symbol as usize] = depth.max(1) as u8);
        CodeLengths { lengths }
    }

    /// Depth-derived (non-canonical) codes, one per symbol, ascending by
    /// symbol. Left edges are `0`, right edges `1`; a lone leaf gets `0`.
    ///
    /// Trees built from a `FrequencyTable` are never deeper than
    /// `MAX_CODEWORD_BITS`, so every path fits a `Codeword`.
    pub fn path_codes(&self) -> Vec<(u8, Codeword)> {
        let mut codes = Vec::with_capacity(self.nodes.len() / 2 + 1);
        self.visit_leaves(|symbol, path, depth| {
            let codeword = match depth {
                0 => Codeword::new(0, 1),
                depth => Codeword::new(path, depth as u8),
            };
            codes.push((symbol, codeword));
        });
        codes.sort_unstable_by_key(|&(symbol, _)| symbol);
        codes
    }

    /// Depth-first walk handing each leaf its root-to-leaf path and depth.
    ///
    /// `path` keeps only the low 64 edges; `depth` is always exact.
    fn visit_leaves(&self, mut visit: impl FnMut(u8, u64, usize)) {
        let mut stack = vec![(self.root, 0u64, 0usize)];

        while let Some((id, path, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => visit(symbol, path, depth),
                Node::Internal { left, right, .. } => {
                    stack.push((right, (path << 1) | 1, depth + 1));
                    stack.push((left, path << 1, depth + 1));
                }
            }
        }
    }
}

/// Code length per symbol, one entry per distinct input symbol.
///
/// # Invariants
/// - every present symbol has a length >= 1
/// - at least one symbol is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLengths {
    /// 0 marks an absent symbol
    lengths: [u8; ALPHABET_SIZE],
}

impl CodeLengths {
    /// Build from explicit `(symbol, length)` pairs.
    ///
    /// Zero lengths are ignored and a repeated symbol keeps its last length.
    /// The lengths need not fill the code space, but must fit in it.
    ///
    /// # Errors
    /// - `HuffmanError::EmptyInput` if no pair carries a non-zero length
    /// - `HuffmanError::CodeTooLong` if a length exceeds `MAX_CODEWORD_BITS`
    /// - `HuffmanError::OversubscribedLengths` if the Kraft sum
    ///   `sum(2^-len)` is above 1, so no prefix code has these lengths
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u8)>,
    {
        let mut lengths = [0u8; ALPHABET_SIZE];
        for (symbol, len) in pairs {
            lengths[symbol as usize] = len;
        }

        if lengths.iter().all(|&len| len == 0) {
            return Err(HuffmanError::EmptyInput.into());
        }

        if let Some(&len) = lengths.iter().find(|&&len| len > MAX_CODEWORD_BITS) {
            return Err(HuffmanError::CodeTooLong {
                length: len as usize,
                max: MAX_CODEWORD_BITS,
            }
            .into());
        }

        // Kraft sum scaled by 2^64; at most 256 terms of at most 2^63 each
        let kraft: u128 = lengths
            .iter()
            .filter(|&&len| len > 0)
            .map(|&len| 1u128 << (MAX_CODEWORD_BITS - len))
            .sum();
        if kraft > 1u128 << MAX_CODEWORD_BITS {
            return Err(HuffmanError::OversubscribedLengths.into());
        }

        Ok(Self { lengths })
    }

    /// Length for `symbol`, `None` if it is not in the code.
    pub fn get(&self, symbol: u8) -> Option<u8> {
        match self.lengths[symbol as usize] {
            0 => None,
            len => Some(len),
        }
    }

    /// Present symbols with their lengths, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.lengths
            .iter()
            .enumerate()
            .filter(|(_, &len)| len > 0)
            .map(|(symbol, &len)| (symbol as u8, len))
    }

    /// Number of symbols in the code.
    pub fn len(&self) -> usize {
        self.lengths.iter().filter(|&&len| len > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest code length.
    pub fn max_length(&self) -> u8 {
        self.lengths.iter().copied().max().unwrap_or(0)
    }

    /// Sum of `freq * length` over all symbols of `freqs`.
    ///
    /// Symbols of `freqs` missing from the code contribute nothing.
    pub fn weighted_bits(&self, freqs: &FrequencyTable) -> u64 {
        freqs
            .iter()
            .map(|(symbol, freq)| freq * self.lengths[symbol as usize] as u64)
            .sum()
    }
}

/// Build the Huffman tree for `freqs` and read off each symbol's code length.
///
/// # Errors
/// `HuffmanError::EmptyInput` if the table has no symbols.
pub fn build_tree(freqs: &FrequencyTable) -> Result<(HuffmanTree, CodeLengths)> {
    let tree = HuffmanTree::build(freqs)?;
    let lengths = tree.code_lengths();
    Ok((tree, lengths))
}
