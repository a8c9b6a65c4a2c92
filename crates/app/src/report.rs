//! Text report of one encoding run.
//!
//! Every section is rendered into a `String` so the layout can be tested;
//! `main` only prints the result. The report reads the core's artifacts and
//! never changes them.

use canonical_huffman_core::metrics::Metrics;
use canonical_huffman_core::{BitStream, Compression, FrequencyTable, HuffmanTree, Node, NodeId};

/// How a symbol is shown in tables.
pub fn show_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => "' ' (space)".to_string(),
        33..=126 => (symbol as char).to_string(),
        _ => format!("0x{symbol:02X}"),
    }
}

/// How a symbol is shown inside the tree rendering.
fn tree_symbol(symbol: u8) -> String {
    match symbol {
        32..=126 => (symbol as char).to_string(),
        _ => format!("\\x{symbol:02X}"),
    }
}

/// `=== Frequency table ===`, ordered by symbol.
pub fn frequency_table(freqs: &FrequencyTable) -> String {
    let rows: String = freqs
        .iter()
        .map(|(symbol, count)| format!("{}\t: {}\n", show_symbol(symbol), count))
        .collect();
    format!("=== Frequency table ===\n{rows}")
}

/// Per-symbol frequency, length, tree-path code and canonical code.
pub fn code_table(compression: &Compression) -> String {
    let mut out = String::from("=== Codes and lengths per symbol ===\n");
    out.push_str("Symbol\tFreq\tLen\tHuffman(non-canonical)\tCanonical\n");

    let path_codes = compression.tree.path_codes();
    for (symbol, freq) in compression.frequencies.iter() {
        let len = compression
            .lengths
            .get(symbol)
            .map_or_else(|| "?".to_string(), |len| len.to_string());
        let path = path_codes
            .binary_search_by_key(&symbol, |&(s, _)| s)
            .map_or_else(|_| "?".to_string(), |idx| path_codes[idx].1.to_string());
        let canonical = compression
            .table
            .get(symbol)
            .map_or_else(|| "?".to_string(), |code| code.to_string());

        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t\t{}\n",
            show_symbol(symbol),
            freq,
            len,
            path,
            canonical
        ));
    }
    out
}

/// Preorder rendering: leaves as `'<symbol>':<freq>`, internal nodes as
/// `(<freq> <left> <right>)`.
pub fn tree_preorder(tree: &HuffmanTree) -> String {
    render_node(tree, tree.root())
}

fn render_node(tree: &HuffmanTree, id: NodeId) -> String {
    match *tree.node(id) {
        Node::Leaf { symbol, freq } => format!("'{}':{}", tree_symbol(symbol), freq),
        Node::Internal {
            freq, left, right, ..
        } => format!(
            "({freq} {} {})",
            render_node(tree, left),
            render_node(tree, right)
        ),
    }
}

/// First `max_bits` bits of the stream, or `(empty)`.
pub fn bit_preview(bits: &BitStream, max_bits: usize) -> String {
    if bits.is_empty() {
        "(empty)".to_string()
    } else {
        bits.prefix_string(max_bits)
    }
}

/// Uppercase two-digit hex bytes separated by single spaces.
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `=== Compression ===`: sizes, ratio, preview and hex stream.
pub fn compression_summary(compression: &Compression, metrics: &Metrics, preview_bits: usize) -> String {
    let bits = compression.stream.bits();
    let shown = preview_bits.min(bits.len());

    format!(
        "=== Compression ===\n\
         Original (bits) : {original} ({symbols} chars x 8)\n\
         Compressed (bits): {compressed}\n\
         Ratio: {ratio:.6}    Reduction: {reduction:.6}%\n\
         \n\
         First {shown} bits (or fewer if the stream is shorter):\n\
         {preview}\n\
         \n\
         Stream (hex, MSB-first bytes, last byte padded with zeros):\n\
         {hex}\n\
         \n\
         (Only the first {shown} bits are shown above; total size in bits: {compressed})\n",
        original = metrics.original_bits,
        symbols = metrics.input_symbols,
        compressed = metrics.compressed_bits,
        ratio = metrics.compression_ratio(),
        reduction = metrics.reduction_percent(),
        preview = bit_preview(bits, preview_bits),
        hex = hex_dump(compression.stream.packed_bytes()),
    )
}

/// The full report, sections separated by blank lines.
pub fn render(compression: &Compression, metrics: &Metrics, preview_bits: usize) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&frequency_table(&compression.frequencies));
    out.push('\n');
    out.push_str(&code_table(compression));
    out.push_str("\n=== Huffman Tree (textual preorder) ===\n");
    out.push_str(&tree_preorder(&compression.tree));
    out.push_str("\n\n");
    out.push_str(&compression_summary(compression, metrics, preview_bits));
    out
}
