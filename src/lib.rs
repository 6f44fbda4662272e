//! Lossless byte-stream compression with Huffman coding.
//!
//! A compressed file is laid out as:
//!
//! ```text
//! [256 x u32 little-endian counts, symbol order]  frequency header
//! [packed code bits, most significant bit first]  payload
//! [1 byte: valid bits in the last payload byte]   trailer, 1..=8
//! ```
//!
//! The decoder rebuilds the tree from the header, so only the counts are
//! stored. Input made of a single repeated byte has an empty payload and is
//! restored from its count alone.

use std::{io::Write, path::Path};

use tracing::{debug, info};

pub mod bitmanipulation;
pub mod codes;
mod decoder;
mod encoder;
pub mod error;
pub mod files;
pub mod header;
pub mod queue;
pub mod tree;

pub use error::CompressError;
pub use header::{FrequencyTable, Symbol, HEADER_LEN};

use decoder::HuffmanDecoder;
use encoder::HuffmanEncoder;
use tree::HuffmanTree;

pub fn count_frequencies(input: &[u8]) -> Result<FrequencyTable, CompressError> {
    FrequencyTable::count(input)
}

/// Compresses the file at `input` into `output`. Nothing is written when the
/// input is empty or any step fails.
pub fn compress(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), CompressError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let source = files::read_all(input)?;

    let header = count_frequencies(&source)?;
    let tree = HuffmanTree::create(&header)?;

    files::write_atomically(output, |writer| {
        encode_with(&header, &tree, &source, writer).map_err(|e| CompressError::io(output, e))
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = source.len(),
        "file compressed"
    );
    Ok(())
}

/// Restores a file written by [`compress`]. Nothing is written when the input
/// is malformed.
pub fn decompress(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), CompressError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let source = files::read_all(input)?;

    let header = FrequencyTable::read(&source)?;
    let decoder = HuffmanDecoder::new(&header)?;

    let mut decoded = 0;
    files::write_atomically(output, |writer| {
        decoded = decoder.decode(&source[HEADER_LEN..], writer)?;
        Ok(())
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = decoded,
        "file decompressed"
    );
    Ok(())
}

pub fn compress_bytes(input: &[u8]) -> Result<Vec<u8>, CompressError> {
    let header = count_frequencies(input)?;
    let tree = HuffmanTree::create(&header)?;

    let mut output = Vec::with_capacity(HEADER_LEN + input.len() / 2 + 2);
    encode_with(&header, &tree, input, &mut output)?;
    Ok(output)
}

pub fn decompress_bytes(input: &[u8]) -> Result<Vec<u8>, CompressError> {
    let header = FrequencyTable::read(input)?;
    let decoder = HuffmanDecoder::new(&header)?;

    let mut output = Vec::new();
    decoder.decode(&input[HEADER_LEN..], &mut output)?;
    Ok(output)
}

fn encode_with<W: Write>(
    header: &FrequencyTable,
    tree: &HuffmanTree,
    source: &[u8],
    sink: &mut W,
) -> std::io::Result<()> {
    debug!(
        symbols = header.distinct(),
        weight = tree.value(),
        depth = tree.depth(),
        "built Huffman tree"
    );
    HuffmanEncoder::new(header, tree).encode(source, sink)
}

#[cfg(test)]
mod tests {
    use crate::{compress_bytes, decompress_bytes, error::CompressError, HEADER_LEN};

    #[test]
    fn round_trip() {
        let input = b"AAAABBBCCD";
        let compressed = compress_bytes(input).unwrap();
        assert_eq!(compressed.len(), HEADER_LEN + 4);
        assert_eq!(decompress_bytes(&compressed).unwrap(), input);
    }

    #[test]
    fn single_repeated_byte() {
        let input = vec![0x41; 1000];
        let compressed = compress_bytes(&input).unwrap();
        assert_eq!(compressed.len(), HEADER_LEN + 1);
        assert_eq!(decompress_bytes(&compressed).unwrap(), input);
    }

    #[test]
    fn empty_input() {
        assert!(matches!(compress_bytes(b""), Err(CompressError::EmptyInput)));
    }

    #[test]
    fn truncated_header() {
        let compressed = compress_bytes(b"hello").unwrap();
        assert!(matches!(
            decompress_bytes(&compressed[..100]),
            Err(CompressError::CorruptHeader { found: 100, .. })
        ));
    }
}
