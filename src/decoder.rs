use std::io::Write;

use tracing::debug;

use crate::{
    bitmanipulation::BitReader, error::CompressError, header::FrequencyTable, tree::HuffmanTree,
};

pub(crate) struct HuffmanDecoder {
    tree: HuffmanTree,
    expected: u64,
}

impl HuffmanDecoder {
    pub fn new(header: &FrequencyTable) -> Result<HuffmanDecoder, CompressError> {
        Ok(HuffmanDecoder {
            tree: HuffmanTree::create(header)?,
            expected: header.total(),
        })
    }

    /// Decodes `source`, the bytes following the header: payload then trailer.
    /// Returns the number of symbols written.
    pub fn decode<W: Write>(&self, source: &[u8], writer: &mut W) -> Result<u64, CompressError> {
        let Some((&trailer, payload)) = source.split_last() else {
            return Err(CompressError::TruncatedPayload {
                expected: self.expected,
                decoded: 0,
            });
        };
        if !(1..=8).contains(&trailer) {
            return Err(CompressError::InvalidTrailer(trailer));
        }
        debug!(payload = payload.len(), trailer, "decoding payload");

        let decoded = match &self.tree {
            HuffmanTree::Leaf(count, symbol) => self.repeat(*symbol, *count, payload, writer)?,
            HuffmanTree::Node(_, _, _) => self.walk(payload, trailer, writer)?,
        };
        writer.flush()?;
        Ok(decoded)
    }

    /// A lone leaf has an empty code, so the count comes from the header alone.
    fn repeat<W: Write>(
        &self,
        symbol: u8,
        count: u64,
        payload: &[u8],
        writer: &mut W,
    ) -> Result<u64, CompressError> {
        if !payload.is_empty() {
            return Err(CompressError::TrailingPayload {
                expected: self.expected,
            });
        }

        let chunk = [symbol; 4096];
        let mut left = count;
        while left > 0 {
            let n = left.min(chunk.len() as u64) as usize;
            writer.write_all(&chunk[..n])?;
            left -= n as u64;
        }
        Ok(count)
    }

    fn walk<W: Write>(
        &self,
        payload: &[u8],
        last_bits: u8,
        writer: &mut W,
    ) -> Result<u64, CompressError> {
        let mut decoded = 0;
        let mut current = &self.tree;

        for bit in BitReader::new(payload, last_bits) {
            // Move on the tree based on bit value
            match current {
                HuffmanTree::Node(_, left, right) => {
                    if bit == 0 {
                        current = left.as_ref();
                    } else {
                        current = right.as_ref();
                    }
                }
                HuffmanTree::Leaf(_, _) => current = &self.tree,
            }

            // Write to output if we catched a value
            if let HuffmanTree::Leaf(_, value) = current {
                if decoded == self.expected {
                    return Err(CompressError::TrailingPayload {
                        expected: self.expected,
                    });
                }
                writer.write_all(&[*value])?;
                decoded += 1;
                current = &self.tree;
            }
        }

        if decoded < self.expected {
            return Err(CompressError::TruncatedPayload {
                expected: self.expected,
                decoded,
            });
        }
        // Leftover bits that stop halfway down the tree
        if !std::ptr::eq(current, &self.tree) {
            return Err(CompressError::TrailingPayload {
                expected: self.expected,
            });
        }
        Ok(decoded)
    }
}
