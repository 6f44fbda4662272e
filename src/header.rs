use std::io::{self, Write};

use crate::error::CompressError;

/// One byte value of the input stream.
pub type Symbol = u8;

/// Number of distinct symbols.
pub const SYMBOLS: usize = 256;

/// Size of the serialized frequency table: one little-endian `u32` per symbol.
pub const HEADER_LEN: usize = SYMBOLS * 4;

/// Occurrence count of every symbol, in symbol order.
///
/// This is the only metadata stored in a compressed file: the decoder rebuilds
/// the exact same tree from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; SYMBOLS],
}

impl FrequencyTable {
    /// Counts every byte of `input`.
    pub fn count(input: &[u8]) -> Result<Self, CompressError> {
        let mut wide = [0u64; SYMBOLS];
        for &byte in input {
            wide[byte as usize] += 1;
        }

        let mut counts = [0u32; SYMBOLS];
        for (symbol, (slot, &count)) in counts.iter_mut().zip(wide.iter()).enumerate() {
            *slot = u32::try_from(count).map_err(|_| CompressError::FrequencyOverflow {
                symbol: symbol as Symbol,
            })?;
        }
        Ok(Self { counts })
    }

    pub fn from_counts(counts: [u32; SYMBOLS]) -> Self {
        Self { counts }
    }

    pub fn get(&self, symbol: Symbol) -> u32 {
        self.counts[symbol as usize]
    }

    /// Symbols with a non-zero count, ascending.
    pub fn symbols(&self) -> impl Iterator<Item = (Symbol, u32)> + '_ {
        (0..=Symbol::MAX)
            .zip(self.counts.iter().copied())
            .filter(|(_, count)| *count > 0)
    }

    pub fn distinct(&self) -> usize {
        self.symbols().count()
    }

    /// Total number of symbols, i.e. the length of the original input.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| count as u64).sum()
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for count in self.counts.iter() {
            writer.write_all(&count.to_le_bytes())?;
        }
        Ok(())
    }

    /// Reads the table from the first [`HEADER_LEN`] bytes of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self, CompressError> {
        if bytes.len() < HEADER_LEN {
            return Err(CompressError::CorruptHeader {
                expected: HEADER_LEN,
                found: bytes.len(),
            });
        }

        let mut counts = [0u32; SYMBOLS];
        for (slot, chunk) in counts.iter_mut().zip(bytes[..HEADER_LEN].chunks_exact(4)) {
            *slot = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(Self { counts })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::CompressError,
        header::{FrequencyTable, HEADER_LEN},
    };

    #[test]
    fn test_count_frequencies() {
        let table = FrequencyTable::count("hello, I'm testing".as_bytes()).unwrap();
        assert_eq!(table.get(b'h'), 1);
        assert_eq!(table.get(b'e'), 2);
        assert_eq!(table.get(b'l'), 2);
        assert_eq!(table.get(b't'), 2);
        assert_eq!(table.get(b' '), 2);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.distinct(), 14);
        assert_eq!(table.total(), 18);
    }

    #[test]
    fn counting_twice_gives_the_same_table() {
        let input = b"AAAABBBCCD";
        assert_eq!(
            FrequencyTable::count(input).unwrap(),
            FrequencyTable::count(input).unwrap()
        );
    }

    #[test]
    fn symbols_are_ascending_and_present_only() {
        let table = FrequencyTable::count(b"cabbac").unwrap();
        let symbols: Vec<_> = table.symbols().collect();
        assert_eq!(symbols, vec![(b'a', 2), (b'b', 2), (b'c', 2)]);
    }

    #[test]
    fn test_encode_header() {
        let table = FrequencyTable::count(b"abacba").unwrap();
        let mut bytes = Vec::new();
        table.write(&mut bytes).unwrap();

        assert_eq!(bytes.len(), HEADER_LEN);
        let a = b'a' as usize * 4;
        assert_eq!(&bytes[a..a + 12], &[3, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0]);
        assert!(bytes[..a].iter().all(|&b| b == 0));
        assert!(bytes[a + 12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_header() {
        let mut encoded = vec![0u8; HEADER_LEN];
        let a = b'a' as usize * 4;
        encoded[a..a + 4].copy_from_slice(&0x0102_0304u32.to_le_bytes());

        let table = FrequencyTable::read(&encoded).unwrap();
        assert_eq!(table.get(b'a'), 0x0102_0304);
        assert_eq!(table.distinct(), 1);
    }

    #[test]
    fn short_header_is_rejected() {
        let encoded = vec![0u8; HEADER_LEN - 1];
        assert!(matches!(
            FrequencyTable::read(&encoded),
            Err(CompressError::CorruptHeader {
                expected: HEADER_LEN,
                found
            }) if found == HEADER_LEN - 1
        ));
    }
}
