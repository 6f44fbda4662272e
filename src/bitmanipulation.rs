use std::io::{self, Write};

/// Packs bits into bytes, most significant bit first.
pub struct BitWriter<W: Write> {
    sink: W,
    current: u8,
    count: u8,
    written: usize,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        BitWriter {
            sink,
            current: 0,
            count: 0,
            written: 0,
        }
    }

    /// Appends `bits`, each a `0` or `1`.
    pub fn write(&mut self, bits: &[u8]) -> io::Result<()> {
        for &bit in bits {
            self.current = (self.current << 1) | (bit & 0x01);
            self.count += 1;
            if self.count == 8 {
                self.sink.write_all(&[self.current])?;
                self.written += 1;
                self.current = 0;
                self.count = 0;
            }
        }
        Ok(())
    }

    /// Number of complete bytes handed to the sink so far.
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    /// Writes the pending partial byte, left-aligned, followed by the trailer
    /// byte holding its number of valid bits. With no pending bits the trailer
    /// is 8 and refers to the last full byte. Returns the trailer.
    pub fn finish(mut self) -> io::Result<u8> {
        let trailer = if self.count > 0 {
            let last = self.current << (8 - self.count);
            self.sink.write_all(&[last])?;
            self.written += 1;
            self.count
        } else {
            8
        };
        self.sink.write_all(&[trailer])?;
        self.sink.flush()?;
        Ok(trailer)
    }
}

/// Reads bits most significant first from a payload whose last byte only
/// holds `last_bits` valid bits.
pub struct BitReader<'a> {
    source: &'a [u8],
    last_bits: u8,
    index: usize,
    offset: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(source: &'a [u8], last_bits: u8) -> Self {
        BitReader {
            source,
            last_bits: last_bits.min(8),
            index: 0,
            offset: 0,
        }
    }

    pub fn read(&mut self) -> Option<u8> {
        let byte = *self.source.get(self.index)?;
        let valid = if self.index + 1 == self.source.len() {
            self.last_bits
        } else {
            8
        };
        if self.offset >= valid {
            return None;
        }

        let val = (byte >> (7 - self.offset)) & 0x01;
        self.offset += 1;
        if self.offset == 8 {
            self.index += 1;
            self.offset = 0;
        }
        Some(val)
    }
}

impl Iterator for BitReader<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.read()
    }
}
