use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("I/O error on \"{}\"", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Generic I/O error")]
    IoError(#[from] io::Error),

    #[error("frequency header is truncated: expected {expected} bytes, found {found}")]
    CorruptHeader { expected: usize, found: usize },

    #[error("input is empty, no Huffman tree can be built")]
    EmptyInput,

    #[error("payload is truncated: decoded {decoded} of {expected} symbols")]
    TruncatedPayload { expected: u64, decoded: u64 },

    #[error("invalid trailer byte {0}, expected a bit count between 1 and 8")]
    InvalidTrailer(u8),

    #[error("payload carries data past the {expected} symbols declared in the header")]
    TrailingPayload { expected: u64 },

    #[error("symbol {symbol:#04x} occurs more than {} times", u32::MAX)]
    FrequencyOverflow { symbol: u8 },
}

impl CompressError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CompressError::Io {
            path: path.into(),
            source,
        }
    }
}
