use std::io::{Error, ErrorKind, Result, Write};

use tracing::debug;

use crate::{
    bitmanipulation::BitWriter, codes::CodeTable, header::FrequencyTable, tree::HuffmanTree,
};

pub(crate) struct HuffmanEncoder<'a> {
    header: &'a FrequencyTable,
    codes: CodeTable,
}

impl<'a> HuffmanEncoder<'a> {
    pub fn new(header: &'a FrequencyTable, tree: &HuffmanTree) -> Self {
        HuffmanEncoder {
            header,
            codes: CodeTable::create(tree),
        }
    }

    /// Writes header, packed payload and trailer for `source`, which must be
    /// the input `header` was counted from.
    pub fn encode<W: Write>(&self, source: &[u8], sink: &mut W) -> Result<()> {
        debug!("code table:\n{}", self.codes);

        self.header.write(sink)?;

        let mut writer = BitWriter::new(sink);
        for &byte in source {
            let Some(code) = self.codes.get(byte) else {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("symbol {byte:#04x} missing from the code table"),
                ));
            };
            writer.write(code)?;
        }
        let payload = writer.bytes_written();
        let trailer = writer.finish()?;
        debug!(payload, trailer, "payload written");

        Ok(())
    }
}
