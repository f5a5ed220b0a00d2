use byteorder::{BigEndian, ByteOrder};

use super::error::{Result, YsfcError};
use super::models::{DataBlock, Entry};

const SUB_FRAME_LEN: u32 = 8;
const DATA_MAGIC: &[u8] = b"Data";

impl DataBlock {
    /// Resolves an entry's offset/size pair to the payload bytes it names.
    ///
    /// Entry offsets are measured from the start of the data block's frame
    /// and point just past an eight-byte `Data` sub-frame. In payload
    /// coordinates the sub-frame therefore sits at `offset - 8` and the
    /// data itself spans `offset..offset + size`. The length recorded in
    /// the sub-frame must agree with the entry's size.
    pub fn slice_for(&self, entry: &Entry) -> Result<&[u8]> {
        let have = self.len();
        let out_of_bounds = || YsfcError::DataRangeOutOfBounds {
            block: self.id(),
            offset: entry.offset,
            size: entry.size,
            have,
        };

        if entry.offset < SUB_FRAME_LEN {
            return Err(out_of_bounds());
        }
        let start = entry.offset as usize;
        let end = start
            .checked_add(entry.size as usize)
            .filter(|&end| end <= have)
            .ok_or_else(out_of_bounds)?;

        let frame = &self.payload()[start - SUB_FRAME_LEN as usize..start];
        if &frame[..4] != DATA_MAGIC {
            return Err(YsfcError::BadDataMagic {
                block: self.id(),
                offset: entry.offset,
                found: String::from_utf8_lossy(&frame[..4]).into_owned(),
            });
        }
        let declared = BigEndian::read_u32(&frame[4..8]);
        if declared != entry.size {
            return Err(YsfcError::DataSizeMismatch {
                block: self.id(),
                expected: entry.size,
                found: declared,
            });
        }
        Ok(&self.payload()[start..end])
    }
}
