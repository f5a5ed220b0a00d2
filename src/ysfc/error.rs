use thiserror::Error;

use super::models::{BlockId, FormatVersion};

/// Error type for everything that can go wrong while decoding a YSFC file.
#[derive(Error, Debug)]
pub enum YsfcError {
    /// Underlying I/O failure while reading from the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file ended before the fixed-size 64-byte header was complete.
    #[error("File header truncated: expected 64 bytes, read {found}")]
    TruncatedHeader { found: usize },

    /// The first 16 header bytes did not spell the expected file magic.
    #[error("Bad file magic: expected 'YAMAHA-YSFC', found '{found}'")]
    BadMagic { found: String },

    /// The version field was not three dot-separated integers.
    #[error("Malformed version string '{found}'")]
    BadVersion { found: String },

    /// The version parsed cleanly but names a revision this reader does not handle.
    #[error("Unsupported file version {0}")]
    UnsupportedVersion(FormatVersion),

    /// A pre-4.0 header did not carry the mandatory 0xFF padding.
    #[error("Header padding bytes are not all 0xFF")]
    BadPadding,

    /// The catalogue region was shorter than the header promised.
    #[error("Catalogue truncated at byte {offset} of the declared region")]
    TruncatedCatalogue { offset: usize },

    /// A four-byte block identifier contained something other than
    /// uppercase ASCII letters.
    #[error("Invalid block identifier '{found}' at offset {offset:#x}")]
    BadBlockId { found: String, offset: u64 },

    /// The file ended inside a block's eight-byte identifier/size frame.
    #[error("Truncated frame header for block '{id}' at offset {offset:#x}")]
    TruncatedBlockHeader { id: BlockId, offset: u64 },

    /// A block's payload was shorter than the size recorded in its frame.
    #[error("Block '{id}' truncated: declared {expected} payload bytes, read {found}")]
    TruncatedBlock {
        id: BlockId,
        expected: u32,
        found: usize,
    },

    /// An entry record did not start with the 'Entr' magic.
    #[error("Bad entry magic in block '{block}' at payload offset {offset}: found '{found}'")]
    BadEntryMagic {
        block: BlockId,
        offset: usize,
        found: String,
    },

    /// An entry record ran past the end of its block payload.
    #[error(
        "Entry record in block '{block}' at payload offset {offset} overruns \
         the payload: needed {need} bytes, {have} available"
    )]
    EntryOverrun {
        block: BlockId,
        offset: usize,
        need: usize,
        have: usize,
    },

    /// The number of decoded entries disagreed with the block's own count.
    #[error("Block '{block}' declared {expected} entries but {found} were decoded")]
    CountMismatch {
        block: BlockId,
        expected: u32,
        found: u32,
    },

    /// A structure had a fixed expected length and the data disagreed.
    #[error("Size mismatch in {context}: expected {expected} bytes, found {found}")]
    SizeMismatch {
        context: &'static str,
        expected: u64,
        found: u64,
    },

    /// An entry pointed at payload bytes outside its data block.
    #[error(
        "Entry data range out of bounds in block '{block}': \
         offset {offset}, size {size}, payload is {have} bytes"
    )]
    DataRangeOutOfBounds {
        block: BlockId,
        offset: u32,
        size: u32,
        have: usize,
    },

    /// The sub-frame in front of an entry's data did not carry the
    /// 'Data' magic.
    #[error("Bad data magic in block '{block}' before payload offset {offset}: found '{found}'")]
    BadDataMagic {
        block: BlockId,
        offset: u32,
        found: String,
    },

    /// The length recorded in a 'Data' sub-frame disagreed with the
    /// size recorded in the entry that points at it.
    #[error("Data sub-frame in block '{block}' declares {found} bytes, entry expects {expected}")]
    DataSizeMismatch {
        block: BlockId,
        expected: u32,
        found: u32,
    },
}

pub type Result<T> = std::result::Result<T, YsfcError>;
