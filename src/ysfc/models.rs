use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::error::YsfcError;

/// File format revision, as carried in header bytes 16..32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FormatVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FormatVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        FormatVersion {
            major,
            minor,
            patch,
        }
    }

    /// Whether this reader knows how to decode the revision.
    ///
    /// The 1.x line only ever shipped patch levels 0 through 3. From 4.0
    /// onwards the container kept the layout of 1.0.3 and only grew the
    /// header pad field, so any 4+ revision is taken as-is.
    pub fn is_supported(&self) -> bool {
        if self.major >= 4 {
            return true;
        }
        self.major >= 1 && self.minor == 0 && self.patch <= 3
    }

    /// Entry-record layout used by files of this revision.
    pub fn layout(&self) -> LayoutVariant {
        if *self <= FormatVersion::new(1, 0, 1) {
            LayoutVariant::LegacyPre102
        } else if *self == FormatVersion::new(1, 0, 2) {
            LayoutVariant::Legacy102
        } else {
            LayoutVariant::Modern
        }
    }

    /// Headers from 4.0 on carry a pad-size field at byte 48.
    pub fn has_pad_field(&self) -> bool {
        self.major >= 4
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for FormatVersion {
    type Err = YsfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || YsfcError::BadVersion {
            found: s.to_string(),
        };
        let mut parts = s.split('.');
        let major = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(bad)?;
        let minor = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(bad)?;
        let patch = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(bad)?;
        if parts.next().is_some() {
            return Err(bad());
        }
        Ok(FormatVersion::new(major, minor, patch))
    }
}

/// The three entry-record layouts the format went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    /// Versions up to 1.0.1. Wide fixed fields, names start at byte 29.
    LegacyPre102,
    /// Version 1.0.2 exactly. Same fields, names pushed to byte 30.
    Legacy102,
    /// Versions 1.0.3 and later, including the 4.x line. Packed fields,
    /// names start at byte 20.
    Modern,
}

impl LayoutVariant {
    /// Offset of the NUL-separated name region inside an entry record.
    pub fn names_start(&self) -> usize {
        match self {
            LayoutVariant::LegacyPre102 => 29,
            LayoutVariant::Legacy102 => 30,
            LayoutVariant::Modern => 20,
        }
    }

    /// Bytes a record must have for its fixed numeric fields.
    pub(crate) fn fields_end(&self) -> usize {
        match self {
            LayoutVariant::LegacyPre102 | LayoutVariant::Legacy102 => 28,
            LayoutVariant::Modern => 20,
        }
    }
}

/// Four uppercase ASCII letters naming a block, e.g. `EVCE` or `DSNG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub [u8; 4]);

impl BlockId {
    /// Voice entry-list block.
    pub const VOICE: BlockId = BlockId(*b"EVCE");
    /// Performance entry-list block.
    pub const PERFORMANCE: BlockId = BlockId(*b"EPFM");
    /// Live-set entry-list block.
    pub const LIVE_SET: BlockId = BlockId(*b"ELST");

    /// Validates the wire bytes. Identifiers are strictly uppercase ASCII.
    pub fn from_bytes(raw: [u8; 4]) -> Option<BlockId> {
        if raw.iter().all(|b| b.is_ascii_uppercase()) {
            Some(BlockId(raw))
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Entry-list blocks start with `E`; their payloads describe data held
    /// in the sibling `D` block.
    pub fn is_entry_list(&self) -> bool {
        self.0[0] == b'E'
    }

    /// The data block an entry list refers to, `EVCE` -> `DVCE`.
    pub fn data_sibling(&self) -> BlockId {
        let mut raw = self.0;
        raw[0] = b'D';
        BlockId(raw)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(std::str::from_utf8(&self.0).unwrap_or("????"))
    }
}

/// Decoded 64-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub version: FormatVersion,
    /// Length in bytes of the catalogue region that follows the header.
    pub catalogue_size: u32,
    /// Bytes to skip between header and catalogue. Zero before 4.0.
    pub pad_size: u32,
}

/// One eight-byte catalogue row: a block identifier and its absolute
/// file offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub id: BlockId,
    pub offset: u32,
}

/// One decoded entry record from an entry-list block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Payload size of the item this entry describes.
    pub size: u32,
    /// Offset of the item inside the sibling data block, measured from
    /// the start of the block's frame.
    pub offset: u32,
    /// Item number. Meaning depends on the block type; voices and
    /// performances pack bank and program into it.
    pub number: u32,
    pub name: String,
    /// Original file name, present in library exports.
    pub filename: Option<String>,
    /// Names of items this one depends on, e.g. waveforms of a voice.
    pub depends: Vec<String>,
}

/// All entries decoded from one entry-list block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList {
    pub id: BlockId,
    /// Absolute file offset the catalogue recorded for the block.
    pub offset: u32,
    pub entries: Vec<Entry>,
}

/// Record of a block that was skipped because the identifier on disk
/// disagreed with the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedBlock {
    pub expected: BlockId,
    pub found: BlockId,
    pub offset: u32,
}

/// Raw payload of a data (`D`-prefixed) block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    id: BlockId,
    payload: Vec<u8>,
}

impl DataBlock {
    pub(crate) fn new(id: BlockId, payload: Vec<u8>) -> Self {
        DataBlock { id, payload }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// One of the sixteen performance slots on a live-set page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSetSlot {
    pub bank: u8,
    pub number: u8,
    /// Whether the slot is assigned at all.
    pub present: bool,
}

/// Coarse grouping of live-set slot banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotCategory {
    Preset,
    User,
    Library,
    Unknown,
}

/// One page of a live set: a name and its sixteen slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSetPage {
    pub name: String,
    pub slots: Vec<LiveSetSlot>,
}

/// Performance names harvested from the `EPFM` entry list, addressable
/// by the (bank, slot) pair live-set slots carry on the wire.
#[derive(Debug, Clone, Default)]
pub struct PerformanceNames {
    names: HashMap<(u8, u8), String>,
}

impl PerformanceNames {
    /// Records a name. Returns false when the pair is outside the user
    /// bank window (banks 32..=36, slots 0..128) and nothing was stored.
    pub fn insert(&mut self, bank: u8, slot: u8, name: String) -> bool {
        if !(32..37).contains(&bank) || slot >= 128 {
            return false;
        }
        self.names.insert((bank, slot), name);
        true
    }

    pub fn get(&self, bank: u8, slot: u8) -> Option<&str> {
        self.names.get(&(bank, slot)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
