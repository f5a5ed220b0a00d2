//! Decoder for the YSFC container format used by Yamaha keyboard
//! library and backup files.
//!
//! A file is a 64-byte header, a catalogue of block identifiers and
//! offsets, and a series of framed blocks. Entry-list blocks (`E`
//! prefix) describe the items stored in their sibling data blocks
//! (`D` prefix). [`YsfcReader`] decodes the header, catalogue and all
//! entry lists up front; data blocks are read on demand.

pub mod banks;
pub mod error;
pub mod models;

mod blocks;
mod catalogue;
mod data;
mod entries;
mod header;
mod liveset;
mod utils;

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use log::{info, warn};

use models::*;

pub use catalogue::Catalogue;
pub use error::{Result, YsfcError};
pub use liveset::LIVE_SET_TABLE_LEN;

/// Reader over one YSFC file.
#[derive(Debug)]
pub struct YsfcReader<R> {
    source: R,
    pub header: FileHeader,
    pub catalogue: Catalogue,
    entry_lists: Vec<EntryList>,
    by_id: HashMap<BlockId, usize>,
    skipped: Vec<SkippedBlock>,
}

impl YsfcReader<File> {
    /// Opens a file and decodes its header, catalogue and entry lists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening YSFC file {}", path.display());
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> YsfcReader<R> {
    /// Decodes the header, catalogue and every entry-list block from an
    /// already-open source.
    ///
    /// Entry lists are decoded in catalogue order. A catalogued block
    /// whose on-disk identifier disagrees with the catalogue is skipped
    /// with a warning; when the same identifier is catalogued twice, the
    /// later block replaces the earlier one.
    pub fn new(mut source: R) -> Result<Self> {
        let header = header::parse(&mut source)?;
        if header.pad_size > 0 {
            source.seek(SeekFrom::Current(header.pad_size as i64))?;
        }
        let base = source.stream_position()?;
        let catalogue = catalogue::parse(&mut source, header.catalogue_size, base)?;

        let layout = header.version.layout();
        let mut entry_lists: Vec<EntryList> = Vec::new();
        let mut by_id = HashMap::new();
        let mut skipped = Vec::new();
        for entry in catalogue.entries().iter().filter(|e| e.id.is_entry_list()) {
            match blocks::read_block(&mut source, entry)? {
                blocks::Framed::Payload(payload) => {
                    let list = EntryList {
                        id: entry.id,
                        offset: entry.offset,
                        entries: entries::parse(entry.id, layout, &payload)?,
                    };
                    match by_id.get(&entry.id).copied() {
                        Some(slot) => entry_lists[slot] = list,
                        None => {
                            by_id.insert(entry.id, entry_lists.len());
                            entry_lists.push(list);
                        }
                    }
                }
                blocks::Framed::Mismatch(skip) => skipped.push(skip),
            }
        }

        info!(
            "Decoded {} entry lists, {} blocks skipped",
            entry_lists.len(),
            skipped.len()
        );
        Ok(YsfcReader {
            source,
            header,
            catalogue,
            entry_lists,
            by_id,
            skipped,
        })
    }

    pub fn version(&self) -> FormatVersion {
        self.header.version
    }

    /// Entry lists, in the order the catalogue first names them.
    pub fn entry_lists(&self) -> &[EntryList] {
        &self.entry_lists
    }

    pub fn entry_list(&self, id: BlockId) -> Option<&EntryList> {
        self.by_id.get(&id).map(|&slot| &self.entry_lists[slot])
    }

    /// Blocks skipped because the identifier on disk disagreed with the
    /// catalogue.
    pub fn skipped(&self) -> &[SkippedBlock] {
        &self.skipped
    }

    /// Reads a data block's payload. `Ok(None)` when the catalogue has no
    /// such block, or when the block on disk carries a different
    /// identifier (recorded under [`skipped`](Self::skipped)).
    pub fn data_block(&mut self, id: BlockId) -> Result<Option<DataBlock>> {
        let Some(entry) = self.catalogue.get(id) else {
            return Ok(None);
        };
        match blocks::read_block(&mut self.source, &entry)? {
            blocks::Framed::Payload(payload) => Ok(Some(DataBlock::new(id, payload))),
            blocks::Framed::Mismatch(skip) => {
                self.skipped.push(skip);
                Ok(None)
            }
        }
    }

    /// Harvests user performance names from the `EPFM` entry list, for
    /// labelling live-set slots.
    ///
    /// A performance entry packs bank and slot into the low sixteen bits
    /// of its number; its name carries the performance name after a
    /// colon. Entries outside the user banks are ignored with a warning.
    pub fn performance_names(&self) -> PerformanceNames {
        let mut names = PerformanceNames::default();
        let Some(list) = self.entry_list(BlockId::PERFORMANCE) else {
            return names;
        };
        for entry in &list.entries {
            let bank = ((entry.number >> 8) & 0xff) as u8;
            let slot = (entry.number & 0xff) as u8;
            let name = match entry.name.split_once(':') {
                Some((_, rest)) => rest,
                None => entry.name.as_str(),
            };
            if !names.insert(bank, slot, name.to_string()) {
                warn!(
                    "Performance '{}' (number {:#06x}) outside the user banks, ignored",
                    entry.name, entry.number
                );
            }
        }
        names
    }
}
