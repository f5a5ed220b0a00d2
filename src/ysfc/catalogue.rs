use std::collections::HashMap;
use std::io::Read;

use byteorder::{BigEndian, ByteOrder};
use log::info;

use super::error::{Result, YsfcError};
use super::models::{BlockId, CatalogueEntry};

const ENTRY_LEN: usize = 8;

/// Decoded catalogue: the ordered rows plus an offset index by identifier.
#[derive(Debug, Clone)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
    by_id: HashMap<BlockId, u32>,
}

impl Catalogue {
    /// Rows in file order, duplicates included.
    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    /// Offset lookup by identifier. When an identifier appears more than
    /// once, the last row wins.
    pub fn get(&self, id: BlockId) -> Option<CatalogueEntry> {
        self.by_id
            .get(&id)
            .map(|&offset| CatalogueEntry { id, offset })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reads the catalogue region and decodes its eight-byte rows.
///
/// Each row is a four-letter block identifier followed by a u32 absolute
/// file offset. `file_base` is where the region starts in the file and is
/// only used in error messages.
pub(crate) fn parse<R: Read>(source: &mut R, size: u32, file_base: u64) -> Result<Catalogue> {
    let mut region = Vec::with_capacity(size as usize);
    source.by_ref().take(size as u64).read_to_end(&mut region)?;
    if region.len() < size as usize {
        return Err(YsfcError::TruncatedCatalogue {
            offset: region.len(),
        });
    }

    let mut entries = Vec::with_capacity(region.len() / ENTRY_LEN);
    let mut by_id = HashMap::new();
    let mut chunks = region.chunks_exact(ENTRY_LEN);
    for (index, chunk) in chunks.by_ref().enumerate() {
        let raw = [chunk[0], chunk[1], chunk[2], chunk[3]];
        let id = BlockId::from_bytes(raw).ok_or_else(|| YsfcError::BadBlockId {
            found: String::from_utf8_lossy(&raw).into_owned(),
            offset: file_base + (index * ENTRY_LEN) as u64,
        })?;
        let offset = BigEndian::read_u32(&chunk[4..8]);
        entries.push(CatalogueEntry { id, offset });
        by_id.insert(id, offset);
    }
    if !chunks.remainder().is_empty() {
        return Err(YsfcError::TruncatedCatalogue {
            offset: region.len() - chunks.remainder().len(),
        });
    }

    info!("Catalogue: {} blocks", entries.len());
    Ok(Catalogue { entries, by_id })
}
