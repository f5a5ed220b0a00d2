use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};
use log::warn;

use super::error::{Result, YsfcError};
use super::models::{BlockId, CatalogueEntry, SkippedBlock};

/// Outcome of reading one framed block.
pub(crate) enum Framed {
    /// Identifier matched the catalogue; carries the payload.
    Payload(Vec<u8>),
    /// Identifier on disk was valid but not the one the catalogue named.
    Mismatch(SkippedBlock),
}

/// Seeks to a catalogued block and reads its frame and payload.
///
/// A block frame is the four-byte identifier followed by a u32 payload
/// size. A valid identifier that disagrees with the catalogue is reported
/// as a mismatch for the caller to skip; garbage identifier bytes are an
/// error.
pub(crate) fn read_block<R: Read + Seek>(source: &mut R, entry: &CatalogueEntry) -> Result<Framed> {
    source.seek(SeekFrom::Start(entry.offset as u64))?;

    let mut raw = [0u8; 4];
    source
        .read_exact(&mut raw)
        .map_err(|e| frame_error(e, entry))?;
    let found = BlockId::from_bytes(raw).ok_or_else(|| YsfcError::BadBlockId {
        found: String::from_utf8_lossy(&raw).into_owned(),
        offset: entry.offset as u64,
    })?;
    if found != entry.id {
        warn!(
            "Block at offset {:#x}: catalogue says '{}', file says '{}', skipping",
            entry.offset, entry.id, found
        );
        return Ok(Framed::Mismatch(SkippedBlock {
            expected: entry.id,
            found,
            offset: entry.offset,
        }));
    }

    let size = source
        .read_u32::<BigEndian>()
        .map_err(|e| frame_error(e, entry))?;
    let mut payload = Vec::with_capacity(size as usize);
    source.by_ref().take(size as u64).read_to_end(&mut payload)?;
    if payload.len() < size as usize {
        return Err(YsfcError::TruncatedBlock {
            id: entry.id,
            expected: size,
            found: payload.len(),
        });
    }
    Ok(Framed::Payload(payload))
}

fn frame_error(e: std::io::Error, entry: &CatalogueEntry) -> YsfcError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        YsfcError::TruncatedBlockHeader {
            id: entry.id,
            offset: entry.offset as u64,
        }
    } else {
        YsfcError::Io(e)
    }
}
