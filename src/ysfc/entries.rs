use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace};

use super::error::{Result, YsfcError};
use super::models::{BlockId, Entry, LayoutVariant};
use super::utils::strip_nul;

const ENTRY_MAGIC: &[u8] = b"Entr";

/// Decodes all entry records in an entry-list payload.
///
/// The payload starts with a u32 entry count; each record is framed by an
/// `Entr` magic and a u32 length counting the bytes after the frame.
pub(crate) fn parse(id: BlockId, layout: LayoutVariant, payload: &[u8]) -> Result<Vec<Entry>> {
    if payload.len() < 4 {
        return Err(YsfcError::EntryOverrun {
            block: id,
            offset: 0,
            need: 4,
            have: payload.len(),
        });
    }
    let declared = BigEndian::read_u32(&payload[..4]);
    let mut entries = Vec::with_capacity(declared as usize);

    let mut cursor = 4;
    while cursor < payload.len() {
        let have = payload.len() - cursor;
        if have < 8 {
            return Err(YsfcError::EntryOverrun {
                block: id,
                offset: cursor,
                need: 8,
                have,
            });
        }
        if &payload[cursor..cursor + 4] != ENTRY_MAGIC {
            return Err(YsfcError::BadEntryMagic {
                block: id,
                offset: cursor,
                found: String::from_utf8_lossy(&payload[cursor..cursor + 4]).into_owned(),
            });
        }
        let length = BigEndian::read_u32(&payload[cursor + 4..cursor + 8]) as usize;
        let record_len = length + 8;
        if record_len > have {
            return Err(YsfcError::EntryOverrun {
                block: id,
                offset: cursor,
                need: record_len,
                have,
            });
        }
        let entry = parse_record(id, layout, cursor, &payload[cursor..cursor + record_len])?;
        trace!("{}: entry {:?}", id, entry.name);
        entries.push(entry);
        cursor += record_len;
    }

    if entries.len() as u32 != declared {
        return Err(YsfcError::CountMismatch {
            block: id,
            expected: declared,
            found: entries.len() as u32,
        });
    }
    debug!("{}: {} entries", id, entries.len());
    Ok(entries)
}

/// Decodes one record. Field offsets are relative to the record's own
/// frame, so they include the eight bytes of magic and length:
///
/// | layout    | size   | offset | number | names |
/// |-----------|--------|--------|--------|-------|
/// | pre-1.0.2 | 12..16 | 20..24 | 24..28 | 29..  |
/// | 1.0.2     | 12..16 | 20..24 | 24..28 | 30..  |
/// | 1.0.3+    |  8..12 | 12..16 | 16..20 | 20..  |
///
/// The names region holds NUL-separated strings: name, original file
/// name, then any dependency names.
fn parse_record(id: BlockId, layout: LayoutVariant, cursor: usize, record: &[u8]) -> Result<Entry> {
    if record.len() < layout.fields_end() {
        return Err(YsfcError::EntryOverrun {
            block: id,
            offset: cursor,
            need: layout.fields_end(),
            have: record.len(),
        });
    }
    let (size, offset, number) = match layout {
        LayoutVariant::LegacyPre102 | LayoutVariant::Legacy102 => (
            BigEndian::read_u32(&record[12..16]),
            BigEndian::read_u32(&record[20..24]),
            BigEndian::read_u32(&record[24..28]),
        ),
        LayoutVariant::Modern => (
            BigEndian::read_u32(&record[8..12]),
            BigEndian::read_u32(&record[12..16]),
            BigEndian::read_u32(&record[16..20]),
        ),
    };

    let names = strip_nul(record.get(layout.names_start()..).unwrap_or_default());
    let mut pieces = names.split(|&b| b == 0);
    let name = decode_trimmed(pieces.next().unwrap_or_default());
    let filename = pieces.next().map(decode_trimmed);
    let depends = pieces
        .map(|p| String::from_utf8_lossy(p).into_owned())
        .collect();

    Ok(Entry {
        size,
        offset,
        number,
        name,
        filename,
        depends,
    })
}

fn decode_trimmed(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim_end().to_string()
}
