//! Builders for the synthetic YSFC images used across the integration
//! tests. All integers are big-endian, like the format itself.
#![allow(dead_code)]

use ysfc_reader::LIVE_SET_TABLE_LEN;

/// A 64-byte pre-4.0 header: magic, version string, catalogue size and
/// 0xFF padding.
pub fn header(version: &str, catalogue_size: u32) -> Vec<u8> {
    let mut raw = vec![0u8; 64];
    raw[..11].copy_from_slice(b"YAMAHA-YSFC");
    raw[16..16 + version.len()].copy_from_slice(version.as_bytes());
    raw[32..36].copy_from_slice(&catalogue_size.to_be_bytes());
    for b in &mut raw[36..] {
        *b = 0xff;
    }
    raw
}

/// A 64-byte 4.0+ header with the pad-size field at byte 48.
pub fn header_v4(version: &str, catalogue_size: u32, pad_size: u32) -> Vec<u8> {
    let mut raw = vec![0u8; 64];
    raw[..11].copy_from_slice(b"YAMAHA-YSFC");
    raw[16..16 + version.len()].copy_from_slice(version.as_bytes());
    raw[32..36].copy_from_slice(&catalogue_size.to_be_bytes());
    raw[48..52].copy_from_slice(&pad_size.to_be_bytes());
    raw
}

struct Block {
    catalogued: [u8; 4],
    on_disk: [u8; 4],
    payload: Vec<u8>,
}

/// Builder for a whole file image: header, optional pad region,
/// catalogue and framed blocks, laid out back to back.
pub struct Image {
    version: String,
    pad: Vec<u8>,
    blocks: Vec<Block>,
}

impl Image {
    pub fn new(version: &str) -> Self {
        Image {
            version: version.to_string(),
            pad: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Inserts pad bytes between header and catalogue. Only meaningful
    /// for 4.0+ images, whose header records the pad size.
    pub fn pad(mut self, bytes: &[u8]) -> Self {
        self.pad = bytes.to_vec();
        self
    }

    pub fn block(self, id: &[u8; 4], payload: Vec<u8>) -> Self {
        self.mislabeled_block(id, id, payload)
    }

    /// A block catalogued under one identifier but framed on disk under
    /// another.
    pub fn mislabeled_block(
        mut self,
        catalogued: &[u8; 4],
        on_disk: &[u8; 4],
        payload: Vec<u8>,
    ) -> Self {
        self.blocks.push(Block {
            catalogued: *catalogued,
            on_disk: *on_disk,
            payload,
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let major: u32 = self
            .version
            .split('.')
            .next()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);
        let catalogue_size = (self.blocks.len() * 8) as u32;
        let mut image = if major >= 4 {
            header_v4(&self.version, catalogue_size, self.pad.len() as u32)
        } else {
            header(&self.version, catalogue_size)
        };
        image.extend_from_slice(&self.pad);

        let mut offset = (64 + self.pad.len() + self.blocks.len() * 8) as u32;
        for block in &self.blocks {
            image.extend_from_slice(&block.catalogued);
            image.extend_from_slice(&offset.to_be_bytes());
            offset += 8 + block.payload.len() as u32;
        }
        for block in &self.blocks {
            image.extend_from_slice(&block.on_disk);
            image.extend_from_slice(&(block.payload.len() as u32).to_be_bytes());
            image.extend_from_slice(&block.payload);
        }
        image
    }
}

/// Field values for one entry record.
pub struct EntrySpec<'a> {
    pub size: u32,
    pub offset: u32,
    pub number: u32,
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub depends: &'a [&'a str],
}

/// Record body in the 1.0.3+ layout: three packed u32 fields, then the
/// names region.
pub fn modern_record(spec: &EntrySpec) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&spec.size.to_be_bytes());
    body.extend_from_slice(&spec.offset.to_be_bytes());
    body.extend_from_slice(&spec.number.to_be_bytes());
    body.extend_from_slice(&names_region(spec));
    body
}

/// Record body in the legacy layouts: filler around the wide fields,
/// names at record byte 29 (or 30 for 1.0.2, hence `names_at_30`).
pub fn legacy_record(spec: &EntrySpec, names_at_30: bool) -> Vec<u8> {
    let mut body = vec![0u8; 4];
    body.extend_from_slice(&spec.size.to_be_bytes());
    body.extend_from_slice(&[0u8; 4]);
    body.extend_from_slice(&spec.offset.to_be_bytes());
    body.extend_from_slice(&spec.number.to_be_bytes());
    body.push(0);
    if names_at_30 {
        body.push(0);
    }
    body.extend_from_slice(&names_region(spec));
    body
}

fn names_region(spec: &EntrySpec) -> Vec<u8> {
    let mut region = Vec::new();
    region.extend_from_slice(spec.name.as_bytes());
    if let Some(filename) = spec.filename {
        region.push(0);
        region.extend_from_slice(filename.as_bytes());
    }
    for dep in spec.depends {
        region.push(0);
        region.extend_from_slice(dep.as_bytes());
    }
    region
}

/// Entry-list payload framing each record body with `Entr` and its
/// length, preceded by the entry count.
pub fn entry_list_payload(records: &[Vec<u8>]) -> Vec<u8> {
    entry_list_payload_with_count(records.len() as u32, records)
}

pub fn entry_list_payload_with_count(count: u32, records: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = count.to_be_bytes().to_vec();
    for body in records {
        payload.extend_from_slice(b"Entr");
        payload.extend_from_slice(&(body.len() as u32).to_be_bytes());
        payload.extend_from_slice(body);
    }
    payload
}

/// Data-block payload of `total` zero bytes with `data` planted so that
/// an entry carrying `offset` resolves to it: the `Data` sub-frame goes
/// at payload index `offset - 8`, the data itself at `offset`.
pub fn data_payload(total: usize, offset: u32, data: &[u8]) -> Vec<u8> {
    let mut payload = vec![0u8; total];
    let frame = offset as usize - 8;
    payload[frame..frame + 4].copy_from_slice(b"Data");
    payload[frame + 4..frame + 8].copy_from_slice(&(data.len() as u32).to_be_bytes());
    payload[offset as usize..offset as usize + data.len()].copy_from_slice(data);
    payload
}

/// Live-set page table with the given pages assigned. Each page is a
/// name and a list of (slot index, bank, number) triples to mark as
/// assigned; everything else stays zero.
pub fn live_set_table(pages: &[(&str, &[(usize, u8, u8)])]) -> Vec<u8> {
    let mut table = vec![0u8; LIVE_SET_TABLE_LEN];
    for (index, (name, slots)) in pages.iter().enumerate() {
        let page = 25 + index * 0x1c5;
        table[page..page + name.len()].copy_from_slice(name.as_bytes());
        for &(slot, bank, number) in slots.iter() {
            let at = page + 43 + slot * 27;
            table[at + 1] = bank;
            table[at + 2] = number;
            table[at + 4] = 1;
        }
    }
    table
}
