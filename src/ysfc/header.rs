use std::io::Read;

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use super::error::{Result, YsfcError};
use super::models::{FileHeader, FormatVersion};
use super::utils::rstrip_nul;

pub(crate) const FILE_MAGIC: &[u8] = b"YAMAHA-YSFC";
pub(crate) const HEADER_LEN: usize = 64;

/// Parses the fixed 64-byte file header.
///
/// Layout (integers are big-endian):
/// - bytes 0..16: file magic `YAMAHA-YSFC`, NUL-padded
/// - bytes 16..32: ASCII version string `major.minor.patch`, NUL-padded
/// - bytes 32..36: u32, catalogue size in bytes
/// - bytes 36..64: 0xFF padding before 4.0; from 4.0 on, a u32 pad size
///   sits at bytes 48..52 and the remainder is reserved
pub(crate) fn parse<R: Read>(source: &mut R) -> Result<FileHeader> {
    let mut raw = Vec::with_capacity(HEADER_LEN);
    source
        .by_ref()
        .take(HEADER_LEN as u64)
        .read_to_end(&mut raw)?;
    if raw.len() < HEADER_LEN {
        return Err(YsfcError::TruncatedHeader { found: raw.len() });
    }

    let magic = rstrip_nul(&raw[..16]);
    if magic != FILE_MAGIC {
        return Err(YsfcError::BadMagic {
            found: String::from_utf8_lossy(magic).into_owned(),
        });
    }

    let version: FormatVersion = String::from_utf8_lossy(rstrip_nul(&raw[16..32])).parse()?;
    if !version.is_supported() {
        return Err(YsfcError::UnsupportedVersion(version));
    }

    let pad_size = if version.has_pad_field() {
        BigEndian::read_u32(&raw[48..52])
    } else {
        if raw[36..].iter().any(|&b| b != 0xff) {
            return Err(YsfcError::BadPadding);
        }
        0
    };

    let catalogue_size = BigEndian::read_u32(&raw[32..36]);
    debug!(
        "Header: version {}, catalogue {} bytes, pad {} bytes",
        version, catalogue_size, pad_size
    );

    Ok(FileHeader {
        version,
        catalogue_size,
        pad_size,
    })
}
