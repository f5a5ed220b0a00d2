//! Small byte-trimming helpers shared by the decoders.

/// Strip trailing NUL bytes.
pub(crate) fn rstrip_nul(raw: &[u8]) -> &[u8] {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
    &raw[..end]
}

/// Strip NUL bytes from both ends (the wire pads string regions with NULs).
pub(crate) fn strip_nul(raw: &[u8]) -> &[u8] {
    let trimmed = rstrip_nul(raw);
    let start = trimmed.iter().position(|&b| b != 0).unwrap_or(trimmed.len());
    &trimmed[start..]
}

/// Bytes up to the first NUL, decoded lossily.
pub(crate) fn until_nul_lossy(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
