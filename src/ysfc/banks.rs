//! Bank and program labels for entry numbers.

/// Formats a voice entry number as bank and program, e.g. `USR1:001`.
///
/// The high three bytes select the bank window: user voices, user drums,
/// song mixing voices and pattern mixing voices, the latter two split
/// into SP and MV halves at program 128. Numbers outside the known
/// windows are rendered as plain hex.
pub fn voice_bank_label(number: u32) -> String {
    let bank = number >> 8;
    let program = (number & 0xff) + 1;
    match bank {
        0x3f08..=0x3f0f => format!("USR{}:{:03}", bank - 0x3f07, program),
        0x3f28 => format!("USRDR:{:03}", program),
        0x3f80..=0x3fbf if program <= 128 => format!("SNG{}:SP{:03}", bank - 0x3f7f, program),
        0x3f80..=0x3fbf => format!("SNG{}:MV{:03}", bank - 0x3f7f, program - 128),
        0x3fc0..=0x3fff if program <= 128 => format!("PTN{}:SP{:03}", bank - 0x3fbf, program),
        0x3fc0..=0x3fff => format!("PTN{}:MV{:03}", bank - 0x3fbf, program - 128),
        _ => format!("0x{:06x}", number),
    }
}

/// Formats a performance entry number as its user-bank slot,
/// e.g. `USR 1:005(A05)`.
///
/// Performances are numbered straight through the user banks, 128 per
/// bank, with each bank shown as sections A through H of sixteen slots.
pub fn performance_slot_label(number: u32) -> String {
    const SECTIONS: &[u8] = b"ABCDEFGH";
    let bank = number / 128;
    let in_bank = number % 128;
    let section = SECTIONS[(in_bank / 16) as usize] as char;
    let key = number % 16;
    format!(
        "USR {}:{:03}({}{:02})",
        bank + 1,
        in_bank + 1,
        section,
        key + 1
    )
}
