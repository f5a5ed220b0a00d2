//! Live-set page tables, the payload behind `ELST` entries.

use super::error::{Result, YsfcError};
use super::models::{DataBlock, Entry, LiveSetPage, LiveSetSlot, PerformanceNames, SlotCategory};
use super::utils::until_nul_lossy;

/// A live-set page table is always exactly this long.
pub const LIVE_SET_TABLE_LEN: usize = 0x1C69;

const PAGE_TABLE_START: usize = 25;
const PAGE_LEN: usize = 0x1C5;
const PAGE_NAME_LEN: usize = 20;
const SLOT_TABLE_OFFSET: usize = 43;
const SLOT_STRIDE: usize = 27;
const SLOTS_PER_PAGE: usize = 16;

/// Decodes the sixteen pages of a live-set table, dropping pages with
/// no assigned slot.
///
/// Each page starts with a 20-byte NUL-padded name; its sixteen slot
/// records sit at byte 43 of the page, 27 bytes apart. Of each record
/// only bytes 1, 2 and 4 matter: bank, number and the assigned flag.
pub(crate) fn parse_pages(table: &[u8]) -> Vec<LiveSetPage> {
    debug_assert_eq!(table.len(), LIVE_SET_TABLE_LEN);

    let mut pages = Vec::new();
    let mut page_off = PAGE_TABLE_START;
    while page_off + PAGE_LEN <= table.len() {
        let name = until_nul_lossy(&table[page_off..page_off + PAGE_NAME_LEN]);
        let mut slots = Vec::with_capacity(SLOTS_PER_PAGE);
        let mut slot_off = page_off + SLOT_TABLE_OFFSET;
        for _ in 0..SLOTS_PER_PAGE {
            let d = &table[slot_off..slot_off + 5];
            slots.push(LiveSetSlot {
                bank: d[1],
                number: d[2],
                present: d[4] != 0,
            });
            slot_off += SLOT_STRIDE;
        }
        if slots.iter().any(|s| s.present) {
            pages.push(LiveSetPage { name, slots });
        }
        page_off += PAGE_LEN;
    }
    pages
}

impl DataBlock {
    /// Decodes the data an `ELST` entry points at as a live-set page table.
    pub fn live_set_pages(&self, entry: &Entry) -> Result<Vec<LiveSetPage>> {
        let table = self.slice_for(entry)?;
        if table.len() != LIVE_SET_TABLE_LEN {
            return Err(YsfcError::SizeMismatch {
                context: "live set page table",
                expected: LIVE_SET_TABLE_LEN as u64,
                found: table.len() as u64,
            });
        }
        Ok(parse_pages(table))
    }
}

impl LiveSetSlot {
    pub fn category(&self) -> SlotCategory {
        match self.bank {
            0..=31 => SlotCategory::Preset,
            32..=36 => SlotCategory::User,
            40..=75 => SlotCategory::Library,
            _ => SlotCategory::Unknown,
        }
    }

    /// Printable label, e.g. `PRE01 004` or `USR02 008 My Lead`.
    ///
    /// Unassigned slots read `---`, banks outside the known ranges just
    /// `???`. User slots append the performance name when `names` has
    /// one for the slot's bank and number.
    pub fn label(&self, names: &PerformanceNames) -> String {
        if !self.present {
            return "---".to_string();
        }
        let bank = match self.category() {
            SlotCategory::Preset => format!("PRE{:02}", self.bank + 1),
            SlotCategory::User => format!("USR{:02}", self.bank - 31),
            SlotCategory::Library => {
                let b = self.bank - 40;
                format!("LIB{}({})", b / 5 + 1, b % 5 + 1)
            }
            SlotCategory::Unknown => return "???".to_string(),
        };
        let mut label = format!("{:<5} {:03}", bank, self.number as u32 + 1);
        if self.category() == SlotCategory::User {
            if let Some(name) = names.get(self.bank, self.number) {
                label.push(' ');
                label.push_str(name);
            }
        }
        label
    }
}
