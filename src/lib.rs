//! # ysfc-reader
//!
//! A reader for Yamaha YSFC keyboard library and backup files (.X0A,
//! .X3A, .X6A, .X7L, .X8L and friends, as written by the Motif XS/XF,
//! MOXF, Montage and MODX families).
//! Supports container versions 1.0.0 through 1.0.3 and the 4.x line.
//!
//! The [`midnam`] module is a small companion tool: it turns MIDI name
//! documents (.midnam) into per-name-set CSV patch tables.
pub mod midnam;
pub mod ysfc;

// Re-export the main types for convenience
pub use ysfc::{
    banks,
    models::{
        BlockId, CatalogueEntry, DataBlock, Entry, EntryList, FileHeader, FormatVersion,
        LayoutVariant, LiveSetPage, LiveSetSlot, PerformanceNames, SkippedBlock, SlotCategory,
    },
    Catalogue, Result, YsfcError, YsfcReader, LIVE_SET_TABLE_LEN,
};
