//! Converter from MIDI name documents (.midnam) to CSV patch tables.
//!
//! A MIDNAM document describes the patches a device offers: channel
//! name sets, each holding patch banks with bank-select values and
//! patch lists. [`export`] writes one CSV file per name set with the
//! columns Bank, MSB, LSB, PC, Category and Name.

use std::path::{Path, PathBuf};

use log::{debug, info};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Error type for MIDNAM parsing and CSV export.
#[derive(Error, Debug)]
pub enum MidnamError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Writing a CSV file failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The document is XML but not a usable name document.
    #[error("Invalid MIDI name document: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, MidnamError>;

/// One patch of a name set, ready to become a CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRow {
    /// Name of the patch bank the patch belongs to.
    pub bank: String,
    /// Bank-select MSB, verbatim from the document.
    pub msb: Option<String>,
    /// Bank-select LSB, verbatim from the document.
    pub lsb: Option<String>,
    /// Program change number.
    pub program: Option<u32>,
    /// Category prefix split off the patch name, empty when absent.
    pub category: String,
    pub name: String,
}

/// All patches of one channel name set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSet {
    pub name: String,
    pub rows: Vec<PatchRow>,
}

struct BankState {
    name: String,
    msb: Option<String>,
    lsb: Option<String>,
    patches_seen: usize,
}

#[derive(Default)]
struct Collector {
    sets: Vec<NameSet>,
    current: Option<NameSet>,
    bank: Option<BankState>,
    sets_seen: usize,
    banks_seen: usize,
}

impl Collector {
    /// Handles an opening element given the local names of its ancestors.
    fn open(&mut self, element: &BytesStart, parents: &[Vec<u8>]) -> Result<()> {
        match element.local_name().as_ref() {
            b"ChannelNameSet" if parents.len() == 2 => {
                self.sets_seen += 1;
                self.banks_seen = 0;
                let name = attr(element, b"Name")?
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| format!("<unnamed set #{}>", self.sets_seen));
                self.current = Some(NameSet {
                    name,
                    rows: Vec::new(),
                });
            }
            b"PatchBank" if self.current.is_some() && ends_with(parents, &[b"ChannelNameSet"]) => {
                self.banks_seen += 1;
                let name = attr(element, b"Name")?
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| format!("<unnamed bank #{}>", self.banks_seen));
                self.bank = Some(BankState {
                    name,
                    msb: None,
                    lsb: None,
                    patches_seen: 0,
                });
            }
            b"ControlChange" if ends_with(parents, &[b"PatchBank", b"MIDICommands"]) => {
                if let Some(bank) = self.bank.as_mut() {
                    let control = attr(element, b"Control")?;
                    let value = attr(element, b"Value")?;
                    match control.as_deref() {
                        Some("0") if bank.msb.is_none() => bank.msb = value,
                        Some("32") if bank.lsb.is_none() => bank.lsb = value,
                        _ => {}
                    }
                }
            }
            b"Patch" if ends_with(parents, &[b"PatchBank", b"PatchNameList"]) => {
                self.patch(element)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn patch(&mut self, element: &BytesStart) -> Result<()> {
        let (Some(set), Some(bank)) = (self.current.as_mut(), self.bank.as_mut()) else {
            return Ok(());
        };
        bank.patches_seen += 1;
        let number = attr(element, b"Number")?.unwrap_or_default();
        let name = attr(element, b"Name")?
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                if number.is_empty() {
                    format!("<unnamed patch #{}>", bank.patches_seen)
                } else {
                    format!("<unnamed patch #{}>", number)
                }
            });

        // Some documents pad banks with placeholder patches whose name is
        // just the patch number again. Those rows carry no information.
        if let (Ok(a), Ok(b)) = (number.trim().parse::<i64>(), name.trim().parse::<i64>()) {
            if a == b {
                return Ok(());
            }
        }

        let program = attr(element, b"ProgramChange")?.and_then(|v| v.trim().parse().ok());
        let (category, name) = match name.split_once(':') {
            Some((category, rest)) => (category.to_string(), rest.to_string()),
            None => (String::new(), name),
        };
        set.rows.push(PatchRow {
            bank: bank.name.clone(),
            msb: bank.msb.clone(),
            lsb: bank.lsb.clone(),
            program,
            category,
            name,
        });
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"ChannelNameSet" => {
                if let Some(set) = self.current.take() {
                    debug!("Name set '{}': {} patches", set.name, set.rows.len());
                    self.sets.push(set);
                }
            }
            b"PatchBank" => self.bank = None,
            _ => {}
        }
    }
}

fn ends_with(parents: &[Vec<u8>], tail: &[&[u8]]) -> bool {
    parents.len() >= tail.len()
        && parents[parents.len() - tail.len()..]
            .iter()
            .zip(tail)
            .all(|(a, b)| a.as_slice() == *b)
}

fn attr(element: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| MidnamError::Invalid(format!("bad attribute: {e}")))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|e| MidnamError::Invalid(format!("bad attribute value: {e}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parses a MIDNAM document and collects its channel name sets.
///
/// Name sets are the grandchildren of the document root. Bank select
/// values come from each bank's MIDICommands: control 0 is the MSB,
/// control 32 the LSB, and only the first occurrence of each counts.
pub fn parse_name_sets(xml: &str) -> Result<Vec<NameSet>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut parents: Vec<Vec<u8>> = Vec::new();
    let mut collector = Collector::default();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                collector.open(&e, &parents)?;
                parents.push(e.local_name().as_ref().to_vec());
            }
            Event::Empty(e) => {
                collector.open(&e, &parents)?;
                collector.close(e.local_name().as_ref());
            }
            Event::End(e) => {
                parents.pop();
                collector.close(e.local_name().as_ref());
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(collector.sets)
}

/// Writes one name set as a CSV file under `dir` and returns the path.
///
/// The file is named after the set, with characters unusable in file
/// names replaced; `number` (1-based) is the fallback when nothing
/// usable remains. An empty set still produces a file with the header
/// row, so absent banks are visible.
pub fn write_csv(set: &NameSet, dir: &Path, number: usize) -> Result<PathBuf> {
    let stem = sanitize(&set.name);
    let file_name = if stem.is_empty() {
        format!("nameset-{:02}.csv", number)
    } else {
        format!("{}.csv", stem)
    };
    let path = dir.join(file_name);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["Bank", "MSB", "LSB", "PC", "Category", "Name"])?;
    for row in &set.rows {
        writer.write_record(&[
            row.bank.clone(),
            row.msb.clone().unwrap_or_default(),
            row.lsb.clone().unwrap_or_default(),
            row.program.map(|p| p.to_string()).unwrap_or_default(),
            row.category.clone(),
            row.name.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

fn sanitize(name: &str) -> String {
    name.replace(['\\', '/', '*', '?', ':', '[', ']'], " ")
        .trim()
        .to_string()
}

/// Parses a document and writes one CSV per name set under `dir`.
pub fn export(xml: &str, dir: &Path) -> Result<Vec<PathBuf>> {
    let sets = parse_name_sets(xml)?;
    let mut written = Vec::with_capacity(sets.len());
    for (index, set) in sets.iter().enumerate() {
        written.push(write_csv(set, dir, index + 1)?);
    }
    info!("Wrote {} CSV files", written.len());
    Ok(written)
}
