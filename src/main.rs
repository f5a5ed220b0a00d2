use std::env;
use std::fs::File;

use ysfc_reader::{banks, BlockId, YsfcReader};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <path-to-ysfc-file>", args[0]);
        std::process::exit(1);
    }

    println!("Reading YSFC file: {}", args[1]);
    match YsfcReader::open(&args[1]) {
        Ok(reader) => print_contents(&reader),
        Err(e) => {
            eprintln!("ERROR: Failed to read YSFC file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}

fn print_contents(reader: &YsfcReader<File>) {
    println!("Version: {}", reader.version());

    for skip in reader.skipped() {
        println!(
            "Wrong block ID at offset {:#010x}. Expected '{}', read '{}'.",
            skip.offset, skip.expected, skip.found
        );
        println!("Ignoring block.");
    }

    for list in reader.entry_lists() {
        let kind = list.id.to_string();
        for entry in &list.entries {
            match list.id {
                BlockId::VOICE => println!(
                    "VCE {} {}",
                    banks::voice_bank_label(entry.number),
                    entry.name
                ),
                BlockId::PERFORMANCE => println!(
                    "PFM {} {}",
                    banks::performance_slot_label(entry.number),
                    entry.name
                ),
                _ => println!("{:>3} {:04} {}", &kind[1..], entry.number + 1, entry.name),
            }
        }
    }
}
