use std::env;
use std::path::Path;

use ysfc_reader::{BlockId, Result, YsfcReader};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <path-to-ysfc-file>", args[0]);
        std::process::exit(1);
    }

    if let Err(e) = run(&args[1]) {
        eprintln!("ERROR: Failed to read live sets");
        eprintln!("  {}", e);
        std::process::exit(1);
    }
}

fn run(path: &str) -> Result<()> {
    let mut reader = YsfcReader::open(path)?;

    let basename = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    println!("{} (YSFC v{})", basename, reader.version());
    println!();

    let names = reader.performance_names();
    let data = reader.data_block(BlockId::LIVE_SET.data_sibling())?;
    let (Some(data), Some(list)) = (data, reader.entry_list(BlockId::LIVE_SET)) else {
        println!("No live sets in this file.");
        return Ok(());
    };

    for entry in &list.entries {
        println!("{}", entry.name);
        for page in data.live_set_pages(entry)? {
            println!("   {}", page.name);
            println!();
            for slot in &page.slots {
                println!("      {}", slot.label(&names));
            }
            println!();
        }
    }
    Ok(())
}
