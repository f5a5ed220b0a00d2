use std::env;
use std::fs;
use std::path::Path;

use ysfc_reader::midnam;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut verbose = false;
    let mut input = None;
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            _ => input = Some(arg.clone()),
        }
    }
    let Some(input) = input else {
        eprintln!("Usage: {} [-v] <path-to-midnam-file>", args[0]);
        std::process::exit(1);
    };

    if let Err(e) = run(&input, verbose) {
        eprintln!("ERROR: Failed to convert MIDI name document");
        eprintln!("  {}", e);
        std::process::exit(1);
    }
}

fn run(path: &str, verbose: bool) -> midnam::Result<()> {
    let xml = fs::read_to_string(path)?;
    let sets = midnam::parse_name_sets(&xml)?;
    for (index, set) in sets.iter().enumerate() {
        if verbose {
            println!("Channel name set: {} ({} patches)", set.name, set.rows.len());
        }
        let written = midnam::write_csv(set, Path::new("."), index + 1)?;
        println!("Wrote '{}'", written.display());
    }
    Ok(())
}
