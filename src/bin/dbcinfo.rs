//! Thin command-line summary tool: parse a `.dbc` file and print counts.

use std::env;
use std::process;

fn main() {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("Usage: dbcinfo <path/to/file.dbc>");
        process::exit(1);
    };

    let db = match dbcfile::parse_from_file(&path) {
        Ok(db) => db,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };

    println!("Parsed DBC: {path}");
    println!("  version:      {:?}", db.version);
    println!("  nodes:        {}", db.nodes.len());
    println!("  baud rates:   {}", db.baud_rates.len());
    println!("  messages:     {}", db.messages.len());
    println!("    signals:    {}", db.signal_count());
    println!("  value tables: {}", db.value_tables.len());
    println!("  comments:     {}", db.comments.len());
    println!("  raw sections: {}", db.raw_sections.len());
}
