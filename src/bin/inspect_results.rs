//! Quick look at result files before plotting: parse counts, columns, and
//! rows per dataset for each file given on the command line.

use std::env;
use topicplot::loader;
use topicplot::record::embedding_label;
use topicplot::Table;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: inspect_results <file.jsonl> [file.jsonl ...]");
        std::process::exit(1);
    }

    for path in &args[1..] {
        println!("\n{}", "=".repeat(60));
        println!("FILE: {}", path);
        println!("{}", "=".repeat(60));
        if let Err(e) = inspect_file(path) {
            eprintln!("Failed to read {}: {}", path, e);
        }
    }
}

fn inspect_file(path: &str) -> topicplot::Result<()> {
    let (records, skipped) = loader::read_file(path)?;
    println!("Records: {}  (skipped lines: {})", records.len(), skipped);

    if let Some(source) = records
        .first()
        .and_then(|r| r.get("source_file"))
        .and_then(|v| v.as_str())
    {
        println!("Embedding label: {}", embedding_label(source));
    }

    let table = Table::new(records);
    if table.is_empty() {
        return Ok(());
    }

    println!("\nColumns:");
    for column in table.columns() {
        let filled = table.rows().iter().filter(|r| r.get(column).is_some()).count();
        println!("  {:<20} {:>6}/{}", column, filled, table.len());
    }

    println!("\n{:<30} {:>6}", "Dataset", "Rows");
    println!("{}", "-".repeat(37));
    for group in table.groups() {
        println!("{:<30} {:>6}", group.dataset, group.rows.len());
    }

    Ok(())
}
