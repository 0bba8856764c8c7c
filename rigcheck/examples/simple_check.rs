//! Simple check example: check a build file and print its remarks.

use rigcheck::prelude::*;
use std::path::Path;

fn main() -> Result<(), RigCheckError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/gaming_build.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_check [path/to/build.json]");
        std::process::exit(1);
    }

    let report = RigCheckCore::check_file(path, &CheckOptions::default())?;

    println!("Check results for: {}", path.display());
    println!("Total remarks: {}", report.stats.total());
    println!();

    for component in &report.components {
        println!("{} ({})", component.name, component.category);
        for (key, remark) in &component.remarks {
            println!("  [{}] {}: {}", remark.score, key, remark.text);
        }
    }

    if let Some(best) = report.best_profile() {
        println!("\nBest suited for: {} ({})", best.name, best.total_score);
    }

    if !report.passes() {
        println!("\nCheck failed (incompatible parts).");
        std::process::exit(1);
    }

    println!("\nCheck passed.");
    Ok(())
}
