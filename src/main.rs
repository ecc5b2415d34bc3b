use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;

use receipt_points::{breakdown, Receipt};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 2 && args[1] == "score" {
        run_score(&args[2..])
    } else {
        print_usage();
        std::process::exit(2);
    }
}

fn print_usage() {
    eprintln!("receipt-points {}", receipt_points::VERSION);
    eprintln!();
    eprintln!("Usage: receipt-points score <receipt.json>...");
    eprintln!("   Run the HTTP API with: cargo run --bin receipt-server");
}

fn run_score(paths: &[String]) -> Result<()> {
    let mut failed = 0;

    for path in paths {
        if let Err(e) = score_file(Path::new(path)) {
            eprintln!("❌ {}: {:#}", path, e);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} receipts could not be scored", failed, paths.len());
    }

    Ok(())
}

fn score_file(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    let receipt: Receipt =
        serde_json::from_str(&content).context("Failed to parse receipt JSON")?;

    if let Err(errors) = receipt.validate() {
        let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(anyhow!("invalid receipt: {}", details.join("; ")));
    }

    let points = breakdown(&receipt)?;

    println!("🧾 {} ({} {})", receipt.retailer, receipt.purchase_date, receipt.purchase_time);
    for (rule, pts) in points.rules() {
        println!("   {:<24} {:>5}", rule, pts);
    }
    println!("   {:<24} {:>5}", "TOTAL", points.total());

    Ok(())
}
