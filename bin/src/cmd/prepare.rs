//! Raw data preparation command implementation.

use std::path::Path;

use anyhow::Result;
use puckline::PrepareConfig;

/// Filter a raw export and write the modern team-level table.
pub(crate) fn prepare_data(input: &Path, output: &Path, config: &PrepareConfig) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Data Preparation                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Input:      {}", input.display());
    println!(
        "Filter:     situation = {}, position = {}, season >= {}",
        config.situation, config.position, config.min_season
    );
    println!();

    let summary = puckline::prepare_file(input, output, config)?;

    println!("Kept {} rows, one per team per game", summary.rows);
    println!("Saved to:   {}", output.display());
    println!();
    Ok(())
}
