//! Feature column listing command implementation.

use anyhow::{Result, bail};
use puckline::features::{FeatureGroup, catalogue::features_by_group};

const GROUPS: [(FeatureGroup, &str); 4] = [
    (FeatureGroup::Rest, "Rest"),
    (FeatureGroup::Form, "Form"),
    (FeatureGroup::Fatigue, "Fatigue"),
    (FeatureGroup::Opponent, "Opponent"),
];

/// List the derived columns for a given window width.
pub(crate) fn list_columns(window: usize, format: &str, detailed: bool) -> Result<()> {
    match format {
        "json" => {
            let all = puckline::features::available_features(window);
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
        "text" => print_text(window, detailed),
        other => bail!("unknown format '{other}', expected 'text' or 'json'"),
    }
    Ok(())
}

fn print_text(window: usize, detailed: bool) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Feature Columns                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for (group, group_name) in GROUPS {
        println!("{} ({}):", group_name, group.description());
        println!("{}", "-".repeat(60));

        for info in features_by_group(group, window) {
            if detailed {
                let missing = if info.nullable { ", may be null" } else { "" };
                println!(
                    "  {:28} - {} [{}{}]",
                    info.name, info.description, info.dtype, missing
                );
            } else {
                println!("  {}", info.name);
            }
        }
        println!();
    }

    if !detailed {
        println!("Use --detailed for column descriptions.\n");
    }
}
