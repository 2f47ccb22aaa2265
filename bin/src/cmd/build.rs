//! Feature build command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use puckline::{FeatureConfig, RestClamp};
use tracing::debug;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) window: Option<usize>,
    pub(crate) default_rest: Option<i64>,
    pub(crate) discount: Option<f64>,
    pub(crate) clamp_rest: bool,
}

/// Resolve the feature configuration: file (or defaults), then flags.
pub(crate) fn resolve_config(file: Option<&Path>, overrides: &Overrides) -> Result<FeatureConfig> {
    let mut config = match file {
        Some(path) => FeatureConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FeatureConfig::default(),
    };

    if let Some(window) = overrides.window {
        config.window = window;
    }
    if let Some(rest) = overrides.default_rest {
        config.default_rest_days = rest;
    }
    if let Some(discount) = overrides.discount {
        config.back_to_back_discount = discount;
    }
    if overrides.clamp_rest {
        config.rest_clamp = RestClamp::Zero;
    }

    config.validate()?;
    debug!(?config, "resolved feature config");
    Ok(config)
}

/// Build the feature table from `input` into `output`.
pub(crate) fn build_features(
    input: &Path,
    output: &Path,
    config_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<()> {
    let config = resolve_config(config_file, overrides)?;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Feature Build                             ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Input:         {}", input.display());
    println!("Output:        {}", output.display());
    println!("Window:        {} games", config.window);
    println!("Default rest:  {} days", config.default_rest_days);
    println!("B2B discount:  {}", config.back_to_back_discount);
    println!();

    let summary = puckline::build_features(input, output, config)?;

    println!(
        "Wrote {} rows x {} columns to {}",
        summary.rows,
        summary.columns,
        output.display()
    );
    println!();
    Ok(())
}
