//! Puckline CLI binary.
//!
//! Provides command-line access to the feature pipeline.

mod cmd;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "puckline")]
#[command(about = "Rest, fatigue and rolling-form features for team game logs", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append derived feature columns to a team-game table
    Build {
        /// Input CSV, one row per team per game
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,

        /// JSON file with feature settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rolling window width in games
        #[arg(short, long)]
        window: Option<usize>,

        /// Rest days assumed before a team's first game
        #[arg(long)]
        default_rest: Option<i64>,

        /// Back-to-back discount on rolling form
        #[arg(long)]
        discount: Option<f64>,

        /// Floor negative rest-day counts at zero
        #[arg(long)]
        clamp_rest: bool,
    },

    /// Filter a raw export down to one team-level row per team per game
    Prepare {
        /// Raw input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Filtered output CSV
        #[arg(short, long)]
        output: PathBuf,

        /// First season to keep
        #[arg(long, default_value = "2017")]
        min_season: i64,

        /// Game situation to keep
        #[arg(long, default_value = "all")]
        situation: String,

        /// Row granularity to keep
        #[arg(long, default_value = "Team Level")]
        position: String,
    },

    /// List the derived feature columns
    Columns {
        /// Rolling window width used in column names
        #[arg(short, long, default_value = "5")]
        window: usize,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Show descriptions
        #[arg(long)]
        detailed: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "puckline=debug" } else { "puckline=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build {
            input,
            output,
            config,
            window,
            default_rest,
            discount,
            clamp_rest,
        } => {
            let overrides = cmd::build::Overrides {
                window,
                default_rest,
                discount,
                clamp_rest,
            };
            cmd::build::build_features(&input, &output, config.as_deref(), &overrides)?;
        }
        Commands::Prepare {
            input,
            output,
            min_season,
            situation,
            position,
        } => {
            let config = puckline::PrepareConfig {
                situation,
                position,
                min_season,
            };
            cmd::prepare::prepare_data(&input, &output, &config)?;
        }
        Commands::Columns {
            window,
            format,
            detailed,
        } => {
            cmd::columns::list_columns(window, &format, detailed)?;
        }
    }

    Ok(())
}
