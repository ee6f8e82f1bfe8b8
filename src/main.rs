use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use olympic_reconciliation::{Pipeline, PipelineConfig, VERSION};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "olympic-reconciliation")]
#[command(about = "Merge the Olympic results archive with a new games extract")]
#[command(version)]
struct Args {
    /// JSON config file (defaults to the standard layout)
    #[arg(short, long, env = "OLYMPIC_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the input CSV files
    #[arg(short, long, env = "OLYMPIC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory the output CSV files are written to
    #[arg(short, long, env = "OLYMPIC_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "olympic_reconciliation=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    println!("🏅 Olympic Results Reconciliation v{}", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Config
    println!("\n⚙️  Loading configuration...");
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(data_dir) = args.data_dir {
        config = config.with_data_dir(data_dir);
    }
    if let Some(output_dir) = args.output_dir {
        config = config.with_output_dir(output_dir);
    }
    println!("✓ Input:  {}", config.data_dir.display());
    println!("✓ Output: {}", config.output_dir.display());

    // 2. Reconcile
    println!("\n🔗 Reconciling {}...", config.current_games.edition);
    let pipeline = Pipeline::new(config);
    let reconciled = pipeline.reconcile()?;
    let summary = &reconciled.summary;
    println!("✓ {} editions, {} historical result rows", summary.editions, summary.historical_rows);
    println!("✓ {} current athletes, {} new identities", summary.new_athletes, summary.identities_minted);
    println!("✓ {} rows merged, {} medal rows gap-filled", summary.rows_merged, summary.rows_gap_filled);
    println!("✓ {} tally entries", summary.tally_entries);

    // 3. Write
    println!("\n💾 Writing output tables...");
    pipeline.write(&reconciled)?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🎉 Reconciliation COMPLETE!");
    println!("✅ {}", summary.summary());

    Ok(())
}
