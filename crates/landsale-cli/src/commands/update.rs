//! Update command - incremental extraction into a results database.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use clap::Args;
use console::style;
use tracing::{info, warn};

use landsale_core::{BatchStats, ExtractionDatabase, ExtractionEngine};

use super::batch::{extract_files, print_stats};
use super::{collect_inputs, document_id, load_config};

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Extraction database file
    #[arg(short, long, default_value = "extraction_results.json")]
    database: PathBuf,

    /// Re-extract documents already in the database
    #[arg(long)]
    force: bool,

    /// Number of parallel workers (default: from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Process only the first N new files
    #[arg(short, long)]
    limit: Option<usize>,
}

pub async fn run(args: UpdateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut database = ExtractionDatabase::open(&args.database, Utc::now())?;
    info!(
        "Loaded {} stored extractions from {}",
        database.len(),
        args.database.display()
    );

    let files = collect_inputs(&args.input, &config.batch.input_extension)?;
    let found = files.len();

    let mut pending: Vec<PathBuf> = files
        .into_iter()
        .filter(|path| args.force || !database.contains(&document_id(path)))
        .collect();
    if let Some(limit) = args.limit {
        pending.truncate(limit);
    }

    eprintln!(
        "{} Found {} files, {} to extract",
        style("ℹ").blue(),
        found,
        pending.len()
    );

    if pending.is_empty() {
        eprintln!(
            "{} Database {} is up to date ({} extractions)",
            style("✓").green(),
            args.database.display(),
            database.len()
        );
        return Ok(());
    }

    let engine = Arc::new(ExtractionEngine::from_config(&config.extraction));
    let jobs = args.jobs.unwrap_or(config.batch.jobs);
    let outcomes = extract_files(pending, engine, jobs).await?;

    let mut stats = BatchStats::default();
    let mut failed = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(result) => {
                stats.record(&result, config.batch.high_confidence_threshold);
                database.insert(result);
            }
            Err(e) => {
                warn!("Skipping {}: {}", outcome.path.display(), e);
                failed += 1;
            }
        }
    }

    database.save(&args.database, Utc::now())?;

    eprintln!();
    eprintln!(
        "{} Added {} extractions in {:?} ({} failed), database now holds {}",
        style("✓").green(),
        stats.total,
        start.elapsed(),
        failed,
        database.len()
    );

    print_stats(&stats);

    Ok(())
}
