//! Batch processing command for many OCR text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use landsale_core::{BatchStats, DocumentExtractor, DocumentResult, ExtractionEngine};

use super::{collect_inputs, document_id, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output JSON file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a per-document summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Number of parallel workers (default: from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Process only the first N files
    #[arg(short, long)]
    limit: Option<usize>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<DocumentResult, String>,
    pub processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files = collect_inputs(&args.input, &config.batch.input_extension)?;
    if let Some(limit) = args.limit {
        files.truncate(limit);
    }

    if files.is_empty() {
        anyhow::bail!("No matching files found for: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let engine = Arc::new(ExtractionEngine::from_config(&config.extraction));
    let jobs = args.jobs.unwrap_or(config.batch.jobs);
    let outcomes = extract_files(files, engine, jobs).await?;

    let failed: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();
    if let Some(first) = failed.first() {
        if !args.continue_on_error {
            let message = first.result.as_ref().err().map(String::as_str).unwrap_or("");
            error!("Failed to process {}: {}", first.path.display(), message);
            anyhow::bail!("Processing failed for {}: {}", first.path.display(), message);
        }
    }

    let results: Vec<&DocumentResult> = outcomes.iter().filter_map(|o| o.result.as_ref().ok()).collect();

    let json = if config.batch.pretty_json {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };

    match &args.output {
        Some(output_path) => {
            fs::write(output_path, json)?;
            eprintln!(
                "{} Results written to {}",
                style("✓").green(),
                output_path.display()
            );
        }
        None => println!("{}", json),
    }

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &outcomes)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len()).green(),
        style(failed.len()).red()
    );

    let stats = BatchStats::from_results(results.iter().copied(), config.batch.high_confidence_threshold);
    print_stats(&stats);

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for outcome in &failed {
            eprintln!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.result.as_ref().err().map(String::as_str).unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Extract every file on a pool of blocking workers.
///
/// At most `jobs` files are in flight. Outcomes come back in input order.
pub async fn extract_files(
    files: Vec<PathBuf>,
    engine: Arc<ExtractionEngine>,
    jobs: usize,
) -> anyhow::Result<Vec<FileOutcome>> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let count = files.len();
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut workers = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let engine = Arc::clone(&engine);
        let pb = pb.clone();

        workers.spawn_blocking(move || {
            let _permit = permit;
            let outcome = extract_file(&path, engine.as_ref());
            pb.inc(1);
            (index, outcome)
        });
    }

    let mut slots: Vec<Option<FileOutcome>> = Vec::new();
    slots.resize_with(count, || None);

    while let Some(joined) = workers.join_next().await {
        let (index, outcome) = joined?;
        if let Err(e) = &outcome.result {
            warn!("Failed to process {}: {}", outcome.path.display(), e);
        }
        slots[index] = Some(outcome);
    }

    pb.finish_with_message("Complete");

    Ok(slots.into_iter().flatten().collect())
}

fn extract_file(path: &Path, engine: &dyn DocumentExtractor) -> FileOutcome {
    let start = Instant::now();
    let id = document_id(path);

    let result = fs::read_to_string(path)
        .map(|text| engine.extract(&text, &id))
        .map_err(|e| e.to_string());

    let processing_time_ms = start.elapsed().as_millis() as u64;
    debug!("Extracted {} in {}ms", path.display(), processing_time_ms);

    FileOutcome {
        path: path.to_path_buf(),
        result,
        processing_time_ms,
    }
}

/// Print extraction statistics to stderr.
pub fn print_stats(stats: &BatchStats) {
    let line = |label: &str, count: usize| {
        eprintln!(
            "   {:<28} {:>6} ({:.1}%)",
            label,
            count,
            stats.percent(count)
        );
    };

    eprintln!();
    eprintln!("{}", style("Extraction statistics:").bold());
    eprintln!("   {:<28} {:>6}", "Documents", stats.total);
    line("With plots", stats.with_plots);
    line("With plot areas", stats.with_areas);
    line("With total price", stats.with_price);
    line("Buyer known", stats.buyer_known);
    line("High confidence", stats.high_confidence);
    eprintln!("   {:<28} {:>6}", "Plots", stats.total_plots);
    eprintln!("   {:<28} {:>6}", "Plots with area", stats.plots_with_area);
}

fn write_summary(path: &Path, outcomes: &[FileOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "document_id",
        "filename",
        "status",
        "template_type",
        "plots",
        "plots_with_area",
        "total_area_m2",
        "total_price",
        "buyer_known",
        "confidence",
        "processing_time_ms",
        "error",
    ])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &outcome.result {
            Ok(result) => {
                wtr.write_record([
                    result.document_id.as_str(),
                    filename,
                    "success",
                    result.template_type.as_str(),
                    &result.plots.len().to_string(),
                    &result.plots_with_area().to_string(),
                    &result.total_area_m2.map(|a| a.to_string()).unwrap_or_default(),
                    &result.total_price.map(|p| p.to_string()).unwrap_or_default(),
                    &result.buyer_known.to_string(),
                    &format!("{:.2}", result.confidence_score),
                    &outcome.processing_time_ms.to_string(),
                    "",
                ])?;
            }
            Err(e) => {
                wtr.write_record([
                    document_id(&outcome.path).as_str(),
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    &outcome.processing_time_ms.to_string(),
                    e.as_str(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
