//! Process command - extract one land-sale notice.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use landsale_core::extraction::rules::format_european_decimal;
use landsale_core::{DocumentExtractor, DocumentResult, ExtractionEngine};

use super::{document_id, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input OCR text file, or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document id (default: input file stem)
    #[arg(long)]
    id: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let from_stdin = args.input.as_os_str() == "-";
    let text = if from_stdin {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        fs::read_to_string(&args.input)?
    };

    let id = match (&args.id, from_stdin) {
        (Some(id), _) => id.clone(),
        (None, true) => "stdin".to_string(),
        (None, false) => document_id(&args.input),
    };

    info!("Processing document {} ({} characters)", id, text.len());

    let engine = ExtractionEngine::from_config(&config.extraction);
    let result = engine.extract(&text, &id);

    let output = match args.format {
        OutputFormat::Json if config.batch.pretty_json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Json => serde_json::to_string(&result)?,
        OutputFormat::Text => format_result_text(&result),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Human-readable summary with European-formatted prices.
pub fn format_result_text(result: &DocumentResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", result.document_id));
    output.push_str(&format!("Template: {}\n", result.template_type));
    output.push_str(&format!("Confidence: {:.2}\n", result.confidence_score));
    output.push('\n');

    output.push_str(&format!("Plots ({}):\n", result.plots.len()));
    for plot in &result.plots {
        let area = plot
            .area_m2
            .map(|a| format!("{} m²", a))
            .unwrap_or_else(|| "-".to_string());
        let price = plot
            .price_eur
            .map(|p| format!("{} EUR", format_european_decimal(p)))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "  {:<10} {:>12} {:>16}  share {}\n",
            plot.parcel_id, area, price, plot.share
        ));
    }
    output.push('\n');

    if let Some(total_area) = result.total_area_m2 {
        output.push_str(&format!("Total area: {} m²\n", total_area));
    }
    match result.total_price {
        Some(price) => {
            output.push_str(&format!("Total price: {} EUR\n", format_european_decimal(price)))
        }
        None => output.push_str("Total price: -\n"),
    }
    output.push_str(&format!(
        "Buyer known: {} ({:.2})\n",
        if result.buyer_known { "yes" } else { "no" },
        result.buyer_known_confidence
    ));

    if !result.notes.is_empty() {
        output.push_str("\nNotes:\n");
        for note in &result.notes {
            output.push_str(&format!("  - {}\n", note));
        }
    }

    output
}
