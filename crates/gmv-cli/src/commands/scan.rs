//! Scan command - recognize a screenshot and extract its GMV.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use gmv_core::{GmvExtractor, GmvParser, GmvReport, RetryingRecognizer, TextRecognizer};

use super::{emit, explain, format_report, load_config, OutputFormat, ReportRecord};
use crate::recognizer::CommandRecognizer;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Screenshot image
    #[arg(required = true)]
    image: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Override the recognizer time box, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Show which strategies declined and which one matched
    #[arg(long)]
    explain: bool,

    /// Fail when no GMV value is found
    #[arg(long)]
    require: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if let Some(timeout_ms) = args.timeout_ms {
        config.recognizer.timeout_ms = timeout_ms;
    }

    if !args.image.exists() {
        anyhow::bail!("Input file not found: {}", args.image.display());
    }

    info!("Scanning screenshot: {}", args.image.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message("Recognizing text...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let recognizer = RetryingRecognizer::from_config(
        CommandRecognizer::from_config(&config.recognizer)?,
        &config.recognizer,
    );
    let image = args.image.clone();
    let recognized = tokio::task::spawn_blocking(move || recognizer.recognize(&image)).await?;

    let text = match recognized {
        Ok(text) => text,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!(
                "{} Could not read the screenshot: {}. Check the recognizer with 'gmv config get recognizer' and try again.",
                style("✗").red(),
                e
            );
            return Err(e.into());
        }
    };
    pb.finish_and_clear();
    debug!("Recognized {} characters", text.len());

    let parser = GmvParser::from_config(&config.extraction);
    let result = parser.parse(&text);
    if args.explain {
        explain(&result);
    }

    let source = args.image.display().to_string();
    let report = GmvReport::new(&result, &text, &config.output.currency_symbol);
    let record = ReportRecord::new(&source, &report);
    emit(&format_report(&record, args.format)?, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    if args.require && !report.is_found() {
        anyhow::bail!("No GMV value found in {}", source);
    }

    Ok(())
}
