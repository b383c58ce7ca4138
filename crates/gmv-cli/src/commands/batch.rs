//! Batch processing command for many OCR text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use gmv_core::{GmvExtractor, GmvParser, GmvReport};

use super::{format_report, load_config, OutputFormat, ReportRecord};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching OCR text files (e.g. "reports/*.txt")
    #[arg(required = true)]
    input: String,

    /// Directory for one report per input file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a summary CSV (inside the output directory, or here)
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<GmvReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = GmvParser::from_config(&config.extraction);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = process_file(&path, &parser, &config.output.currency_symbol)
            .and_then(|report| {
                if let Some(ref output_dir) = args.output_dir {
                    write_report(output_dir, &path, &report, args.format)?;
                }
                Ok(report)
            });
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(report) => {
                results.push(ProcessResult {
                    path,
                    report: Some(report),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        report: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let found = results
        .iter()
        .filter(|r| r.report.as_ref().is_some_and(|rep| rep.is_found()))
        .count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} with GMV, {} without, {} failed",
        style(found).green(),
        style(results.len() - found - failed.len()).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_file(path: &Path, parser: &GmvParser, currency_symbol: &str) -> anyhow::Result<GmvReport> {
    let text = fs::read_to_string(path)?;
    let result = parser.parse(&text);
    Ok(GmvReport::new(&result, &text, currency_symbol))
}

fn write_report(
    output_dir: &Path,
    path: &Path,
    report: &GmvReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

    let source = path.display().to_string();
    let record = ReportRecord::new(&source, report);
    fs::write(&output_path, format_report(&record, format)?)
        .with_context(|| format!("cannot write {}", output_path.display()))?;
    debug!("Wrote output to {}", output_path.display());

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "gmv",
        "strategy",
        "formatted",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let elapsed = result.processing_time_ms.to_string();

        match &result.report {
            Some(report) => {
                let status = if report.is_found() { "found" } else { "not_found" };
                let gmv = report.gmv.map(|v| v.to_string()).unwrap_or_default();
                wtr.write_record([
                    filename,
                    status,
                    gmv.as_str(),
                    report.strategy.map(|s| s.name()).unwrap_or(""),
                    report.formatted.as_deref().unwrap_or(""),
                    elapsed.as_str(),
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    elapsed.as_str(),
                    result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
