//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod scan;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;
use tracing::debug;

use gmv_core::models::config::GmvConfig;
use gmv_core::{ExtractionResult, GmvReport};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// A report together with where and when it was produced.
#[derive(Serialize)]
pub struct ReportRecord<'a> {
    pub source: &'a str,
    pub extracted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: &'a GmvReport,
}

impl<'a> ReportRecord<'a> {
    pub fn new(source: &'a str, report: &'a GmvReport) -> Self {
        Self {
            source,
            extracted_at: Utc::now(),
            report,
        }
    }
}

/// Load configuration from `--config`, the default location, or built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<GmvConfig> {
    if let Some(path) = config_path {
        return Ok(GmvConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(GmvConfig::from_file(&default_path)?)
    } else {
        Ok(GmvConfig::default())
    }
}

/// Read OCR text from a file, or from stdin when `input` is "-".
pub fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(fs::read_to_string(&path)?)
}

pub fn format_report(record: &ReportRecord<'_>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record.report)),
    }
}

fn format_csv(record: &ReportRecord<'_>) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let report = record.report;

    let gmv = report.gmv.map(|v| v.to_string()).unwrap_or_default();
    let extracted_at = record.extracted_at.to_rfc3339();

    wtr.write_record(["source", "gmv", "strategy", "formatted", "extracted_at"])?;
    wtr.write_record([
        record.source,
        gmv.as_str(),
        report.strategy.map(|s| s.name()).unwrap_or(""),
        report.formatted.as_deref().unwrap_or(""),
        extracted_at.as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &GmvReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", report.summary()));
    if let Some(strategy) = report.strategy {
        output.push_str(&format!("Strategy: {}\n", strategy));
    }
    if let Some(matched) = &report.matched_text {
        output.push_str(&format!("Matched: {:?}\n", matched));
    }

    output
}

/// Write to `output` if given, stdout otherwise.
pub fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(output_path) = output {
        fs::write(output_path, content)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content.trim_end());
    }
    Ok(())
}

/// Print which strategies declined and which one accepted.
pub fn explain(result: &ExtractionResult) {
    for (strategy, reason) in &result.declined {
        eprintln!("  {} {}: {}", style("✗").red(), strategy, reason);
    }
    match &result.gmv {
        Some(found) => eprintln!(
            "  {} {}: {} from {:?}",
            style("✓").green(),
            found.strategy,
            found.value,
            found.source
        ),
        None => eprintln!("  {} no strategy accepted a value", style("ℹ").blue()),
    }
}
