//! Extract command - read GMV from OCR text.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use gmv_core::{GmvExtractor, GmvParser, GmvReport};

use super::{emit, explain, format_report, load_config, read_input, OutputFormat, ReportRecord};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// OCR text file, or "-" to read stdin
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which strategies declined and which one matched
    #[arg(long)]
    explain: bool,

    /// Fail when no GMV value is found
    #[arg(long)]
    require: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Extracting GMV from {}", args.input);
    let text = read_input(&args.input)?;

    let parser = GmvParser::from_config(&config.extraction);
    let result = parser.parse(&text);
    if args.explain {
        explain(&result);
    }

    let report = GmvReport::new(&result, &text, &config.output.currency_symbol);
    let record = ReportRecord::new(&args.input, &report);
    emit(&format_report(&record, args.format)?, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    if args.require && !report.is_found() {
        anyhow::bail!("No GMV value found in {}", args.input);
    }

    Ok(())
}
