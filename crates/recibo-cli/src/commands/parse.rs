//! Parse command - turn a saved model response into a structured receipt.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::debug;

use recibo_core::models::config::ReciboConfig;
use recibo_core::models::receipt::ScannedReceipt;
use recibo_core::receipt::{ReceiptParser, ResponseParser};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Model response file (plain text protocol)
    #[arg(required = true)]
    input: PathBuf,

    /// Raw OCR text file, retained on the receipt for audit
    #[arg(long)]
    raw_ocr: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Warn when the stated total differs from the sum of item amounts
    #[arg(long)]
    check_total: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per item)
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let receipt = parse_input(&args.input, args.raw_ocr.as_deref(), &config)?;

    if args.check_total {
        let items_total = receipt.items_total();
        if items_total != receipt.total {
            eprintln!(
                "{} stated total {} differs from item sum {}",
                style("!").yellow(),
                receipt.total,
                items_total
            );
        }
    }

    let output = format_receipt(&receipt, args.format)?;
    write_output(args.output.as_deref(), &output)
}

/// Load configuration, falling back to defaults when no file is given.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<ReciboConfig> {
    match config_path {
        Some(path) => Ok(ReciboConfig::from_file(Path::new(path))?),
        None => Ok(ReciboConfig::default()),
    }
}

/// Read the response (and optional raw OCR text) and parse a receipt.
pub(crate) fn parse_input(
    input: &Path,
    raw_ocr: Option<&Path>,
    config: &ReciboConfig,
) -> anyhow::Result<ScannedReceipt> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let response = fs::read_to_string(input)?;
    let raw_text = match raw_ocr {
        Some(path) => fs::read_to_string(path)?,
        None => String::new(),
    };

    debug!("parsing response from {}", input.display());

    let parser = ReceiptParser::from_config(&config.parsing);
    Ok(parser.parse(&response, &raw_text))
}

/// Write to the output file, or stdout when none is given.
pub(crate) fn write_output(path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    if let Some(path) = path {
        fs::write(path, output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_receipt(receipt: &ScannedReceipt, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(receipt)?),
        OutputFormat::Csv => format_csv(receipt),
        OutputFormat::Text => Ok(format_text(receipt)),
    }
}

fn format_csv(receipt: &ScannedReceipt) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["name", "translated_name", "amount", "quantity", "category"])?;

    for item in &receipt.items {
        wtr.write_record([
            item.name.as_str(),
            item.translated_name.as_deref().unwrap_or(""),
            &item.amount.to_string(),
            &item.quantity.map(|q| q.to_string()).unwrap_or_default(),
            item.category.as_deref().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(receipt: &ScannedReceipt) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Store: {}\n",
        receipt.translated_text.as_deref().unwrap_or("unknown")
    ));
    if let Some(date) = receipt.date {
        output.push_str(&format!("Date: {}\n", date));
    }
    output.push('\n');

    output.push_str("Items:\n");
    for item in &receipt.items {
        output.push_str(&format!(
            "  {:<30} {:>8} {} x{}\n",
            item.display_name(),
            item.amount,
            receipt.currency,
            item.quantity.unwrap_or(1)
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} {}\n", receipt.total, receipt.currency));

    output
}
