//! Expenses command - project a model response into expense drafts.

use std::path::PathBuf;

use clap::Args;

use recibo_core::expense::project_receipt;
use recibo_core::models::expense::ExpenseDraft;

use super::parse::{load_config, parse_input, write_output};

/// Arguments for the expenses command.
#[derive(Args)]
pub struct ExpensesArgs {
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
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per draft)
    Csv,
}

pub async fn run(args: ExpensesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let receipt = parse_input(&args.input, args.raw_ocr.as_deref(), &config)?;
    let drafts = project_receipt(&receipt, &config.expenses);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string(&drafts)?,
        OutputFormat::Csv => format_csv(&drafts)?,
    };

    write_output(args.output.as_deref(), &output)
}

fn format_csv(drafts: &[ExpenseDraft]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "item",
        "amount",
        "currency",
        "expense_date",
        "category",
        "location",
        "unit",
        "unit_price",
        "payment_method",
    ])?;

    for draft in drafts {
        wtr.write_record([
            draft.item.as_str(),
            &draft.amount.to_string(),
            &draft.currency,
            &draft.expense_date.to_string(),
            draft.category.as_deref().unwrap_or(""),
            draft.location.as_deref().unwrap_or(""),
            &draft.unit.to_string(),
            &draft.unit_price.to_string(),
            &draft.payment_method,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}
