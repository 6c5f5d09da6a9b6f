use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    config::STANDARD_RATE_PERCENT,
    ingest::{IngestOptions, SourceFormat},
    io_utils,
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Reconcile sales and purchases VAT from transaction exports",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute the VAT position (sales VAT, purchases VAT, net) for a file
    Reconcile(ReconcileArgs),
    /// Show which columns would be used for amount, type, and VAT
    Roles(RolesArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum InputFormat {
    /// Detect from the file extension
    #[default]
    Auto,
    Csv,
    Tsv,
    Json,
    /// Excel or OpenDocument workbook (first sheet)
    Excel,
}

impl InputFormat {
    pub fn source_format(self) -> Option<SourceFormat> {
        match self {
            InputFormat::Auto => None,
            InputFormat::Csv => Some(SourceFormat::Csv),
            InputFormat::Tsv => Some(SourceFormat::Tsv),
            InputFormat::Json => Some(SourceFormat::Json),
            InputFormat::Excel => Some(SourceFormat::Spreadsheet),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable report rounded to two decimals
    #[default]
    Table,
    /// Unrounded JSON object with sales_vat, purchases_vat, net_position, warnings
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Input file (CSV, TSV, JSON, XLSX/XLS/ODS); use '-' for stdin together with --format
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Input format (defaults to detection by extension)
    #[arg(long, value_enum, default_value = "auto")]
    pub format: InputFormat,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Refuse inputs larger than this many bytes
    #[arg(long = "max-bytes", default_value_t = io_utils::DEFAULT_MAX_INPUT_BYTES)]
    pub max_bytes: u64,
}

impl InputArgs {
    pub fn ingest_options(&self) -> Result<IngestOptions> {
        Ok(IngestOptions {
            format: self.format.source_format(),
            delimiter: self.delimiter,
            encoding: io_utils::resolve_encoding(self.input_encoding.as_deref())?,
            max_bytes: self.max_bytes,
        })
    }
}

#[derive(Debug, Clone, Args)]
pub struct ReconcileArgs {
    #[command(flatten)]
    pub source: InputArgs,
    /// Standard VAT rate (percent) used to extract VAT from gross amounts when no VAT column exists
    #[arg(
        long = "standard-rate",
        default_value_t = STANDARD_RATE_PERCENT,
        value_parser = parse_rate
    )]
    pub standard_rate: f64,
    /// Output rendering
    #[arg(short = 'o', long = "output", value_enum, default_value = "table")]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Args)]
pub struct RolesArgs {
    #[command(flatten)]
    pub source: InputArgs,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

pub fn parse_rate(value: &str) -> Result<f64, String> {
    let rate: f64 = value
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|_| format!("'{value}' is not a percentage"))?;
    if !rate.is_finite() || rate < 0.0 {
        return Err("Rate must be a non-negative percentage".to_string());
    }
    Ok(rate)
}
