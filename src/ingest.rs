//! File ingestion: turns uploaded CSV/TSV, JSON, or spreadsheet bytes into a
//! [`Table`] for the engine.

use std::{fmt, io::Cursor, path::Path};

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};
use serde_json::{Map, Value as JsonValue};

use crate::{
    data::Cell,
    dataset::Table,
    error::ReconcileError,
    io_utils::{self, DEFAULT_CSV_DELIMITER, DEFAULT_TSV_DELIMITER},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Json,
    Spreadsheet,
}

impl SourceFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ReconcileError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "tsv" => Ok(SourceFormat::Tsv),
            "json" => Ok(SourceFormat::Json),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Ok(SourceFormat::Spreadsheet),
            _ => Err(ReconcileError::UnsupportedFormat(ext)),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Tsv => "tsv",
            SourceFormat::Json => "json",
            SourceFormat::Spreadsheet => "spreadsheet",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Explicit format; detected from the extension when `None`.
    pub format: Option<SourceFormat>,
    /// Delimiter override for delimited text.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
    pub max_bytes: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            format: None,
            delimiter: None,
            encoding: UTF_8,
            max_bytes: io_utils::DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Reads `path` (or stdin for `-`) and decodes it into a table.
pub fn load_table(path: &Path, options: &IngestOptions) -> Result<(SourceFormat, Table)> {
    let format = match options.format {
        Some(format) => format,
        None if io_utils::is_dash(path) => {
            return Err(anyhow!("Reading from stdin requires --format"));
        }
        None => SourceFormat::from_path(path)?,
    };
    let bytes = io_utils::read_input_bytes(path, options.max_bytes)?;
    debug!("Read {} byte(s) from {:?} as {format}", bytes.len(), path);
    let table = decode_table(&bytes, format, options)
        .with_context(|| format!("Decoding {path:?} as {format}"))?;
    info!(
        "Loaded {} row(s) across {} column(s) from {:?}",
        table.row_count(),
        table.columns().len(),
        path
    );
    Ok((format, table))
}

pub fn decode_table(
    bytes: &[u8],
    format: SourceFormat,
    options: &IngestOptions,
) -> Result<Table, ReconcileError> {
    match format {
        SourceFormat::Csv => decode_delimited(
            bytes,
            options.delimiter.unwrap_or(DEFAULT_CSV_DELIMITER),
            options.encoding,
        ),
        SourceFormat::Tsv => decode_delimited(
            bytes,
            options.delimiter.unwrap_or(DEFAULT_TSV_DELIMITER),
            options.encoding,
        ),
        SourceFormat::Json => decode_json(bytes, options.encoding),
        SourceFormat::Spreadsheet => decode_spreadsheet(bytes),
    }
}

fn decode_failure(detail: impl fmt::Display) -> ReconcileError {
    ReconcileError::DecodeFailure(detail.to_string())
}

/// Delimited text with a header record. Empty fields become nulls and short
/// records are padded with nulls; a record wider than the header fails.
pub fn decode_delimited(
    bytes: &[u8],
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<Table, ReconcileError> {
    let mut reader = io_utils::open_csv_reader(bytes, delimiter, true);
    let headers = io_utils::reader_headers(&mut reader, encoding)?;
    if headers.is_empty() {
        return Err(decode_failure("No columns to parse from file"));
    }

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(decode_failure)?;
        if record.len() > headers.len() {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            return Err(decode_failure(format!(
                "Expected {} fields in line {line}, saw {}",
                headers.len(),
                record.len()
            )));
        }
        let decoded = io_utils::decode_record(&record, encoding)?;
        rows.push(
            decoded
                .into_iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Null
                    } else {
                        Cell::Text(field)
                    }
                })
                .collect(),
        );
    }
    Ok(Table::new(headers, rows))
}

/// JSON as an array of records, an object of column arrays, or an object of
/// row objects. Object key order defines column order.
pub fn decode_json(bytes: &[u8], encoding: &'static Encoding) -> Result<Table, ReconcileError> {
    let text = io_utils::decode_bytes(bytes, encoding)?;
    let document: JsonValue = serde_json::from_str(&text).map_err(decode_failure)?;
    match document {
        JsonValue::Array(items) => {
            let records = items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| match item {
                    JsonValue::Object(map) => Ok(map),
                    _ => Err(decode_failure(format!("Record {} is not an object", idx + 1))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Table::from_records(records.into_iter().map(|map| {
                map.into_iter().map(|(key, value)| (key, json_cell(value)))
            })))
        }
        JsonValue::Object(map) => decode_json_columns(map),
        _ => Err(decode_failure(
            "Expected an array of records or an object of columns",
        )),
    }
}

fn decode_json_columns(map: Map<String, JsonValue>) -> Result<Table, ReconcileError> {
    let columns: Vec<String> = map.keys().cloned().collect();
    let mut index_keys: Vec<String> = Vec::new();
    let mut cells: Vec<Vec<(String, Cell)>> = Vec::with_capacity(columns.len());

    for (name, value) in map {
        let entries = match value {
            JsonValue::Array(values) => values
                .into_iter()
                .enumerate()
                .map(|(idx, v)| (idx.to_string(), json_cell(v)))
                .collect::<Vec<_>>(),
            JsonValue::Object(rows) => rows
                .into_iter()
                .map(|(key, v)| (key, json_cell(v)))
                .collect(),
            _ => {
                return Err(decode_failure(format!(
                    "Column '{name}' must be an array or an object"
                )));
            }
        };
        for (key, _) in &entries {
            if !index_keys.contains(key) {
                index_keys.push(key.clone());
            }
        }
        cells.push(entries);
    }

    let rows = index_keys
        .iter()
        .map(|key| {
            cells
                .iter()
                .map(|column| {
                    column
                        .iter()
                        .find(|(k, _)| k == key)
                        .map(|(_, cell)| cell.clone())
                        .unwrap_or(Cell::Null)
                })
                .collect()
        })
        .collect();
    Ok(Table::new(columns, rows))
}

fn json_cell(value: JsonValue) -> Cell {
    match value {
        JsonValue::Null => Cell::Null,
        JsonValue::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Null),
        JsonValue::String(s) => Cell::Text(s),
        other => Cell::Text(other.to_string()),
    }
}

/// First worksheet of an Excel or OpenDocument workbook; the first row holds
/// the column names. Rows with no values at all are skipped.
pub fn decode_spreadsheet(bytes: &[u8]) -> Result<Table, ReconcileError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(decode_failure)?;
    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| decode_failure("Workbook contains no sheets"))?;
    let range = workbook
        .worksheet_range(first)
        .map_err(|err| decode_failure(format!("Failed to read sheet '{first}': {err}")))?;

    let mut sheet_rows = range.rows();
    let headers = match sheet_rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(idx, cell)| match spreadsheet_cell(cell) {
                Cell::Null => format!("Unnamed: {idx}"),
                other => other.as_display(),
            })
            .collect::<Vec<_>>(),
        None => return Err(decode_failure("No columns to parse from file")),
    };

    let rows = sheet_rows
        .map(|row| row.iter().map(spreadsheet_cell).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_null()))
        .collect();
    debug!("Read worksheet '{first}' with {} column(s)", headers.len());
    Ok(Table::new(headers, rows))
}

fn spreadsheet_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Null,
        Data::String(s) if s.is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        Data::DateTime(dt) => Cell::Text(dt.as_f64().to_string()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
