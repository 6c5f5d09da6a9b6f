//! I/O helpers for reading uploaded transaction files.
//!
//! - **Input bytes**: files (or stdin via the `-` path convention) are read
//!   whole, refusing anything above the configured size limit.
//! - **Delimited text**: flexible CSV readers over in-memory bytes, comma or
//!   tab by default.
//! - **Encoding**: field decoding through `encoding_rs`, defaulting to UTF-8.

use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::error::ReconcileError;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';
/// Upload limit carried over from the web front end: 16 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Reads the whole input, failing with [`ReconcileError::InputTooLarge`] once
/// more than `max_bytes` are available.
pub fn read_input_bytes(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    if is_dash(path) {
        return read_limited(io::stdin().lock(), max_bytes).context("Reading stdin");
    }
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    let size = file
        .metadata()
        .with_context(|| format!("Reading metadata for {path:?}"))?
        .len();
    if size > max_bytes {
        return Err(ReconcileError::InputTooLarge {
            size,
            limit: max_bytes,
        }
        .into());
    }
    read_limited(file, max_bytes).with_context(|| format!("Reading input file {path:?}"))
}

fn read_limited<R: Read>(reader: R, max_bytes: u64) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buffer)?;
    let size = buffer.len() as u64;
    if size > max_bytes {
        return Err(ReconcileError::InputTooLarge {
            size,
            limit: max_bytes,
        }
        .into());
    }
    Ok(buffer)
}

/// Records may have any number of fields; callers check widths against the
/// header themselves.
pub fn open_csv_reader<R>(reader: R, delimiter: u8, has_headers: bool) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String, ReconcileError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(ReconcileError::DecodeFailure(format!(
            "Failed to decode text with encoding {}",
            encoding.name()
        )))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(
    record: &csv::ByteRecord,
    encoding: &'static Encoding,
) -> Result<Vec<String>, ReconcileError> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>, ReconcileError>
where
    R: Read,
{
    let headers = reader
        .byte_headers()
        .map_err(|err| ReconcileError::DecodeFailure(err.to_string()))?
        .clone();
    decode_record(&headers, encoding)
}
