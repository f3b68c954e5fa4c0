//! Row reader for uploaded spreadsheets
//!
//! Turns a raw uploaded file into untyped rows (column header → cell text).
//! Delimited text goes through `csv`; workbooks go through `calamine`, first
//! sheet only. In both formats the first row holds the headers.

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use thiserror::Error;

/// One spreadsheet row: column header → cell text
pub type Row = HashMap<String, String>;

/// An uploaded file as received from the client
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Content decoded as text (lossy for binary workbooks)
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_name(&self.name)
    }
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    DelimitedText,
    Workbook,
}

impl FileFormat {
    /// Detect format from the file extension (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = Path::new(name)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();

        match extension.as_str() {
            "csv" => Some(FileFormat::DelimitedText),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(FileFormat::Workbook),
            _ => None,
        }
    }
}

/// Errors reading rows out of an uploaded file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unreadable workbook: {0}")]
    Workbook(String),

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Parser task failed: {0}")]
    Worker(String),
}

impl ParseError {
    /// Stable machine-readable code reported per failed file
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ParseError::Csv(_) | ParseError::Workbook(_) | ParseError::NoSheets => "PARSE_ERROR",
            ParseError::Worker(_) => "INTERNAL_ERROR",
        }
    }
}

/// Parse rows from a file, choosing the parser by extension
pub fn parse_rows(file: &RawFile) -> Result<Vec<Row>, ParseError> {
    match file.format() {
        Some(FileFormat::DelimitedText) => parse_csv(&file.bytes),
        Some(FileFormat::Workbook) => parse_workbook(&file.bytes),
        None => Err(ParseError::UnsupportedFormat(file.name.clone())),
    }
}

/// Parse rows on a blocking worker thread and wait for the result
pub async fn read_rows(file: RawFile) -> Result<Vec<Row>, ParseError> {
    tokio::task::spawn_blocking(move || parse_rows(&file))
        .await
        .map_err(|e| ParseError::Worker(e.to_string()))?
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<Row>, ParseError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.byte_headers()?.iter().map(lossy_field).collect();

    // Decoded per field: invalid UTF-8 becomes U+FFFD
    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        rows.push(zip_row(&headers, record.iter().map(lossy_field)));
    }

    Ok(rows)
}

fn lossy_field(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

fn parse_workbook(bytes: &[u8]) -> Result<Vec<Row>, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ParseError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::NoSheets)?
        .map_err(|e| ParseError::Workbook(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let Some(header) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header.iter().map(cell_to_string).collect();

    let rows = sheet_rows
        .filter(|cells| cells.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|cells| zip_row(&headers, cells.iter().map(cell_to_string)))
        .collect();

    Ok(rows)
}

/// Pair headers with cell values; unnamed columns are dropped and the first
/// of two identically named columns wins
fn zip_row(headers: &[String], values: impl Iterator<Item = String>) -> Row {
    let mut row = Row::with_capacity(headers.len());
    for (header, value) in headers.iter().zip(values) {
        if header.is_empty() {
            continue;
        }
        row.entry(header.clone()).or_insert(value);
    }
    row
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
