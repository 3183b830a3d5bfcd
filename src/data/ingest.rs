use std::borrow::Cow;
use std::fmt;
use std::io::{Cursor, Read, Seek, SeekFrom};

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8};
use thiserror::Error;

use super::model::{CellValue, Table, TableError};

// ---------------------------------------------------------------------------
// Search space: encodings × delimiters, in priority order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16,
    Latin1,
}

impl TextEncoding {
    /// Strictly decode `bytes`. `None` means the bytes are not valid in this
    /// encoding; nothing is ever replaced with U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Utf8 => {
                let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            TextEncoding::Utf16 => {
                // No BOM → little-endian.
                let (encoding, body) = match bytes {
                    [0xFF, 0xFE, rest @ ..] => (UTF_16LE, rest),
                    [0xFE, 0xFF, rest @ ..] => (UTF_16BE, rest),
                    _ => (UTF_16LE, bytes),
                };
                if body.len() % 2 != 0 {
                    return None;
                }
                encoding.decode_without_bom_handling_and_without_replacement(body)
            }
            TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Utf16 => write!(f, "UTF-16"),
            TextEncoding::Latin1 => write!(f, "Latin-1"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
            Delimiter::Semicolon => write!(f, "semicolon"),
        }
    }
}

/// One (encoding, delimiter) guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    pub encoding: TextEncoding,
    pub delimiter: Delimiter,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.encoding, self.delimiter)
    }
}

const fn attempt(encoding: TextEncoding, delimiter: Delimiter) -> Attempt {
    Attempt {
        encoding,
        delimiter,
    }
}

/// Encoding is the outer loop, delimiter the inner one.
pub const ATTEMPTS: [Attempt; 9] = [
    attempt(TextEncoding::Utf8, Delimiter::Comma),
    attempt(TextEncoding::Utf8, Delimiter::Tab),
    attempt(TextEncoding::Utf8, Delimiter::Semicolon),
    attempt(TextEncoding::Utf16, Delimiter::Comma),
    attempt(TextEncoding::Utf16, Delimiter::Tab),
    attempt(TextEncoding::Utf16, Delimiter::Semicolon),
    attempt(TextEncoding::Latin1, Delimiter::Comma),
    attempt(TextEncoding::Latin1, Delimiter::Tab),
    attempt(TextEncoding::Latin1, Delimiter::Semicolon),
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not parse the file after {attempts} attempts; please ensure it is a valid CSV or TSV")]
    Unparsable { attempts: usize },
    #[error("reading input")]
    Io(#[from] std::io::Error),
}

/// Why a single attempt was discarded. Only ever logged.
#[derive(Debug, Error)]
enum AttemptError {
    #[error("input is not valid {0}")]
    Decode(TextEncoding),
    #[error("tokenizing: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Shape(#[from] TableError),
    #[error("only {0} column(s)")]
    TooFewColumns(usize),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// A successfully ingested table and the guess that produced it.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub table: Table,
    pub attempt: Attempt,
}

/// A parse is only trusted when it yields more than one column; a wrong
/// delimiter typically collapses every line into a single field.
pub fn is_valid(table: &Table) -> bool {
    table.num_columns() > 1
}

/// Parse a delimited-text source of unknown encoding and delimiter.
///
/// Tries every entry of [`ATTEMPTS`] in order, rewinding `source` to its
/// start before each one, and returns the first table that passes
/// [`is_valid`]. Fails with [`IngestError::Unparsable`] when none does.
pub fn parse<R: Read + Seek>(source: &mut R) -> Result<Parsed, IngestError> {
    for attempt in ATTEMPTS {
        source.seek(SeekFrom::Start(0))?;
        let mut raw = Vec::new();
        source.read_to_end(&mut raw)?;

        match try_attempt(&raw, attempt) {
            Ok(table) => {
                log::info!(
                    "Parsed {} rows x {} columns as {attempt}",
                    table.len(),
                    table.num_columns()
                );
                return Ok(Parsed { table, attempt });
            }
            Err(e) => log::debug!("Attempt {attempt} rejected: {e}"),
        }
    }
    Err(IngestError::Unparsable {
        attempts: ATTEMPTS.len(),
    })
}

/// [`parse`] over an in-memory buffer.
pub fn parse_bytes(bytes: &[u8]) -> Result<Parsed, IngestError> {
    parse(&mut Cursor::new(bytes))
}

// ---------------------------------------------------------------------------
// Single attempt
// ---------------------------------------------------------------------------

fn try_attempt(raw: &[u8], attempt: Attempt) -> Result<Table, AttemptError> {
    let text = attempt
        .encoding
        .decode(raw)
        .ok_or(AttemptError::Decode(attempt.encoding))?;
    let table = split_delimited(&text, attempt.delimiter)?;
    if !is_valid(&table) {
        return Err(AttemptError::TooFewColumns(table.num_columns()));
    }
    Ok(table)
}

/// Header row first. Rows wider than the header fail; shorter rows are padded.
/// Fields are typed per column once every row is in.
fn split_delimited(text: &str, delimiter: Delimiter) -> Result<Table, AttemptError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(CellValue::raw).collect());
    }

    let mut table = Table::from_records(columns, records)?;
    table.infer_column_types();
    Ok(table)
}
