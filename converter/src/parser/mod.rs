//! Category source reading.
//!
//! Decodes a CSV file (UTF-8, or a detected legacy encoding) and turns each
//! data row into a map from header label to cell text. Purely structural: no
//! cell is validated here, so a row of empty cells such as `,,,` still comes
//! through and is reported downstream.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::api::logs::log_warning;
use crate::error::{SourceError, SourceResult};

/// One data row: header label -> trimmed cell text.
///
/// Cells missing from a short row are absent rather than empty.
pub type Row = HashMap<String, String>;

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Data rows in source order, empty lines excluded
    pub rows: Vec<Row>,
    /// Encoding the bytes were decoded with
    pub encoding: String,
    /// Header labels as they appear in the file
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to text, returning the text and the encoding used.
///
/// Valid UTF-8 wins outright (a leading BOM is dropped). Anything else goes
/// through detection, falling back to Windows-1252. `Err` carries the name of
/// the encoding that failed.
pub fn decode_content(bytes: &[u8]) -> Result<(String, &'static str), String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        return Ok((text.to_string(), "UTF-8"));
    }

    let label = detect_encoding(bytes);
    let encoding = Encoding::for_label(label.as_bytes())
        .filter(|e| *e != UTF_8)
        .unwrap_or(WINDOWS_1252);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(used.name().to_string());
    }
    Ok((text.into_owned(), used.name()))
}

/// Parse CSV text from a reader into rows.
///
/// The first record is the header. Rows may be shorter or longer than the
/// header; extra cells are dropped. Empty and whitespace-only lines are
/// skipped, but a line with delimiters is a row even if every cell is empty.
pub fn parse_csv<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Row>), csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if is_empty_line(&record) {
            continue;
        }

        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(label, cell)| (label.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    Ok((headers, rows))
}

/// A whitespace-only line parses as one empty cell once trimmed.
fn is_empty_line(record: &csv::StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(str::is_empty)
}

/// Decode and parse CSV bytes. `origin` is only used in error messages.
pub fn parse_bytes(bytes: &[u8], origin: &Path) -> SourceResult<ParseResult> {
    let (text, encoding) = decode_content(bytes).map_err(|encoding| SourceError::Encoding {
        path: origin.to_path_buf(),
        encoding,
    })?;

    let (headers, rows) = parse_csv(text.as_bytes())?;

    Ok(ParseResult {
        rows,
        encoding: encoding.to_string(),
        headers,
    })
}

/// Read and parse a CSV file. A missing file is an error here.
pub fn parse_csv_file(path: &Path) -> SourceResult<ParseResult> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(&bytes, path)
}

/// Read one category source.
///
/// A missing file is tolerated: a warning is logged and no rows are returned.
pub fn read_category(path: &Path) -> SourceResult<Vec<Row>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(parse_bytes(&bytes, path)?.rows),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let file = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            log_warning(format!("Warning: {} not found at {}", file, path.display()));
            Ok(Vec::new())
        }
        Err(source) => Err(SourceError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
