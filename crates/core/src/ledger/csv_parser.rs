//! CSV front door for brokerage exports.
//!
//! The export format is fixed enough that no parser configuration is
//! exposed; delimiter detection, BOM handling, and row-width normalization
//! are applied automatically. Structural oddities are collected as
//! [`ParseIssue`]s rather than aborting the parse.

use csv::ReaderBuilder;

use super::ledger_errors::LedgerError;

/// Outcome of parsing an export file.
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    /// Trimmed header names from the first row.
    pub headers: Vec<String>,
    /// Data rows, each normalized to the header width.
    pub rows: Vec<Vec<String>>,
    /// Non-fatal problems encountered while parsing.
    pub issues: Vec<ParseIssue>,
}

/// A non-fatal structural problem in the input file.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// Zero-based data row index, when the issue is row-specific.
    pub row_index: Option<usize>,
    pub message: String,
}

impl ParseIssue {
    fn new(row_index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            row_index,
            message: message.into(),
        }
    }
}

/// Parses raw export bytes into headers and data rows.
///
/// Fails only when the file yields no records at all; everything else is
/// reported through [`ParsedCsv::issues`].
pub fn parse_csv(content: &[u8]) -> Result<ParsedCsv, LedgerError> {
    let mut issues = Vec::new();

    let text = decode_utf8(content, &mut issues);
    let delimiter = detect_delimiter(&text);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records: Vec<Vec<String>> = Vec::new();
    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => records.push(record.iter().map(|s| s.to_string()).collect()),
            Err(e) => issues.push(ParseIssue::new(
                Some(index),
                format!("unreadable row: {}", e),
            )),
        }
    }

    // Drop fully blank rows before splitting off the header.
    records.retain(|row| !row.iter().all(|cell| cell.trim().is_empty()));
    if records.is_empty() {
        return Err(LedgerError::EmptyInput);
    }

    let mut records = records.into_iter();
    let headers: Vec<String> = records
        .next()
        .unwrap_or_default()
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let width = headers.len();

    let rows: Vec<Vec<String>> = records
        .enumerate()
        .map(|(index, mut row)| {
            if row.len() < width {
                row.resize(width, String::new());
            } else if row.len() > width {
                issues.push(ParseIssue::new(
                    Some(index),
                    format!(
                        "row has {} columns, expected {}; extra columns ignored",
                        row.len(),
                        width
                    ),
                ));
                row.truncate(width);
            }
            row
        })
        .collect();

    Ok(ParsedCsv {
        headers,
        rows,
        issues,
    })
}

/// Strips a UTF-8 BOM and decodes, falling back to lossy conversion.
fn decode_utf8(content: &[u8], issues: &mut Vec<ParseIssue>) -> String {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    match std::str::from_utf8(content) {
        Ok(s) => s.to_string(),
        Err(e) => {
            issues.push(ParseIssue::new(
                None,
                format!(
                    "invalid UTF-8 at byte {}; replaced offending characters",
                    e.valid_up_to()
                ),
            ));
            String::from_utf8_lossy(content).into_owned()
        }
    }
}

/// Picks the candidate delimiter with the most consistent column count
/// across the first lines of the file.
fn detect_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(10).collect();
    let mut best = (b',', 0usize);

    for candidate in [b',', b';', b'\t'] {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| line.matches(candidate as char).count())
            .collect();
        let Some(&first) = counts.first() else {
            continue;
        };
        if first == 0 {
            continue;
        }
        let consistent = counts.iter().filter(|&&c| c == first).count();
        let score = first * consistent;
        if score > best.1 {
            best = (candidate, score);
        }
    }

    best.0
}
