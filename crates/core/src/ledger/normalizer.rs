//! Converts raw export rows into validated trade records.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::constants::ACTIVITY_DATE_FORMATS;

use super::csv_parser::parse_csv;
use super::ledger_errors::LedgerError;
use super::ledger_model::{RawTradeRow, TradeRecord, TradeSide};

type Result<T> = std::result::Result<T, LedgerError>;

/// Normalizes raw rows into trade records.
///
/// Each row failing validation is skipped silently (logged at debug); the
/// call fails only when the input is empty or every row is filtered out.
/// Only buy and sell rows are emitted -- other recognized transaction codes
/// belong to collaborators outside the accounting core.
pub fn normalize(rows: &[RawTradeRow]) -> Result<Vec<TradeRecord>> {
    if rows.is_empty() {
        return Err(LedgerError::EmptyInput);
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for (index, row) in rows.iter().enumerate() {
        match normalize_row(row, index) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(
            "Skipped {} of {} rows during ledger normalization",
            skipped,
            rows.len()
        );
    }
    if records.is_empty() {
        return Err(LedgerError::NoValidRecords {
            reason: format!("all {} rows were filtered out", rows.len()),
        });
    }
    Ok(records)
}

/// Parses export bytes and normalizes the result in one step.
pub fn normalize_csv(content: &[u8]) -> Result<Vec<TradeRecord>> {
    let parsed = parse_csv(content)?;
    for issue in &parsed.issues {
        debug!("CSV issue (row {:?}): {}", issue.row_index, issue.message);
    }

    let rows: Vec<RawTradeRow> = parsed
        .rows
        .iter()
        .map(|row| RawTradeRow::from_record(&parsed.headers, row))
        .collect();
    normalize(&rows)
}

fn normalize_row(row: &RawTradeRow, index: usize) -> Option<TradeRecord> {
    let instrument = match &row.instrument {
        Some(i) => i.as_str(),
        None => {
            debug!("Row {}: missing instrument, skipped", index);
            return None;
        }
    };
    let trans_code = match &row.trans_code {
        Some(c) => c.as_str(),
        None => {
            debug!("Row {}: missing transaction code, skipped", index);
            return None;
        }
    };

    let side = match TradeSide::from_trans_code(trans_code) {
        Some(side) => side,
        None => {
            debug!(
                "Row {}: unrecognized transaction code '{}', skipped",
                index, trans_code
            );
            return None;
        }
    };
    if !side.is_accounted() {
        debug!(
            "Row {}: side {:?} is outside the accounting core, skipped",
            index, side
        );
        return None;
    }

    let quantity = match row.quantity.as_deref().and_then(parse_quantity) {
        Some(q) if q > Decimal::ZERO => q,
        _ => {
            debug!("Row {}: missing or non-positive quantity, skipped", index);
            return None;
        }
    };

    let amount = match row.amount.as_deref() {
        None => Decimal::ZERO,
        Some(raw) => match parse_amount(raw) {
            Some(a) => a,
            None => {
                debug!("Row {}: unparseable amount '{}', skipped", index, raw);
                return None;
            }
        },
    };
    if amount.is_zero() {
        debug!("Row {}: zero amount, price cannot be derived, skipped", index);
        return None;
    }

    // The cash amount is authoritative over any quoted per-share price: it
    // captures the true economics of the fill. Buys arrive as negative cash
    // flow, sells as positive.
    let price = if side == TradeSide::Buy {
        amount.abs() / quantity
    } else {
        amount / quantity
    };
    if price <= Decimal::ZERO {
        debug!("Row {}: derived price {} not positive, skipped", index, price);
        return None;
    }

    let date = match row.activity_date.as_deref().and_then(parse_activity_date) {
        Some(d) => d,
        None => {
            debug!("Row {}: missing or unparseable activity date, skipped", index);
            return None;
        }
    };

    Some(TradeRecord {
        id: format!("{}-{}", instrument, index),
        symbol: instrument.to_string(),
        side,
        quantity: quantity.abs(),
        price,
        date,
        fees: Decimal::ZERO,
    })
}

/// Parses a quantity cell, tolerating stray quotes and whitespace.
fn parse_quantity(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '"' && *c != '\'')
        .collect();
    parse_decimal_tolerant(&cleaned)
}

/// Parses a cash amount cell: currency symbols and thousands separators are
/// stripped, and accounting-style parenthesis negation `(123.45)` maps to
/// `-123.45`.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let (body, negated) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (inner, true),
        None => (trimmed, false),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '"'))
        .collect();

    parse_decimal_tolerant(&cleaned).map(|value| if negated { -value } else { value })
}

/// Decimal parse with a scientific-notation fallback.
fn parse_decimal_tolerant(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

fn parse_activity_date(raw: &str) -> Option<NaiveDate> {
    ACTIVITY_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}
