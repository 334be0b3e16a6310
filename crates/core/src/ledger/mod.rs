//! Ledger ingestion: CSV parsing, row normalization, canonical ordering.

mod csv_parser;
mod ledger_errors;
mod ledger_model;
mod normalizer;
mod ordering;


pub use csv_parser::{parse_csv, ParseIssue, ParsedCsv};
pub use ledger_errors::LedgerError;
pub use ledger_model::{RawTradeRow, TradeRecord, TradeSide};
pub use normalizer::{normalize, normalize_csv};
pub use ordering::sort_chronological;
