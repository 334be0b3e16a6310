//! Ledgerfolio Core - trade accounting from brokerage exports.
//!
//! This crate derives portfolio accounting state from a raw transaction
//! export: realized gains from closed positions (FIFO lot matching) and
//! unrealized gains from open positions (weighted-average cost against the
//! current market price).
//!
//! The pipeline is pure, synchronous, in-memory computation:
//!
//! ```text
//! raw CSV rows
//!     -> ledger::normalize      (validated TradeRecords)
//!     -> ledger::sort_chronological
//!     -> matching::match_fifo   (realized TradePairs, private lot copy)
//!     -> positions::accumulate  (open Positions, independent copy)
//!     -> valuation::enrich_positions + valuation::summarize
//! ```
//!
//! The only asynchronous boundary is price enrichment, which goes through
//! the `ledgerfolio-market-data` collaborator and degrades to unvalued
//! positions when a price cannot be fetched.

pub mod constants;
pub mod errors;
pub mod ledger;
pub mod matching;
pub mod positions;
pub mod valuation;

pub use errors::{Error, Result};
pub use ledger::{
    normalize, normalize_csv, sort_chronological, LedgerError, RawTradeRow, TradeRecord, TradeSide,
};
pub use matching::{match_fifo, TradePair, VirtualBuy};
pub use positions::{accumulate, Position};
pub use valuation::{enrich_positions, summarize, PortfolioSummary};
