use thiserror::Error;

use crate::ledger::LedgerError;
use ledgerfolio_market_data::MarketDataError;

/// Result alias using the crate's root error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the trade-accounting core.
///
/// Only ledger-level failures (empty input, nothing survived filtering) are
/// produced by the pipeline itself; market data errors surface only when a
/// caller constructs a provider and wants a single error type to `?` into.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}
