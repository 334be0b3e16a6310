//! Price provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::PriceQuote;

/// A source of current market prices.
///
/// Implementations own their transport, authentication, and rate limiting.
/// Lookups for different symbols are independent and may be issued
/// concurrently.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Short identifier used in logs ("YAHOO", "REFERENCE", ...).
    fn id(&self) -> &'static str;

    /// Latest available price for `symbol`.
    async fn latest_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError>;
}
