//! Static reference-table price provider.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::PriceQuote;

use super::traits::PriceProvider;

const PROVIDER_ID: &str = "REFERENCE";

/// Fixed symbol/price table, used as the offline fallback when no live
/// source is reachable.
#[derive(Debug, Clone, Default)]
pub struct ReferencePriceProvider {
    prices: HashMap<String, Decimal>,
}

impl ReferencePriceProvider {
    pub fn new(prices: HashMap<String, Decimal>) -> Self {
        Self { prices }
    }

    pub fn insert(&mut self, symbol: impl Into<String>, price: Decimal) {
        self.prices.insert(symbol.into(), price);
    }
}

#[async_trait]
impl PriceProvider for ReferencePriceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
        match self.prices.get(symbol) {
            Some(price) => Ok(PriceQuote {
                symbol: symbol.to_string(),
                price: *price,
                fetched_at: Utc::now(),
            }),
            None => Err(MarketDataError::NotFound(symbol.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn returns_table_price() {
        let mut provider = ReferencePriceProvider::default();
        provider.insert("AAPL", dec!(185.50));

        let quote = provider.latest_price("AAPL").await.unwrap();
        assert_eq!(quote.price, dec!(185.50));
        assert_eq!(quote.symbol, "AAPL");
    }

    #[tokio::test]
    async fn unknown_symbol_is_not_found() {
        let provider = ReferencePriceProvider::default();
        let err = provider.latest_price("ZZZ").await.unwrap_err();
        assert!(matches!(err, MarketDataError::NotFound(s) if s == "ZZZ"));
    }
}
