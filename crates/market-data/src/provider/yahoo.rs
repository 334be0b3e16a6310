//! Yahoo Finance price provider.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::PriceQuote;

use super::traits::PriceProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Live price provider backed by the Yahoo Finance API.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("failed to initialize connector: {}", e),
            })?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| match e {
                yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => {
                    MarketDataError::NotFound(symbol.to_string())
                }
                other => MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: other.to_string(),
                },
            })?;

        let quote = response
            .last_quote()
            .map_err(|_| MarketDataError::NotFound(symbol.to_string()))?;

        let price = Decimal::from_f64_retain(quote.close).ok_or_else(|| {
            MarketDataError::InvalidData(format!(
                "close price {} for {} is not representable",
                quote.close, symbol
            ))
        })?;
        if price <= Decimal::ZERO {
            return Err(MarketDataError::InvalidData(format!(
                "non-positive close price for {}",
                symbol
            )));
        }

        Ok(PriceQuote {
            symbol: symbol.to_string(),
            price,
            fetched_at: Utc::now(),
        })
    }
}
