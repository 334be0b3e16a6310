//! Data models shared by price providers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time price observation for one symbol.
///
/// `fetched_at` records when the observation was made, not the market
/// timestamp of the underlying quote; the cache uses it to decide freshness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub symbol: String,
    pub price: Decimal,
    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(symbol: impl Into<String>, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            fetched_at: Utc::now(),
        }
    }
}
