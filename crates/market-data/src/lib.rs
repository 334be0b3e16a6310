//! Ledgerfolio Market Data Crate
//!
//! Price collaborator for the trade-accounting core. The core never talks
//! to a market data source directly; it receives a [`PriceProvider`] and
//! treats every lookup failure as "price unavailable".
//!
//! # Overview
//!
//! - [`PriceProvider`] - trait implemented by every price source
//! - [`YahooProvider`] - live quotes through the Yahoo Finance API
//! - [`ReferencePriceProvider`] - static symbol/price table for offline use
//! - [`CachedPriceService`] - wraps a provider with a freshness-windowed
//!   cache, a per-lookup timeout, and an optional fallback source
//!
//! Lookup order inside [`CachedPriceService`]: fresh cache entry, then the
//! live provider, then a stale cache entry, then the fallback table.

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;

pub use cache::{CachedPriceService, PriceCacheConfig};
pub use errors::MarketDataError;
pub use models::PriceQuote;
pub use provider::{PriceProvider, ReferencePriceProvider, YahooProvider};
