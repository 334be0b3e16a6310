//! Caching price service with freshness window, timeout, and fallback.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use tokio::sync::RwLock;
use tokio::time::timeout;

use crate::errors::MarketDataError;
use crate::models::PriceQuote;
use crate::provider::PriceProvider;

/// Configuration for [`CachedPriceService`].
#[derive(Debug, Clone)]
pub struct PriceCacheConfig {
    /// How long a cached quote stays fresh.
    pub freshness: Duration,
    /// Per-symbol lookup timeout against the wrapped provider.
    pub lookup_timeout: Duration,
}

impl Default for PriceCacheConfig {
    fn default() -> Self {
        Self {
            freshness: Duration::from_secs(5 * 60),
            lookup_timeout: Duration::from_secs(10),
        }
    }
}

/// Wraps a [`PriceProvider`] with a per-symbol cache.
///
/// Lookup order: fresh cache entry, live provider (bounded by
/// `lookup_timeout`), stale cache entry, fallback provider. The original
/// provider error is returned only when every tier comes up empty.
pub struct CachedPriceService {
    provider: Arc<dyn PriceProvider>,
    fallback: Option<Arc<dyn PriceProvider>>,
    config: PriceCacheConfig,
    cache: RwLock<HashMap<String, PriceQuote>>,
}

impl CachedPriceService {
    pub fn new(provider: Arc<dyn PriceProvider>, config: PriceCacheConfig) -> Self {
        Self {
            provider,
            fallback: None,
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a last-resort provider consulted after the cache, typically a
    /// [`ReferencePriceProvider`](crate::provider::ReferencePriceProvider).
    pub fn with_fallback(mut self, fallback: Arc<dyn PriceProvider>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    fn is_fresh(&self, quote: &PriceQuote) -> bool {
        Utc::now()
            .signed_duration_since(quote.fetched_at)
            .to_std()
            .map(|age| age < self.config.freshness)
            .unwrap_or(true)
    }
}

#[async_trait]
impl PriceProvider for CachedPriceService {
    fn id(&self) -> &'static str {
        "CACHED"
    }

    async fn latest_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
        if let Some(quote) = self.cache.read().await.get(symbol) {
            if self.is_fresh(quote) {
                return Ok(quote.clone());
            }
        }

        let provider_err =
            match timeout(self.config.lookup_timeout, self.provider.latest_price(symbol)).await {
                Ok(Ok(quote)) => {
                    self.cache
                        .write()
                        .await
                        .insert(symbol.to_string(), quote.clone());
                    return Ok(quote);
                }
                Ok(Err(e)) => e,
                Err(_) => MarketDataError::Timeout {
                    provider: self.provider.id().to_string(),
                },
            };
        warn!(
            "Provider {} lookup failed for {}: {}",
            self.provider.id(),
            symbol,
            provider_err
        );

        if let Some(quote) = self.cache.read().await.get(symbol) {
            debug!("Serving stale cached quote for {}", symbol);
            return Ok(quote.clone());
        }
        if let Some(fallback) = &self.fallback {
            return fallback.latest_price(symbol).await;
        }
        Err(provider_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that replays a fixed script of responses and counts calls.
    struct ScriptedProvider {
        script: Vec<Result<PriceQuote, MarketDataError>>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(script: Vec<Result<PriceQuote, MarketDataError>>) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PriceProvider for ScriptedProvider {
        fn id(&self) -> &'static str {
            "SCRIPTED"
        }

        async fn latest_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script.get(call) {
                Some(Ok(quote)) => Ok(quote.clone()),
                Some(Err(MarketDataError::NotFound(_))) | None => {
                    Err(MarketDataError::NotFound(symbol.to_string()))
                }
                Some(Err(e)) => Err(MarketDataError::ProviderError {
                    provider: "SCRIPTED".to_string(),
                    message: e.to_string(),
                }),
            }
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl PriceProvider for SlowProvider {
        fn id(&self) -> &'static str {
            "SLOW"
        }

        async fn latest_price(&self, symbol: &str) -> Result<PriceQuote, MarketDataError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(PriceQuote::new(symbol, dec!(1)))
        }
    }

    fn quote(symbol: &str, price: Decimal) -> PriceQuote {
        PriceQuote::new(symbol, price)
    }

    fn stale_quote(symbol: &str, price: Decimal) -> PriceQuote {
        let mut q = PriceQuote::new(symbol, price);
        q.fetched_at = Utc::now() - ChronoDuration::minutes(30);
        q
    }

    #[tokio::test]
    async fn fresh_cache_entry_skips_provider() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(quote("MSFT", dec!(410)))]));
        let service = CachedPriceService::new(provider.clone(), PriceCacheConfig::default());

        let first = service.latest_price("MSFT").await.unwrap();
        let second = service.latest_price("MSFT").await.unwrap();

        assert_eq!(first.price, dec!(410));
        assert_eq!(second.price, dec!(410));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn stale_entry_served_when_provider_fails() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(stale_quote("MSFT", dec!(400))),
            Err(MarketDataError::NotFound("MSFT".to_string())),
        ]));
        let service = CachedPriceService::new(provider.clone(), PriceCacheConfig::default());

        // First call populates the cache with an already-stale observation.
        service.latest_price("MSFT").await.unwrap();
        let second = service.latest_price("MSFT").await.unwrap();

        assert_eq!(second.price, dec!(400));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn fallback_consulted_after_provider_and_cache() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let mut table = crate::provider::ReferencePriceProvider::default();
        table.insert("GLD", dec!(21.30));

        let service = CachedPriceService::new(provider, PriceCacheConfig::default())
            .with_fallback(Arc::new(table));

        let result = service.latest_price("GLD").await.unwrap();
        assert_eq!(result.price, dec!(21.30));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let config = PriceCacheConfig {
            lookup_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let service = CachedPriceService::new(Arc::new(SlowProvider), config);

        let err = service.latest_price("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::Timeout { .. }));
    }

    #[tokio::test]
    async fn provider_error_propagates_when_nothing_else_matches() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let service = CachedPriceService::new(provider, PriceCacheConfig::default());

        let err = service.latest_price("NVDA").await.unwrap_err();
        assert!(matches!(err, MarketDataError::NotFound(_)));
    }
}
