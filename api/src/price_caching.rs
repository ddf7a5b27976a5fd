//! Handles the caching logic for external price provider data.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use tokio::sync::RwLock;
use web_time::Instant;

use crate::price_map::PriceMap;
use crate::price_providers::PriceProvider;
use crate::readers::PriceOracle;
use crate::ApiError;

#[derive(Clone, Debug)]
struct CachedPrices {
    price_map: PriceMap,
    last_fetched: Instant,
}

/// A [`PriceOracle`] that only calls its provider when the cached quote for a
/// symbol is missing or older than `ttl`.
pub struct CachedPriceOracle<P> {
    provider: P,
    ttl: Duration,
    coin_ids: HashMap<String, String>,
    cache: RwLock<HashMap<String, CachedPrices>>,
}

impl<P: PriceProvider> CachedPriceOracle<P> {
    pub fn new(provider: P, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            coin_ids: HashMap::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Maps a token symbol to the provider's coin id.
    pub fn with_coin(mut self, symbol: impl Into<String>, coin_id: impl Into<String>) -> Self {
        self.coin_ids.insert(symbol.into(), coin_id.into());
        self
    }

    fn fresh(&self, cached: Option<&CachedPrices>) -> Option<PriceMap> {
        cached
            .filter(|c| c.last_fetched.elapsed() < self.ttl)
            .map(|c| c.price_map.clone())
    }

    async fn cached_prices(&self, symbol: &str) -> Result<PriceMap, ApiError> {
        let coin_id = self
            .coin_ids
            .get(symbol)
            .ok_or_else(|| anyhow::anyhow!("no price feed configured for {}", symbol))?;

        // Serve a fresh entry under the read lock.
        if let Some(prices) = self.fresh(self.cache.read().await.get(symbol)) {
            return Ok(prices);
        }

        let mut cache = self.cache.write().await;

        // Another task may have refreshed while we waited for the write lock.
        if let Some(prices) = self.fresh(cache.get(symbol)) {
            return Ok(prices);
        }

        let price_map = self.provider.get_prices(coin_id).await?;
        dioxus_logger::tracing::debug!("refreshed {} prices ({} currencies)", symbol, price_map.len());

        cache.insert(
            symbol.to_string(),
            CachedPrices {
                price_map: price_map.clone(),
                last_fetched: Instant::now(),
            },
        );
        Ok(price_map)
    }
}

impl<P: PriceProvider> PriceOracle for CachedPriceOracle<P> {
    fn price<'a>(&'a self, symbol: &'a str) -> LocalBoxFuture<'a, Result<PriceMap, ApiError>> {
        Box::pin(self.cached_prices(symbol))
    }
}
