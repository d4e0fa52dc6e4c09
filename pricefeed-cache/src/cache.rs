//! Transparent price cache with a shared expiry epoch.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use pricefeed_core::error::{PriceError, Result};
use pricefeed_core::traits::PriceService;

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum age of the shared epoch in seconds
    pub max_age_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_seconds: 30,
        }
    }
}

/// Mutable cache state.
///
/// The entry map and the epoch are read and written together, so they live
/// under one lock: every check-then-act on either is a single critical
/// section.
struct CacheState {
    prices: HashMap<String, f64>,
    epoch_start: Instant,
}

struct CacheInner {
    service: Arc<dyn PriceService>,
    max_age: Duration,
    state: Mutex<CacheState>,
    hits: AtomicU64,
    misses: AtomicU64,
    epoch_resets: AtomicU64,
}

/// Transparent cache in front of a slow [`PriceService`].
///
/// Remembers every price it fetches and serves repeats from memory while the
/// shared epoch is younger than `max_age`. The cache is itself a
/// [`PriceService`], so it can sit anywhere the real service is expected.
///
/// # Expiry policy
///
/// Freshness is tracked by one epoch clock for the whole cache, not one
/// timestamp per entry. Whichever lookup first observes that the epoch has
/// lapsed resets it to "now" and refetches its own code; every *other*
/// cached key then counts as fresh again for a full `max_age` window, even
/// though only the one code was refetched. This shared-epoch policy is
/// deliberate; it is not a per-key TTL.
///
/// Entries are never evicted, only overwritten by a fresher value.
///
/// # Cloning
///
/// `TransparentCache` is a cheap handle; clones share the same entry map,
/// epoch, and counters.
#[derive(Clone)]
pub struct TransparentCache {
    inner: Arc<CacheInner>,
}

impl TransparentCache {
    /// Creates a cache over `service` whose entries expire together once the
    /// shared epoch is `max_age` old.
    pub fn new(service: Arc<dyn PriceService>, max_age: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                service,
                max_age,
                state: Mutex::new(CacheState {
                    prices: HashMap::new(),
                    epoch_start: Instant::now(),
                }),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
                epoch_resets: AtomicU64::new(0),
            }),
        }
    }

    /// Creates a cache from a [`CacheConfig`].
    pub fn with_config(service: Arc<dyn PriceService>, config: CacheConfig) -> Self {
        Self::new(service, Duration::from_secs(config.max_age_seconds))
    }

    /// Gets the price for an item, from the cache or from the service if the
    /// code was never fetched or the epoch has lapsed.
    ///
    /// Service failures are surfaced as [`PriceError::Service`]; the cache
    /// never substitutes stale or default data for a failed fetch.
    pub async fn price_for(&self, item_code: &str) -> Result<f64> {
        let cached = {
            let mut state = self.inner.state.lock();
            if state.epoch_start.elapsed() >= self.inner.max_age {
                // First lookup to see the lapsed epoch starts a new one.
                // This renews the freshness window of every cached key,
                // while only the present code gets refetched.
                state.epoch_start = Instant::now();
                self.inner.epoch_resets.fetch_add(1, Ordering::Relaxed);
                debug!(item_code, "epoch lapsed, starting a new one");
                None
            } else {
                state.prices.get(item_code).copied()
            }
        };

        if let Some(price) = cached {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            debug!(item_code, price, "cache hit");
            return Ok(price);
        }

        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        debug!(item_code, "cache miss, querying price service");

        // The slow call runs with the lock released.
        let price = self
            .inner
            .service
            .price_for(item_code)
            .await
            .map_err(|err| PriceError::Service {
                code: item_code.to_string(),
                reason: err.to_string(),
            })?;

        self.inner
            .state
            .lock()
            .prices
            .insert(item_code.to_string(), price);

        Ok(price)
    }

    /// Gets the prices for several items at once.
    ///
    /// One lookup task is spawned per input code; all of them run to
    /// completion even if one has already failed. On success the result
    /// holds exactly one price per input code, in task completion order —
    /// input order is NOT preserved. If any lookup fails, the whole call
    /// fails with the first error to complete; which error that is races
    /// across the concurrent tasks and is not deterministic.
    #[instrument(skip(self, item_codes), fields(count = item_codes.len()))]
    pub async fn prices_for(&self, item_codes: &[&str]) -> Result<Vec<f64>> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        for item_code in item_codes {
            let cache = self.clone();
            let item_code = item_code.to_string();
            let tx = tx.clone();
            tokio::spawn(async move {
                // Send only fails once the coordinator has given up, and the
                // coordinator waits for every sender.
                let _ = tx.send(cache.price_for(&item_code).await);
            });
        }
        // The coordinator's own sender must go before draining, or the
        // channel never closes.
        drop(tx);

        let mut prices = Vec::with_capacity(item_codes.len());
        let mut first_err = None;
        while let Some(result) = rx.recv().await {
            match result {
                Ok(price) => prices.push(price),
                Err(err) => {
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
            }
        }

        if let Some(err) = first_err {
            return Err(err);
        }
        if prices.len() != item_codes.len() {
            // A task died without reporting a result.
            return Err(PriceError::Task(format!(
                "expected {} results, received {}",
                item_codes.len(),
                prices.len()
            )));
        }

        debug!(count = prices.len(), "batch lookup complete");
        Ok(prices)
    }

    /// Returns the number of cached prices.
    pub fn len(&self) -> usize {
        self.inner.state.lock().prices.len()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().prices.is_empty()
    }

    /// Removes all cached prices.
    ///
    /// The epoch is left untouched; the next lookup for any code goes to the
    /// service simply because the map is empty.
    pub fn clear(&self) {
        self.inner.state.lock().prices.clear();
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            epoch_resets: self.inner.epoch_resets.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl PriceService for TransparentCache {
    async fn price_for(&self, item_code: &str) -> Result<f64> {
        TransparentCache::price_for(self, item_code).await
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Cached prices currently held
    pub entries: usize,
    /// Lookups answered from memory
    pub hits: u64,
    /// Lookups that went to the service
    pub misses: u64,
    /// Times a lookup observed a lapsed epoch and reset it
    pub epoch_resets: u64,
}
