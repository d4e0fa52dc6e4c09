//! In-memory price source.
//!
//! Backed by a static price table. Suitable for development, testing,
//! and single-process deployments.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use pricefeed_core::error::{PriceError, Result};
use pricefeed_core::traits::PriceService;

/// In-memory price source with a fixed price table.
///
/// Lookups of codes present in the table succeed; unknown codes fail with
/// [`PriceError::UnknownItemCode`]. An optional simulated latency makes the
/// source behave like the slow remote service it stands in for.
///
/// # Call accounting
///
/// Every lookup is counted, per code and in total, so callers sitting in
/// front of this source (the transparent cache in particular) can verify
/// exactly when they went to the service and when they did not.
///
/// # Thread Safety
///
/// All operations are thread-safe and can be called concurrently.
#[derive(Debug, Default)]
pub struct StaticPriceSource {
    /// Price table: item code → price
    prices: DashMap<String, f64>,
    /// Per-code lookup counts
    calls: DashMap<String, u64>,
    /// Total lookup count
    total_calls: AtomicU64,
    /// Simulated latency applied to every lookup
    latency: Option<Duration>,
}

impl StaticPriceSource {
    /// Creates a new empty price source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source that sleeps for `latency` on every lookup.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Sets the price for an item code, overwriting any existing one.
    pub fn set_price(&self, item_code: &str, price: f64) {
        self.prices.insert(item_code.to_string(), price);
    }

    /// Removes an item code from the table.
    ///
    /// Subsequent lookups for the code will fail, which makes this the
    /// simplest way to inject failures into tests.
    pub fn remove_price(&self, item_code: &str) {
        self.prices.remove(item_code);
    }

    /// Returns the number of item codes in the table.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Returns how many lookups were made for the given item code.
    pub fn calls_for(&self, item_code: &str) -> u64 {
        self.calls.get(item_code).map(|c| *c.value()).unwrap_or(0)
    }

    /// Returns the total number of lookups made against this source.
    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceService for StaticPriceSource {
    async fn price_for(&self, item_code: &str) -> Result<f64> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        self.calls
            .entry(item_code.to_string())
            .and_modify(|c| *c += 1)
            .or_insert(1);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.prices.get(item_code) {
            Some(entry) => {
                let price = *entry.value();
                debug!(item_code, price, "price lookup");
                Ok(price)
            }
            None => {
                debug!(item_code, "price lookup for unknown code");
                Err(PriceError::UnknownItemCode(item_code.to_string()))
            }
        }
    }
}
