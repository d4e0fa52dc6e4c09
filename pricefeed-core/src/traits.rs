//! Common traits for pricefeed.
//!
//! These traits define the interfaces that different implementations can
//! satisfy, enabling modularity and testing.

use async_trait::async_trait;

use crate::error::Result;

/// Interface for looking up the price of an item.
///
/// Calls are expensive (latency-bound) and safe to invoke concurrently.
/// Implementations might be:
/// - A remote pricing service (HTTP, gRPC)
/// - An in-memory table (for testing/development)
///
/// The cache treats this as an opaque collaborator: it never assumes
/// anything about latency beyond "slow, bounded eventually", and it
/// surfaces failures instead of masking them with stale data.
#[async_trait]
pub trait PriceService: Send + Sync {
    /// Returns the current price for the given item code.
    ///
    /// Fails if the service cannot produce a price for the code; the
    /// failure reason is propagated to the caller.
    async fn price_for(&self, item_code: &str) -> Result<f64>;
}
