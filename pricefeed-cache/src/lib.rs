//! # Pricefeed Cache
//!
//! Transparent, time-bounded memoization in front of a slow price service.
//!
//! ## Features
//!
//! - **Transparent**: the cache implements the same [`PriceService`] trait it
//!   wraps, so callers and other caches cannot tell it from the real service
//! - **Time-bounded**: one shared epoch clock bounds the age of every cached
//!   price; once it lapses, the next lookup refreshes from the service
//! - **Concurrent batches**: batch lookups fan out one task per item code and
//!   fail as a whole if any single lookup fails
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use pricefeed_cache::TransparentCache;
//! use pricefeed_source::StaticPriceSource;
//!
//! let source = Arc::new(StaticPriceSource::new());
//! source.set_price("SKU-1", 9.99);
//!
//! let cache = TransparentCache::new(source, Duration::from_secs(30));
//!
//! // First lookup hits the service, the second is served from memory.
//! let price = cache.price_for("SKU-1").await?;
//! let again = cache.price_for("SKU-1").await?;
//!
//! // Batch lookups run concurrently and are all-or-nothing.
//! let prices = cache.prices_for(&["SKU-1", "SKU-2"]).await?;
//! ```
//!
//! [`PriceService`]: pricefeed_core::PriceService

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{CacheConfig, CacheStats, TransparentCache};
