//! In-memory price sources for pricefeed.
//!
//! Fast, thread-safe [`PriceService`](pricefeed_core::PriceService)
//! implementations suitable for development, testing, and single-process
//! deployments.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;

pub use memory::StaticPriceSource;
