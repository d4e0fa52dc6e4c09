//! # Pricefeed Core
//!
//! Core errors and traits shared by the pricefeed crates.
//!
//! This crate provides the foundational building blocks used by the cache and
//! the price sources:
//!
//! - **Errors**: the [`PriceError`] hierarchy with context
//! - **Traits**: the [`PriceService`] boundary behind which slow lookups live
//!
//! ## Example
//!
//! ```rust
//! use pricefeed_core::{PriceError, Result};
//!
//! fn check(code: &str) -> Result<()> {
//!     if code.is_empty() {
//!         return Err(PriceError::UnknownItemCode(code.to_string()));
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod error;
pub mod traits;

// Re-export commonly used items at crate root
pub use error::{PriceError, Result};
pub use traits::*;
