//! View models
//!
//! Typed shapes the client works with after mapping from `crate::dto`.
//! IDs are `i64`, money is `Decimal` in whole đồng, timestamps are UTC.

pub mod cart;
pub mod category;
pub mod content;
pub mod discount;
pub mod product;
pub mod request;
pub mod review;
pub mod service;
pub mod stats;

// Re-exports
pub use cart::*;
pub use category::*;
pub use content::*;
pub use discount::*;
pub use product::*;
pub use request::*;
pub use review::*;
pub use service::*;
pub use stats::*;
