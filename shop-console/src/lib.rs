//! Storefront and admin console
//!
//! Local cart and session, the request status board, discount-aware
//! pricing, checkout and repair flows, and the dashboard helpers, driven
//! by the `shop` binary.

pub mod app;
pub mod board;
pub mod cart;
pub mod cli;
pub mod core;
pub mod error;
pub mod events;
pub mod flows;
pub mod pricing;
pub mod storage;
pub mod utils;

pub use app::App;
pub use crate::core::AppConfig;
pub use error::{AppError, AppResult};
pub use events::{AppEvent, EventBus, Notice, NoticeLevel};
