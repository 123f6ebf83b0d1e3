//! Process-level plumbing: configuration and logging

pub mod config;
pub mod logger;

pub use config::AppConfig;
