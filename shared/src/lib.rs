//! Shared types for the storefront workspace
//!
//! Wire DTOs as the backend sends them, the typed view models the
//! client works with, pagination and input validation helpers.

pub mod dto;
pub mod models;
pub mod response;
pub mod validation;

// Re-exports
pub use response::{Page, Pagination};
pub use serde::{Deserialize, Serialize};
pub use validation::ValidationError;
