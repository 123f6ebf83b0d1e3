//! Shop Client - HTTP client for the storefront REST API
//!
//! Bearer-token HTTP transport, one service per REST resource and the
//! mappers that turn wire DTOs into view models.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod mapper;
pub mod services;
pub mod transport;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use transport::{ApiRequest, RequestBody, Transport, UploadFile};

// Re-export shared types for convenience
pub use shared::dto::{LoginResponse, UserInfo};
