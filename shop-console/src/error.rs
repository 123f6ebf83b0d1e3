//! Console error type

use shared::models::RequestStatus;
use shared::validation::ValidationError;
use shop_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: i64,
        from: RequestStatus,
        to: RequestStatus,
    },

    #[error("Request {0} is not on this board")]
    RequestNotFound(i64),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Not logged in")]
    NotLoggedIn,
}

pub type AppResult<T> = Result<T, AppError>;
