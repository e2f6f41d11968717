use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failures raised by a [`crate::store::CalorieStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document store could not be reached.
    #[error("document store unreachable: {0}")]
    Connection(String),

    /// An insert or aggregate call failed.
    #[error("store operation failed: {0}")]
    Operation(#[from] mongodb::error::Error),

    /// A stored document is missing fields or has unexpected types.
    #[error("malformed document: {0}")]
    Decode(#[from] mongodb::bson::de::Error),
}

/// Error returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => {
                warn!(error = %msg, "request rejected");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::Store(e) => {
                error!(error = %e, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
