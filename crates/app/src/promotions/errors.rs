//! Promotions service errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::ApiError;

/// Errors returned by promotion operations.
#[derive(Debug, Error)]
pub enum PromotionsServiceError {
    #[error("promotion not found")]
    NotFound,

    #[error("promotion rejected: {0}")]
    Rejected(String),

    #[error("not authorised: {0}")]
    Unauthorized(String),

    #[error("marketplace API error")]
    Api(#[source] ApiError),
}

impl From<ApiError> for PromotionsServiceError {
    fn from(error: ApiError) -> Self {
        let ApiError::Status { status, message } = &error else {
            return Self::Api(error);
        };

        match *status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Rejected(message.clone())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::Unauthorized(message.clone())
            }
            _ => Self::Api(error),
        }
    }
}
