use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Device not found: {0}")]
    DeviceNotFound(Uuid),

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Prediction timed out")]
    PredictionTimeout,

    #[error("Prediction process failed: {0}")]
    PredictionProcess(String),

    #[error("Prediction output invalid: {0}")]
    PredictionParse(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Storage temporarily unavailable".to_string(),
                )
            }
            // Inbound body errors are rejected by the Json extractor before
            // reaching here; this variant only arises from server-side
            // encoding, so it is never the client's fault.
            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::DeviceNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Device not found: {}", id))
            }
            AppError::InvalidMeasurement(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Validation(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PredictionTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Prediction timed out".to_string(),
            ),
            AppError::PredictionProcess(ref msg) => {
                tracing::error!("Prediction process failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Prediction process failed: {}", msg),
                )
            }
            AppError::PredictionParse(ref msg) => {
                tracing::error!("Prediction output invalid: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Prediction produced an invalid result".to_string(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn serialization_failures_are_server_side() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            status_of(AppError::Serialization(err)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_failures_are_client_side() {
        assert_eq!(
            status_of(AppError::InvalidMeasurement("negative wattage".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Validation("bad input".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_device_is_not_found() {
        assert_eq!(
            status_of(AppError::DeviceNotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn prediction_errors_map_to_gateway_statuses() {
        assert_eq!(
            status_of(AppError::PredictionTimeout),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_of(AppError::PredictionProcess("exit status 3".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::PredictionParse("not json".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }
}
