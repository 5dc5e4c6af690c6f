use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finadvisor_core::domain::recommendation::ValidationError;
use finadvisor_core::relay::RelayError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// The body never made it to a `RecommendationRequest`.
    Payload { status: StatusCode, detail: String },
    Relay(RelayError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Payload { status, .. } => *status,
            ApiError::Relay(RelayError::Validation(ValidationError::EmptyItems)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Relay(RelayError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Relay(RelayError::BackendUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Relay(RelayError::BackendProtocol(_) | RelayError::Unexpected(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Payload { detail, .. } => detail.clone(),
            ApiError::Relay(err) => err.to_string(),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        ApiError::Relay(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Payload {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            if let ApiError::Relay(err) = &self {
                sentry::capture_error(err);
            }
            tracing::error!(%status, %detail, "recommendation request failed");
        } else {
            tracing::info!(%status, %detail, "recommendation request rejected");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}
