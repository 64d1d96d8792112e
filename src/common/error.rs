use axum::{
    BoxError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_valid::ValidationRejection;
use validator::ValidationErrors;

use crate::common::ApiResponse;

pub type BindResult<T> = Result<T, BindError>;

/// Why a body could not be bound.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The request carried no body at all.
    #[error("invalid request")]
    InvalidRequest,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The body decoded but the value failed its validation rules.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read request body: {0}")]
    Read(#[source] BoxError),

    #[error("request body exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unknown field `{0}`")]
    UnknownField(String),
}

impl From<axum_valid::ValidRejection<BindError>> for BindError {
    fn from(rejection: axum_valid::ValidRejection<BindError>) -> Self {
        match rejection {
            ValidationRejection::Valid(errors) => BindError::Validation(errors),
            ValidationRejection::Inner(error) => error,
        }
    }
}

impl BindError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BindError::InvalidRequest => StatusCode::INTERNAL_SERVER_ERROR,
            BindError::Decode(DecodeError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            BindError::Decode(_) | BindError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for BindError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = axum::Json(ApiResponse::<()>::err(
            status_code.as_u16(),
            self.to_string(),
        ));

        (status_code, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn decode_errors_keep_the_decoder_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = source.to_string();

        let err = BindError::from(DecodeError::from(source));

        assert_eq!(err.to_string(), expected);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            BindError::InvalidRequest.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            BindError::from(DecodeError::TooLarge { limit: 8 }).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            BindError::from(DecodeError::UnknownField("extra".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn valid_rejection_maps_to_validation() {
        let mut errors = ValidationErrors::new();
        errors.add("age", ValidationError::new("range"));

        let err = BindError::from(ValidationRejection::<_, BindError>::Valid(errors));
        assert!(matches!(err, BindError::Validation(_)));

        let err = BindError::from(ValidationRejection::<ValidationErrors, BindError>::Inner(
            BindError::InvalidRequest,
        ));
        assert!(matches!(err, BindError::InvalidRequest));
    }

    #[test]
    fn response_uses_status_and_envelope() {
        let response = BindError::InvalidRequest.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
