use crate::models::ErrorEnvelope;
use crate::services::ProviderError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Any failure on an `/api/*` route.
///
/// Always rendered as `{"success": false, "error": ...}` with status 500;
/// upstream errors are not classified into distinct status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The body was not a JSON object we could read.
    #[error("{0}")]
    InvalidBody(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::new(self.to_string())),
        )
            .into_response()
    }
}

/// `Json` extractor whose rejection is the failure envelope instead of axum's
/// plain-text 4xx. Only a JSON object is accepted as the body; arrays and
/// scalars are rejected before the fields are read.
pub struct EnvelopeJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for EnvelopeJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;

        if !body.is_object() {
            return Err(ApiError::InvalidBody(
                "Request body must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(body)
            .map(EnvelopeJson)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}
