use super::{call_model, ApiError, EnvelopeJson};
use crate::models::envelope::now_timestamp;
use crate::models::{ChatRequest, ChatResponse, FieldValue};
use crate::services::sessions::DEFAULT_SESSION_ID;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// `POST /api/chat`: relay a message through the caller's session.
#[tracing::instrument(skip_all, fields(session_id = tracing::field::Empty))]
pub async fn chat(
    State(state): State<AppState>,
    EnvelopeJson(request): EnvelopeJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = FieldValue::or(request.message, "").to_string();
    let session_id = FieldValue::or(request.session_id, DEFAULT_SESSION_ID);

    tracing::Span::current().record("session_id", tracing::field::display(&session_id));
    let session_key = session_id.as_key().ok_or_else(|| {
        ApiError::InvalidBody("session_id must be a string, number or boolean".to_string())
    })?;
    let conversation = state.sessions.resolve(&session_key);

    let response = call_model(state.model.name(), "chat", conversation.send(&message)).await?;

    Ok(Json(ChatResponse {
        success: true,
        response,
        timestamp: now_timestamp(),
    }))
}
