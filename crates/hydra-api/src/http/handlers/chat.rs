//! Chat and history endpoints.
//!
//! `POST /chat` accepts a multipart form with `message` (text), `image`
//! (chart file), and an optional `session_id`; when the client has no
//! session yet the server mints a UUIDv7 identifier and returns it so the
//! client can continue the conversation.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::AppError;
use crate::state::AppState;

/// Success body for `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
}

/// Request body for `POST /clear_history`.
#[derive(Debug, Deserialize)]
pub struct ClearHistoryRequest {
    pub session_id: String,
}

/// Success body for `POST /clear_history`.
#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub message: String,
}

/// POST /chat -- one conversational turn, with or without a chart image.
pub async fn chat(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ChatResponse>, AppError> {
    let mut message = String::new();
    let mut image: Option<Vec<u8>> = None;
    let mut session_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("message") => {
                message = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable message field: {e}")))?;
            }
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable image field: {e}")))?;
                if !bytes.is_empty() {
                    image = Some(bytes.to_vec());
                }
            }
            Some("session_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable session_id: {e}")))?;
                if !value.is_empty() {
                    session_id = Some(value);
                }
            }
            _ => {}
        }
    }

    validate_input(&message, image.as_deref())?;

    let session_id = session_id.unwrap_or_else(|| Uuid::now_v7().to_string());

    let response = state
        .engine
        .handle_turn(&session_id, &message, image.as_deref())
        .await?;

    Ok(Json(ChatResponse {
        session_id,
        response,
    }))
}

/// Reject a turn carrying neither text nor an image.
///
/// Runs before the pipeline: a rejected request never touches session
/// history.
fn validate_input(message: &str, image: Option<&[u8]>) -> Result<(), AppError> {
    if message.is_empty() && image.is_none() {
        return Err(AppError::Validation(
            "No message or image provided".to_string(),
        ));
    }
    Ok(())
}

/// POST /clear_history -- empty a session's conversation history.
pub async fn clear_history(
    State(state): State<AppState>,
    Json(body): Json<ClearHistoryRequest>,
) -> Result<Json<ClearHistoryResponse>, AppError> {
    state.engine.clear_history(&body.session_id).await?;
    Ok(Json(ClearHistoryResponse {
        success: true,
        message: "Conversation history cleared".to_string(),
    }))
}
