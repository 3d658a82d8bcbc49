use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::errors::{parse_id, AppError};
use crate::models::message::{Message, NewMessage};
use crate::routes::{parse_body, AppJson};
use crate::state::AppState;

/// POST /api/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let new_message: NewMessage = parse_body(body)?;
    let message = state.store.create_message(new_message).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/messages/:id/:other_id
pub async fn handle_conversation(
    State(state): State<AppState>,
    Path((user_a, user_b)): Path<(String, String)>,
) -> Result<Json<Vec<Message>>, AppError> {
    let user_a = parse_id(&user_a, "user")?;
    let user_b = parse_id(&user_b, "user")?;
    Ok(Json(state.store.messages_between(user_a, user_b).await))
}

/// GET /api/messages/unread/:user_id
pub async fn handle_unread_count(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let user_id = parse_id(&user_id, "user")?;
    let count = state.store.unread_count(user_id).await;
    Ok(Json(json!({ "count": count })))
}

/// PATCH /api/messages/:id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id, "message")?;
    if state.store.mark_message_read(id).await {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound("Message not found".to_string()))
    }
}
