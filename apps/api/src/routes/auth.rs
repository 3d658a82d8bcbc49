use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::{parse_id, AppError};
use crate::models::user::{LoginRequest, NewUser, User};
use crate::routes::{parse_body, AppJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let new_user: NewUser = parse_body(body)?;
    new_user.validate().map_err(AppError::Validation)?;
    let user = state.store.create_user(new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/auth/login
///
/// Plain credential comparison; no session or token is issued.
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<User>, AppError> {
    let req: LoginRequest = parse_body(body)?;
    let (Some(email), Some(password)) = (
        req.email.filter(|e| !e.is_empty()),
        req.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    };

    match state.store.get_user_by_email(&email).await {
        Some(user) if user.password == password => {
            info!("User {} logged in", user.id);
            Ok(Json(user))
        }
        _ => {
            warn!("Failed login attempt");
            Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ))
        }
    }
}

/// GET /api/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let id = parse_id(&id, "user")?;
    state
        .store
        .get_user(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
