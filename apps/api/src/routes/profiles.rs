use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::errors::{parse_id, AppError};
use crate::models::profile::{
    EmployerProfile, EmployerProfilePatch, NewEmployerProfile, NewStudentProfile,
    StudentProfile, StudentProfilePatch,
};
use crate::routes::{parse_body, AppJson};
use crate::state::AppState;

/// POST /api/student-profiles
pub async fn handle_create_student_profile(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<StudentProfile>), AppError> {
    let new_profile: NewStudentProfile = parse_body(body)?;
    let profile = state.store.create_student_profile(new_profile).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/student-profiles/user/:user_id
pub async fn handle_get_student_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<StudentProfile>, AppError> {
    let user_id = parse_id(&user_id, "user")?;
    state
        .store
        .get_student_profile_by_user_id(user_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Student profile not found".to_string()))
}

/// PATCH /api/student-profiles/:id
pub async fn handle_update_student_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<StudentProfile>, AppError> {
    let id = parse_id(&id, "profile")?;
    let patch: StudentProfilePatch = parse_body(body)?;
    state
        .store
        .update_student_profile(id, patch)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Student profile not found".to_string()))
}

/// POST /api/employer-profiles
pub async fn handle_create_employer_profile(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<EmployerProfile>), AppError> {
    let new_profile: NewEmployerProfile = parse_body(body)?;
    if new_profile.company_name.trim().is_empty() {
        return Err(AppError::Validation(
            "companyName must not be empty".to_string(),
        ));
    }
    let profile = state.store.create_employer_profile(new_profile).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/employer-profiles/user/:user_id
pub async fn handle_get_employer_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<EmployerProfile>, AppError> {
    let user_id = parse_id(&user_id, "user")?;
    state
        .store
        .get_employer_profile_by_user_id(user_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Employer profile not found".to_string()))
}

/// PATCH /api/employer-profiles/:id
pub async fn handle_update_employer_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<EmployerProfile>, AppError> {
    let id = parse_id(&id, "profile")?;
    let patch: EmployerProfilePatch = parse_body(body)?;
    state
        .store
        .update_employer_profile(id, patch)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Employer profile not found".to_string()))
}
