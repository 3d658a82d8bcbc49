use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::errors::{parse_id, AppError};
use crate::models::application::{
    Application, ApplicationPatch, ApplicationWithJob, ApplicationWithStudent, NewApplication,
};
use crate::routes::{parse_body, AppJson};
use crate::state::AppState;

/// POST /api/applications
pub async fn handle_create_application(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let new_application: NewApplication = parse_body(body)?;
    let application = state.store.create_application(new_application).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/applications/student/:student_id
pub async fn handle_applications_by_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<ApplicationWithJob>>, AppError> {
    let student_id = parse_id(&student_id, "student")?;
    Ok(Json(state.store.applications_by_student(student_id).await))
}

/// GET /api/applications/job/:job_id
pub async fn handle_applications_by_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Vec<ApplicationWithStudent>>, AppError> {
    let job_id = parse_id(&job_id, "job")?;
    Ok(Json(state.store.applications_by_job(job_id).await))
}

/// PATCH /api/applications/:id
pub async fn handle_update_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<Application>, AppError> {
    let id = parse_id(&id, "application")?;
    let patch: ApplicationPatch = parse_body(body)?;
    state
        .store
        .update_application(id, patch)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))
}
