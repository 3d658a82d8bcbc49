use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::errors::{parse_id, AppError};
use crate::models::job::{Job, JobPatch, JobSearch, NewJob};
use crate::routes::{parse_body, AppJson, AppQuery};
use crate::state::AppState;

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let new_job: NewJob = parse_body(body)?;
    let job = state.store.create_job(new_job).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.store.active_jobs().await)
}

/// GET /api/jobs/search
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    AppQuery(search): AppQuery<JobSearch>,
) -> Json<Vec<Job>> {
    Json(state.store.search_jobs(&search).await)
}

/// GET /api/jobs/employer/:employer_id
pub async fn handle_jobs_by_employer(
    State(state): State<AppState>,
    Path(employer_id): Path<String>,
) -> Result<Json<Vec<Job>>, AppError> {
    let employer_id = parse_id(&employer_id, "employer")?;
    Ok(Json(state.store.jobs_by_employer(employer_id).await))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    let id = parse_id(&id, "job")?;
    state
        .store
        .get_job(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

/// PATCH /api/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<Job>, AppError> {
    let id = parse_id(&id, "job")?;
    let patch: JobPatch = parse_body(body)?;
    state
        .store
        .update_job(id, patch)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

/// DELETE /api/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "job")?;
    if state.store.delete_job(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Job not found".to_string()))
    }
}
