use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{parse_id, AppError};
use crate::models::learning::{LearningResource, NewLearningResource, SkillGapAnalysis};
use crate::routes::{parse_body, AppJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    pub results: Option<Value>,
}

/// GET /api/skill-gap/:student_id
pub async fn handle_get_skill_gap(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<SkillGapAnalysis>, AppError> {
    let student_id = parse_id(&student_id, "student")?;
    state
        .store
        .skill_gap_for_student(student_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Skill gap analysis not found".to_string()))
}

/// POST /api/skill-gap/:student_id
pub async fn handle_create_skill_gap(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<SkillGapAnalysis>, AppError> {
    let student_id = parse_id(&student_id, "student")?;
    let req: SkillGapRequest = parse_body(body)?;
    let results = req
        .results
        .filter(|r| !r.is_null())
        .ok_or_else(|| AppError::Validation("results are required".to_string()))?;
    let analysis = state.store.create_skill_gap(student_id, results).await?;
    Ok(Json(analysis))
}

/// GET /api/learning-resources
pub async fn handle_list_resources(State(state): State<AppState>) -> Json<Vec<LearningResource>> {
    Json(state.store.all_learning_resources().await)
}

/// POST /api/learning-resources
pub async fn handle_create_resource(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<LearningResource>), AppError> {
    let resource: NewLearningResource = parse_body(body)?;
    let resource = state.store.create_learning_resource(resource).await;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// GET /api/learning-resources/skill/:skill_tag
pub async fn handle_resources_by_skill(
    State(state): State<AppState>,
    Path(skill_tag): Path<String>,
) -> Result<Json<Vec<LearningResource>>, AppError> {
    if skill_tag.trim().is_empty() {
        return Err(AppError::Validation("Skill tag is required".to_string()));
    }
    Ok(Json(state.store.learning_resources_by_skill(&skill_tag).await))
}

/// GET /api/learning-resources/recommended/:student_id
pub async fn handle_recommended_resources(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<LearningResource>>, AppError> {
    let student_id = parse_id(&student_id, "student")?;
    Ok(Json(state.store.recommended_resources(student_id).await))
}
