use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::{parse_id, AppError};
use crate::matching::ranking::{top_matches_for_job, top_matches_for_student, JobMatch, StudentMatch};
use crate::models::match_score::MatchScore;
use crate::routes::{parse_body, AppJson, AppQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

impl LimitQuery {
    fn requested(&self) -> Result<Option<usize>, AppError> {
        match self.limit.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw.trim().parse::<usize>().map(Some).map_err(|_| {
                AppError::Validation("limit must be a non-negative integer".to_string())
            }),
        }
    }
}

/// Body of `POST /api/matching/calculate`. The score is stored as sent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub student_id: Option<i32>,
    pub job_id: Option<i32>,
    pub score: Option<f64>,
}

/// GET /api/matching/jobs/:student_id
pub async fn handle_matching_jobs(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    AppQuery(params): AppQuery<LimitQuery>,
) -> Result<Json<Vec<JobMatch>>, AppError> {
    let student_id = parse_id(&student_id, "student")?;
    let limit = state.config.match_limit(params.requested()?);
    let matches = top_matches_for_student(
        &state.store,
        state.match_scores.as_ref(),
        student_id,
        limit,
    )
    .await?;
    Ok(Json(matches))
}

/// GET /api/matching/students/:job_id
pub async fn handle_matching_students(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    AppQuery(params): AppQuery<LimitQuery>,
) -> Result<Json<Vec<StudentMatch>>, AppError> {
    let job_id = parse_id(&job_id, "job")?;
    let limit = state.config.match_limit(params.requested()?);
    let matches =
        top_matches_for_job(&state.store, state.match_scores.as_ref(), job_id, limit).await?;
    Ok(Json(matches))
}

/// GET /api/matching/score/:student_id/:job_id
///
/// Point lookup of a persisted score; on-demand scores are never stored, so a
/// pair that was only ranked is 404 here.
pub async fn handle_get_score(
    State(state): State<AppState>,
    Path((student_id, job_id)): Path<(String, String)>,
) -> Result<Json<MatchScore>, AppError> {
    let student_id = parse_id(&student_id, "student")?;
    let job_id = parse_id(&job_id, "job")?;
    state
        .match_scores
        .get(student_id, job_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Match score not found".to_string()))
}

/// POST /api/matching/calculate
///
/// Upserts the caller's score verbatim: no range check, no recomputation and no
/// check that the student or job exists.
pub async fn handle_calculate(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<MatchScore>, AppError> {
    let req: CalculateRequest = parse_body(body)?;
    let (Some(student_id), Some(job_id), Some(score)) = (req.student_id, req.job_id, req.score)
    else {
        return Err(AppError::Validation(
            "Student ID, job ID, and score are required".to_string(),
        ));
    };

    debug!("Caller-supplied match score {student_id}/{job_id} = {score}");
    let row = state.match_scores.upsert(student_id, job_id, score).await?;
    Ok(Json(row))
}
