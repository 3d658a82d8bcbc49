use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted compatibility score for one (student, job) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub id: i32,
    pub student_id: i32,
    pub job_id: i32,
    pub score: f64,
    pub calculated_at: DateTime<Utc>,
}
