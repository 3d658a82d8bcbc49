//! Persisted (student, job) scores with last-write-wins upsert.
//!
//! Default: `MemoryMatchScoreStore` (process memory, unbounded, lost on restart).
//! With `DATABASE_URL` set: `PgMatchScoreStore` (table `skill_match_scores`).
//!
//! `AppState` holds an `Arc<dyn MatchScoreStore>`, chosen at startup via config.
//! Scores are never invalidated when skills change; a stored score stays
//! authoritative until the next upsert for the same pair.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::AppError;
use crate::models::match_score::MatchScore;

/// Keyed by the ordered pair (student_id, job_id); the reversed pair is a different key.
#[async_trait]
pub trait MatchScoreStore: Send + Sync {
    /// Creates the row if absent, otherwise overwrites score and timestamp.
    async fn upsert(&self, student_id: i32, job_id: i32, score: f64)
        -> Result<MatchScore, AppError>;

    async fn get(&self, student_id: i32, job_id: i32) -> Result<Option<MatchScore>, AppError>;

    async fn scores_for_student(&self, student_id: i32) -> Result<Vec<MatchScore>, AppError>;

    async fn scores_for_job(&self, job_id: i32) -> Result<Vec<MatchScore>, AppError>;

    /// Short backend label reported by the health endpoint.
    fn backend(&self) -> &'static str;
}

#[derive(Default)]
struct ScoreTable {
    rows: HashMap<(i32, i32), MatchScore>,
    next_id: i32,
}

/// Single-lock in-memory store. The one mutex serializes upsert/get on every key.
#[derive(Default)]
pub struct MemoryMatchScoreStore {
    table: Mutex<ScoreTable>,
}

impl MemoryMatchScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchScoreStore for MemoryMatchScoreStore {
    async fn upsert(
        &self,
        student_id: i32,
        job_id: i32,
        score: f64,
    ) -> Result<MatchScore, AppError> {
        let mut table = self.table.lock().await;
        let now = Utc::now();

        if let Some(existing) = table.rows.get_mut(&(student_id, job_id)) {
            existing.score = score;
            existing.calculated_at = now;
            debug!("Updated match score {student_id}/{job_id} -> {score}");
            return Ok(existing.clone());
        }

        table.next_id += 1;
        let row = MatchScore {
            id: table.next_id,
            student_id,
            job_id,
            score,
            calculated_at: now,
        };
        table.rows.insert((student_id, job_id), row.clone());
        debug!("Inserted match score {student_id}/{job_id} -> {score}");
        Ok(row)
    }

    async fn get(&self, student_id: i32, job_id: i32) -> Result<Option<MatchScore>, AppError> {
        Ok(self.table.lock().await.rows.get(&(student_id, job_id)).cloned())
    }

    async fn scores_for_student(&self, student_id: i32) -> Result<Vec<MatchScore>, AppError> {
        let table = self.table.lock().await;
        let mut rows: Vec<_> = table
            .rows
            .values()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.id);
        Ok(rows)
    }

    async fn scores_for_job(&self, job_id: i32) -> Result<Vec<MatchScore>, AppError> {
        let table = self.table.lock().await;
        let mut rows: Vec<_> = table
            .rows
            .values()
            .filter(|s| s.job_id == job_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.id);
        Ok(rows)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Rows live in `skill_match_scores`, created by `db::ensure_match_score_schema`.
pub struct PgMatchScoreStore {
    pool: PgPool,
}

impl PgMatchScoreStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchScoreStore for PgMatchScoreStore {
    async fn upsert(
        &self,
        student_id: i32,
        job_id: i32,
        score: f64,
    ) -> Result<MatchScore, AppError> {
        // ON CONFLICT keeps the row id and makes concurrent upserts of one pair atomic.
        let row = sqlx::query_as::<_, MatchScore>(
            r#"
            INSERT INTO skill_match_scores (student_id, job_id, score, calculated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (student_id, job_id)
            DO UPDATE SET score = EXCLUDED.score, calculated_at = EXCLUDED.calculated_at
            RETURNING id, student_id, job_id, score, calculated_at
            "#,
        )
        .bind(student_id)
        .bind(job_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;

        debug!("Upserted match score {student_id}/{job_id} -> {score}");
        Ok(row)
    }

    async fn get(&self, student_id: i32, job_id: i32) -> Result<Option<MatchScore>, AppError> {
        Ok(sqlx::query_as::<_, MatchScore>(
            "SELECT id, student_id, job_id, score, calculated_at FROM skill_match_scores WHERE student_id = $1 AND job_id = $2",
        )
        .bind(student_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn scores_for_student(&self, student_id: i32) -> Result<Vec<MatchScore>, AppError> {
        Ok(sqlx::query_as::<_, MatchScore>(
            "SELECT id, student_id, job_id, score, calculated_at FROM skill_match_scores WHERE student_id = $1 ORDER BY id",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn scores_for_job(&self, job_id: i32) -> Result<Vec<MatchScore>, AppError> {
        Ok(sqlx::query_as::<_, MatchScore>(
            "SELECT id, student_id, job_id, score, calculated_at FROM skill_match_scores WHERE job_id = $1 ORDER BY id",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_twice_keeps_one_row_with_latest_score() {
        let store = MemoryMatchScoreStore::new();
        let first = store.upsert(1, 2, 40.0).await.unwrap();
        let second = store.upsert(1, 2, 85.0).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.score, 85.0);
        assert!(second.calculated_at >= first.calculated_at);

        let rows = store.scores_for_student(1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].score, 85.0);
    }

    #[tokio::test]
    async fn test_pair_order_matters() {
        let store = MemoryMatchScoreStore::new();
        store.upsert(1, 2, 10.0).await.unwrap();
        assert!(store.get(2, 1).await.unwrap().is_none());
        assert_eq!(store.get(1, 2).await.unwrap().unwrap().score, 10.0);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryMatchScoreStore::new();
        assert!(store.get(7, 7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scores_for_job_filters_by_job() {
        let store = MemoryMatchScoreStore::new();
        store.upsert(1, 5, 10.0).await.unwrap();
        store.upsert(2, 5, 20.0).await.unwrap();
        store.upsert(2, 6, 30.0).await.unwrap();

        let rows = store.scores_for_job(5).await.unwrap();
        assert_eq!(rows.iter().map(|s| s.student_id).collect::<Vec<_>>(), vec![1, 2]);
    }

    /// Runs against a real database: `DATABASE_URL=... cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_pg_upsert_keeps_row_id_and_overwrites_score() {
        use crate::db::{create_pool, ensure_match_score_schema};

        let Ok(url) = std::env::var("DATABASE_URL") else {
            return;
        };
        let pool = create_pool(&url).await.unwrap();
        ensure_match_score_schema(&pool).await.unwrap();
        sqlx::query("DELETE FROM skill_match_scores WHERE student_id = $1")
            .bind(-7)
            .execute(&pool)
            .await
            .unwrap();
        let store = PgMatchScoreStore::new(pool);

        let first = store.upsert(-7, 1, 40.0).await.unwrap();
        let second = store.upsert(-7, 1, 85.0).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.score, 85.0);
        assert!(second.calculated_at >= first.calculated_at);

        store.upsert(-7, 2, 10.0).await.unwrap();
        let rows = store.scores_for_student(-7).await.unwrap();
        assert_eq!(rows.iter().map(|s| s.job_id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(store.get(-7, 1).await.unwrap().unwrap().score, 85.0);
        assert!(store.get(1, -7).await.unwrap().is_none());
        let for_job = store.scores_for_job(2).await.unwrap();
        assert_eq!(for_job.iter().filter(|s| s.student_id == -7).count(), 1);
        assert_eq!(store.backend(), "postgres");
    }

    #[tokio::test]
    async fn test_upsert_accepts_unknown_pairs_and_any_score() {
        let store = MemoryMatchScoreStore::new();
        let row = store.upsert(999, 999, 150.5).await.unwrap();
        assert_eq!(row.score, 150.5);
    }
}
