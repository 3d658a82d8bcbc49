use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the match score table if it does not exist yet. Safe to run on every start.
pub async fn ensure_match_score_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS skill_match_scores (
            id            SERIAL PRIMARY KEY,
            student_id    INTEGER NOT NULL,
            job_id        INTEGER NOT NULL,
            score         DOUBLE PRECISION NOT NULL,
            calculated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (student_id, job_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("skill_match_scores table ready");
    Ok(())
}
