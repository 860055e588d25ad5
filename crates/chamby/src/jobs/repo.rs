use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::jobs::model::{JobStatus, NewJob, ServiceJob};

#[derive(Clone)]
pub struct JobsRepo {
    pool: PgPool,
}

impl JobsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ----------------------------
    // Booking
    // ----------------------------

    pub async fn book(&self, job: NewJob) -> anyhow::Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO jobs (client_id, category, description, status, visit_fee_cents)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(job.client_id)
        .bind(&job.category)
        .bind(&job.description)
        .bind(JobStatus::Searching.as_str())
        .bind(job.visit_fee_cents)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    // ----------------------------
    // Reads
    // ----------------------------

    pub async fn get_job(&self, job_id: Uuid) -> anyhow::Result<Option<ServiceJob>> {
        let job = sqlx::query_as::<_, ServiceJob>(
            r#"
            SELECT id, client_id, provider_id, category, description, status,
                   visit_fee_cents, created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    /// Cursor-paginated list of jobs, newest first.
    /// Cursor is (created_at, id) ordered DESC; limit is clamped to [1, 500].
    pub async fn list_jobs(
        &self,
        status: Option<JobStatus>,
        limit: i64,
        cursor_created_at: Option<DateTime<Utc>>,
        cursor_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<ServiceJob>> {
        let limit = limit.clamp(1, 500);

        let rows = match (status, cursor_created_at, cursor_id) {
            (Some(st), Some(ca), Some(cid)) => {
                sqlx::query_as::<_, ServiceJob>(
                    r#"
                    SELECT id, client_id, provider_id, category, description, status,
                           visit_fee_cents, created_at, updated_at
                    FROM jobs
                    WHERE status = $1
                      AND (created_at, id) < ($2, $3)
                    ORDER BY created_at DESC, id DESC
                    LIMIT $4
                    "#,
                )
                .bind(st.as_str())
                .bind(ca)
                .bind(cid)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(st), _, _) => {
                sqlx::query_as::<_, ServiceJob>(
                    r#"
                    SELECT id, client_id, provider_id, category, description, status,
                           visit_fee_cents, created_at, updated_at
                    FROM jobs
                    WHERE status = $1
                    ORDER BY created_at DESC, id DESC
                    LIMIT $2
                    "#,
                )
                .bind(st.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            (None, Some(ca), Some(cid)) => {
                sqlx::query_as::<_, ServiceJob>(
                    r#"
                    SELECT id, client_id, provider_id, category, description, status,
                           visit_fee_cents, created_at, updated_at
                    FROM jobs
                    WHERE (created_at, id) < ($1, $2)
                    ORDER BY created_at DESC, id DESC
                    LIMIT $3
                    "#,
                )
                .bind(ca)
                .bind(cid)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            (None, _, _) => {
                sqlx::query_as::<_, ServiceJob>(
                    r#"
                    SELECT id, client_id, provider_id, category, description, status,
                           visit_fee_cents, created_at, updated_at
                    FROM jobs
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    // ----------------------------
    // State transitions
    // ----------------------------

    /// The provider app drives the status column; this layer validates the
    /// string and stamps updated_at, nothing more. Returns false when the job
    /// does not exist.
    pub async fn update_status(
        &self,
        job_id: Uuid,
        status: JobStatus,
        provider_id: Option<Uuid>,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE jobs
            SET status = $2,
                provider_id = COALESCE($3, provider_id),
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(status.as_str())
        .bind(provider_id)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    // ----------------------------
    // Maintenance
    // ----------------------------

    /// Cancel bookings that never found a provider. Runs from the server's
    /// maintenance loop.
    pub async fn cancel_stale_searching(&self, older_than_days: i64) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE jobs
            SET status = 'cancelled',
                updated_at = now()
            WHERE status = 'searching'
              AND created_at < now() - ($1::bigint * interval '1 day')
            "#,
        )
        .bind(older_than_days)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
}
