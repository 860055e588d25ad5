use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Promotion/referral credit held by a user. Rows are created by an external
/// process; this service only reads, previews and redeems them. A credit is
/// active while `redeemed_at IS NULL` and `expires_at` has not passed.
/// Expiry is enforced by query filtering; there is no sweeper.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserCredit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount_cents: i64,
    pub expires_at: DateTime<Utc>,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditApplication {
    pub applied_cents: i64,
    pub effective_total_cents: i64,
}

/// Apply an account credit to a total owed. The credit covers at most the
/// total; the effective total never goes negative, and the unused remainder
/// is an external ledger concern, not tracked here.
pub fn apply_credit(total_cents: i64, credit_cents: Option<i64>) -> CreditApplication {
    let applied = credit_cents
        .unwrap_or(0)
        .min(total_cents)
        .max(0);

    CreditApplication {
        applied_cents: applied,
        effective_total_cents: (total_cents - applied).max(0),
    }
}

#[derive(Clone)]
pub struct CreditsRepo {
    pool: PgPool,
}

impl CreditsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent active credit for a user, if any.
    pub async fn active_credit(&self, user_id: Uuid) -> anyhow::Result<Option<UserCredit>> {
        let credit = sqlx::query_as::<_, UserCredit>(
            r#"
            SELECT id, user_id, amount_cents, expires_at, redeemed_at, created_at
            FROM user_credits
            WHERE user_id = $1
              AND redeemed_at IS NULL
              AND expires_at > now()
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credit)
    }

    /// Consume a credit at checkout, recording the job it paid towards.
    /// Returns false when the credit was already redeemed or has expired
    /// (zero rows affected) so the caller can surface a conflict.
    pub async fn redeem(&self, credit_id: Uuid, job_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE user_credits
            SET redeemed_at = now(),
                redeemed_job_id = $2
            WHERE id = $1
              AND redeemed_at IS NULL
              AND expires_at > now()
            "#,
        )
        .bind(credit_id)
        .bind(job_id)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_larger_than_total_is_fully_absorbed() {
        let app = apply_credit(100, Some(150));
        assert_eq!(app.applied_cents, 100);
        assert_eq!(app.effective_total_cents, 0);
    }

    #[test]
    fn partial_credit_reduces_total() {
        let app = apply_credit(100, Some(30));
        assert_eq!(app.applied_cents, 30);
        assert_eq!(app.effective_total_cents, 70);
    }

    #[test]
    fn no_credit_leaves_total_unchanged() {
        let app = apply_credit(100, None);
        assert_eq!(app.applied_cents, 0);
        assert_eq!(app.effective_total_cents, 100);
    }

    #[test]
    fn negative_credit_is_clamped_to_zero() {
        let app = apply_credit(100, Some(-40));
        assert_eq!(app.applied_cents, 0);
        assert_eq!(app.effective_total_cents, 100);
    }
}
