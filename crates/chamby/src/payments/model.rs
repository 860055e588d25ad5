use serde::{Deserialize, Serialize};

/// Handle for a visit-fee authorization created by the remote payment
/// function. The authorize/capture/refund state machine, idempotency and
/// webhook reconciliation all live behind that function; this is just the
/// handle it returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitAuthorization {
    pub client_secret: String,
    pub payment_intent_id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    /// Set by the remote function when an authorization already existed for
    /// this job and it returned the existing handle instead of a new one.
    pub already_exists: Option<bool>,
}

/// Payout aggregates computed remotely; consumed as-is by this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutSummary {
    pub pending_cents: i64,
    pub paid_cents: i64,
    pub visits: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsSummary {
    pub total_cents: i64,
    pub this_month_cents: i64,
    pub completed_jobs: i64,
}
