use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::models::{CancellationSummary, VisitPricing};
use crate::jobs::model::{JobStatus, NewJob, ServiceJob};
use crate::jobs::JobsRepo;
use crate::payments::{EarningsSummary, FunctionsClient, PaymentsError, PayoutSummary, VisitAuthorization};
use crate::pricing::{
    apply_credit, cancellation_breakdown, CreditApplication, CreditsRepo, UserCredit,
    CUSTOMER_TOTAL_CENTS, VISIT_BASE_FEE_CENTS,
};

pub mod models;

#[derive(Clone)]
pub struct ApiState {
    pub jobs: JobsRepo,
    pub credits: CreditsRepo,
    pub payments: FunctionsClient,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        // Pricing
        .route("/pricing/visit", get(visit_pricing))
        // Bookings
        .route("/jobs", get(list_jobs).post(book_visit))
        .route("/jobs/:id", get(get_job))
        .route("/jobs/:id/status", post(update_status))
        .route("/jobs/:id/cancellation-summary", get(cancellation_summary))
        .route("/jobs/:id/authorize-visit", post(authorize_visit))
        // Credits
        .route("/users/:id/credit", get(user_credit))
        .route("/users/:id/credit/redeem", post(redeem_credit))
        // Provider aggregates (proxied from the remote functions)
        .route("/providers/:id/payouts", get(provider_payouts))
        .route("/providers/:id/earnings", get(provider_earnings))
        // Health
        .route("/health", get(health))
        .with_state(state)
}

fn internal_err(e: anyhow::Error) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("internal error: {e}"),
    )
}

fn payments_err(e: PaymentsError) -> (StatusCode, String) {
    match e {
        PaymentsError::Transport(_) | PaymentsError::Remote(_) | PaymentsError::Incomplete(_) => {
            (StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

// ----------------------------
// Pricing
// ----------------------------

pub async fn visit_pricing() -> Json<VisitPricing> {
    Json(VisitPricing::current())
}

// ----------------------------
// Bookings
// ----------------------------

#[derive(Debug, Deserialize)]
pub struct BookVisitRequest {
    pub client_id: Uuid,
    pub category: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookVisitResponse {
    pub job_id: Uuid,
    pub visit_fee_cents: i64,
    pub customer_total_cents: i64,
}

pub async fn book_visit(
    State(state): State<ApiState>,
    Json(body): Json<BookVisitRequest>,
) -> Result<Json<BookVisitResponse>, (StatusCode, String)> {
    if body.category.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "category is required".into()));
    }

    let job_id = state
        .jobs
        .book(NewJob {
            client_id: body.client_id,
            category: body.category,
            description: body.description,
            visit_fee_cents: VISIT_BASE_FEE_CENTS,
        })
        .await
        .map_err(internal_err)?;

    Ok(Json(BookVisitResponse {
        job_id,
        visit_fee_cents: VISIT_BASE_FEE_CENTS,
        customer_total_cents: CUSTOMER_TOTAL_CENTS,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub cursor_created_at: Option<DateTime<Utc>>,
    pub cursor_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ListJobsResponse {
    pub items: Vec<ServiceJob>,
    pub next_cursor_created_at: Option<DateTime<Utc>>,
    pub next_cursor_id: Option<Uuid>,
}

pub async fn list_jobs(
    State(state): State<ApiState>,
    Query(q): Query<ListJobsQuery>,
) -> Result<Json<ListJobsResponse>, (StatusCode, String)> {
    let status = match q.status.as_deref() {
        Some(s) => Some(
            JobStatus::parse(s)
                .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("unknown status: {s}")))?,
        ),
        None => None,
    };

    // A lone cursor half would silently restart from page 1 in the repo.
    if q.cursor_created_at.is_some() != q.cursor_id.is_some() {
        return Err((
            StatusCode::BAD_REQUEST,
            "cursor_created_at and cursor_id must be supplied together".into(),
        ));
    }

    let items = state
        .jobs
        .list_jobs(status, q.limit.unwrap_or(100), q.cursor_created_at, q.cursor_id)
        .await
        .map_err(internal_err)?;

    let (next_cursor_created_at, next_cursor_id) = items
        .last()
        .map(|x| (Some(x.created_at), Some(x.id)))
        .unwrap_or((None, None));

    Ok(Json(ListJobsResponse {
        items,
        next_cursor_created_at,
        next_cursor_id,
    }))
}

pub async fn get_job(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceJob>, (StatusCode, String)> {
    let job = state
        .jobs
        .get_job(id)
        .await
        .map_err(internal_err)?
        .ok_or((StatusCode::NOT_FOUND, "job not found".to_string()))?;

    Ok(Json(job))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub provider_id: Option<Uuid>,
}

pub async fn update_status(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let status = JobStatus::parse(&body.status).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!("unknown status: {}", body.status),
        )
    })?;

    let updated = state
        .jobs
        .update_status(id, status, body.provider_id)
        .await
        .map_err(internal_err)?;

    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "job not found".into()))
    }
}

pub async fn cancellation_summary(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CancellationSummary>, (StatusCode, String)> {
    let job = state
        .jobs
        .get_job(id)
        .await
        .map_err(internal_err)?
        .ok_or((StatusCode::NOT_FOUND, "job not found".to_string()))?;

    let status = JobStatus::parse(&job.status).ok_or_else(|| {
        internal_err(anyhow::anyhow!(
            "job {id} has unrecognized status {:?}",
            job.status
        ))
    })?;

    Ok(Json(
        cancellation_breakdown(status, job.visit_fee_cents).into(),
    ))
}

// ----------------------------
// Visit-fee authorization
// ----------------------------

#[derive(Debug, Deserialize)]
pub struct AuthorizeVisitRequest {
    /// When present, the user's active credit is previewed against the total.
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AuthorizeVisitResponse {
    pub authorization: VisitAuthorization,
    pub customer_total_cents: i64,
    pub applied_credit_cents: i64,
    pub effective_total_cents: i64,
}

pub async fn authorize_visit(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AuthorizeVisitRequest>,
) -> Result<Json<AuthorizeVisitResponse>, (StatusCode, String)> {
    let job = state
        .jobs
        .get_job(id)
        .await
        .map_err(internal_err)?
        .ok_or((StatusCode::NOT_FOUND, "job not found".to_string()))?;

    // Credit preview only: the remote function authorizes the full total and
    // the credit is settled at capture time.
    let credit = match body.user_id {
        Some(user_id) => state
            .credits
            .active_credit(user_id)
            .await
            .map_err(internal_err)?,
        None => None,
    };
    let applied = apply_credit(CUSTOMER_TOTAL_CENTS, credit.map(|c| c.amount_cents));

    let authorization = state
        .payments
        .create_visit_authorization(job.id)
        .await
        .map_err(payments_err)?;

    Ok(Json(AuthorizeVisitResponse {
        authorization,
        customer_total_cents: CUSTOMER_TOTAL_CENTS,
        applied_credit_cents: applied.applied_cents,
        effective_total_cents: applied.effective_total_cents,
    }))
}

// ----------------------------
// Credits
// ----------------------------

#[derive(Debug, Serialize)]
pub struct UserCreditResponse {
    pub credit: Option<UserCredit>,
    pub preview: CreditApplication,
}

pub async fn user_credit(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserCreditResponse>, (StatusCode, String)> {
    let credit = state.credits.active_credit(id).await.map_err(internal_err)?;
    let preview = apply_credit(CUSTOMER_TOTAL_CENTS, credit.as_ref().map(|c| c.amount_cents));

    Ok(Json(UserCreditResponse { credit, preview }))
}

#[derive(Debug, Deserialize)]
pub struct RedeemCreditRequest {
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct RedeemCreditResponse {
    pub credit_id: Uuid,
    pub applied_cents: i64,
    pub effective_total_cents: i64,
}

pub async fn redeem_credit(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RedeemCreditRequest>,
) -> Result<Json<RedeemCreditResponse>, (StatusCode, String)> {
    let credit = state
        .credits
        .active_credit(id)
        .await
        .map_err(internal_err)?
        .ok_or((StatusCode::NOT_FOUND, "no active credit".to_string()))?;

    let redeemed = state
        .credits
        .redeem(credit.id, body.job_id)
        .await
        .map_err(internal_err)?;
    if !redeemed {
        // Raced with another checkout or expired between read and update.
        tracing::warn!(user_id = %id, credit_id = %credit.id, "credit redeem lost the race");
        return Err((StatusCode::CONFLICT, "credit no longer active".into()));
    }

    let applied = apply_credit(CUSTOMER_TOTAL_CENTS, Some(credit.amount_cents));
    Ok(Json(RedeemCreditResponse {
        credit_id: credit.id,
        applied_cents: applied.applied_cents,
        effective_total_cents: applied.effective_total_cents,
    }))
}

// ----------------------------
// Provider aggregates
// ----------------------------

pub async fn provider_payouts(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PayoutSummary>, (StatusCode, String)> {
    let summary = state
        .payments
        .list_provider_payouts(id)
        .await
        .map_err(payments_err)?;
    Ok(Json(summary))
}

pub async fn provider_earnings(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EarningsSummary>, (StatusCode, String)> {
    let summary = state
        .payments
        .list_provider_earnings(id)
        .await
        .map_err(payments_err)?;
    Ok(Json(summary))
}

pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
