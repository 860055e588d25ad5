use serde::Serialize;

use crate::jobs::model::JobStatus;
use crate::pricing::schedule::{PLATFORM_RETENTION_CENTS, SITE_VISIT_COMPENSATION_CENTS};

/// Where a job stands relative to the provider's site visit when it is
/// cancelled. Every status is classified explicitly; a new `JobStatus`
/// variant will not compile until it is placed in a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitPhase {
    BeforeSiteVisit,
    AfterSiteVisit,
}

impl VisitPhase {
    pub fn of(status: JobStatus) -> Self {
        match status {
            JobStatus::OnSite | JobStatus::Quoted | JobStatus::InProgress => {
                VisitPhase::AfterSiteVisit
            }
            JobStatus::Searching
            | JobStatus::Accepted
            | JobStatus::EnRoute
            | JobStatus::Completed
            | JobStatus::Cancelled => VisitPhase::BeforeSiteVisit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CancellationBreakdown {
    pub phase: VisitPhase,
    pub visit_fee_cents: i64,
    pub platform_retention_cents: i64,
    pub compensation_cents: i64,
    pub provider_receives_cents: i64,
}

/// Advisory estimate of what the provider keeps when a job is cancelled.
/// No payment is moved from this calculation; the remote payment functions
/// settle the real amounts. Retention is fixed in both phases; a job
/// cancelled after the site visit started adds the fixed compensation.
pub fn cancellation_breakdown(status: JobStatus, visit_fee_cents: i64) -> CancellationBreakdown {
    let phase = VisitPhase::of(status);
    let compensation_cents = match phase {
        VisitPhase::BeforeSiteVisit => 0,
        VisitPhase::AfterSiteVisit => SITE_VISIT_COMPENSATION_CENTS,
    };

    CancellationBreakdown {
        phase,
        visit_fee_cents,
        platform_retention_cents: PLATFORM_RETENTION_CENTS,
        compensation_cents,
        provider_receives_cents: visit_fee_cents - PLATFORM_RETENTION_CENTS + compensation_cents,
    }
}
