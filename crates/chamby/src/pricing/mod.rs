pub mod cancellation;
pub mod credit;
pub mod schedule;

pub use cancellation::{cancellation_breakdown, CancellationBreakdown, VisitPhase};
pub use credit::{apply_credit, CreditApplication, CreditsRepo, UserCredit};
pub use schedule::{
    format_cents, CUSTOMER_TOTAL_CENTS, IVA_AMOUNT_CENTS, IVA_RATE, PLATFORM_RETENTION_CENTS,
    PROVIDER_VISIT_PAYOUT_CENTS, SITE_VISIT_COMPENSATION_CENTS, VISIT_BASE_FEE_CENTS,
};
