// crates/chamby/src/api/models.rs
use serde::Serialize;

use crate::pricing::{
    format_cents, CancellationBreakdown, CUSTOMER_TOTAL_CENTS, IVA_AMOUNT_CENTS, IVA_RATE,
    PLATFORM_RETENTION_CENTS, PROVIDER_VISIT_PAYOUT_CENTS, VISIT_BASE_FEE_CENTS,
};

#[derive(Debug, Serialize)]
pub struct VisitPricing {
    pub base_fee_cents: i64,
    pub iva_rate: f64,
    pub iva_cents: i64,
    pub customer_total_cents: i64,
    pub provider_payout_cents: i64,
    pub platform_retention_cents: i64,

    pub base_fee_display: String,
    pub iva_display: String,
    pub customer_total_display: String,
}

impl VisitPricing {
    /// The whole response derives from the schedule constants; there is no
    /// second source of truth for these numbers.
    pub fn current() -> Self {
        Self {
            base_fee_cents: VISIT_BASE_FEE_CENTS,
            iva_rate: IVA_RATE,
            iva_cents: IVA_AMOUNT_CENTS,
            customer_total_cents: CUSTOMER_TOTAL_CENTS,
            provider_payout_cents: PROVIDER_VISIT_PAYOUT_CENTS,
            platform_retention_cents: PLATFORM_RETENTION_CENTS,
            base_fee_display: format_cents(VISIT_BASE_FEE_CENTS),
            iva_display: format_cents(IVA_AMOUNT_CENTS),
            customer_total_display: format_cents(CUSTOMER_TOTAL_CENTS),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancellationSummary {
    #[serde(flatten)]
    pub breakdown: CancellationBreakdown,
    pub provider_receives_display: String,
}

impl From<CancellationBreakdown> for CancellationSummary {
    fn from(breakdown: CancellationBreakdown) -> Self {
        Self {
            provider_receives_display: format_cents(breakdown.provider_receives_cents),
            breakdown,
        }
    }
}
