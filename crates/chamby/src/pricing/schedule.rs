//! Fixed visit-fee schedule in MXN centavos.
//!
//! Option-A model: the customer is charged base + IVA; the provider payout is
//! a flat amount independent of tax. These values are a versionless schedule
//! shared with the remote payment functions, which hard-code matching
//! amounts. Changing them requires a coordinated deploy.

/// Base visit fee charged to the customer, before tax.
pub const VISIT_BASE_FEE_CENTS: i64 = 35_000;

/// IVA rate applied to the base fee.
pub const IVA_RATE: f64 = 0.16;

/// IVA on the base fee. Must equal round(base * rate).
pub const IVA_AMOUNT_CENTS: i64 = 5_600;

/// Total charged to the customer: base + IVA.
pub const CUSTOMER_TOTAL_CENTS: i64 = VISIT_BASE_FEE_CENTS + IVA_AMOUNT_CENTS;

/// Flat payout to the provider for a completed site visit, tax-independent.
pub const PROVIDER_VISIT_PAYOUT_CENTS: i64 = 25_000;

/// Fixed platform retention on the visit fee, same in every cancellation
/// phase.
pub const PLATFORM_RETENTION_CENTS: i64 = VISIT_BASE_FEE_CENTS - PROVIDER_VISIT_PAYOUT_CENTS;

/// Extra compensation owed to a provider cancelled after the site visit
/// started.
pub const SITE_VISIT_COMPENSATION_CENTS: i64 = 25_000;

/// Render minor units for display. Division by 100 happens only here;
/// everything stored or compared stays integer.
pub fn format_cents(amount_cents: i64) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.unsigned_abs();
    format!("{}${}.{:02} MXN", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_total_is_base_plus_iva() {
        assert_eq!(VISIT_BASE_FEE_CENTS + IVA_AMOUNT_CENTS, CUSTOMER_TOTAL_CENTS);
        assert_eq!(CUSTOMER_TOTAL_CENTS, 40_600);
    }

    #[test]
    fn iva_amount_matches_rate() {
        let expected = (VISIT_BASE_FEE_CENTS as f64 * IVA_RATE).round() as i64;
        assert_eq!(IVA_AMOUNT_CENTS, expected);
    }

    #[test]
    fn retention_is_base_minus_payout() {
        assert_eq!(PLATFORM_RETENTION_CENTS, 10_000);
    }

    #[test]
    fn formats_display_amounts() {
        assert_eq!(format_cents(35_000), "$350.00 MXN");
        assert_eq!(format_cents(40_600), "$406.00 MXN");
        assert_eq!(format_cents(5), "$0.05 MXN");
        assert_eq!(format_cents(-2_550), "-$25.50 MXN");
    }
}
