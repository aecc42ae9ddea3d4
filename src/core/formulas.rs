//! Closed-form projections. Every function here is total over finite input
//! and never panics; degenerate rates and tenures fall back to their linear
//! or no-interest forms.

use super::rates::{RATE_EPSILON, annuity_factor_monthly, growth_factor, month_count, monthly_rate};

/// Lump sum grown with annual compounding. Negative tenure leaves `pv` as is.
pub fn future_value_lump_sum(pv: f64, annual_rate_pct: f64, years: f64) -> f64 {
    let r = annual_rate_pct / 100.0;
    pv * (1.0 + r).powf(years.max(0.0))
}

/// Fixed deposit maturity with `compounding_per_year` interest credits.
pub fn future_value_fd(
    principal: f64,
    annual_rate_pct: f64,
    years: f64,
    compounding_per_year: f64,
) -> f64 {
    let r = annual_rate_pct / 100.0;
    let n = compounding_per_year.floor().max(1.0);
    principal * (1.0 + r / n).powf(n * years.max(0.0))
}

/// PPF maturity: grown opening balance plus year-end deposits.
pub fn future_value_ppf(
    yearly_contribution: f64,
    annual_rate_pct: f64,
    years: f64,
    initial: f64,
) -> f64 {
    let r = annual_rate_pct / 100.0;
    let fv_initial = initial * (1.0 + r).powf(years.max(0.0));
    if years <= 0.0 {
        return fv_initial;
    }
    if r.abs() < RATE_EPSILON {
        return fv_initial + yearly_contribution * years;
    }
    let af = ((1.0 + r).powf(years) - 1.0) / r;
    fv_initial + yearly_contribution * af
}

/// SIP corpus from level monthly contributions at the effective monthly rate.
pub fn future_value_sip(monthly_contribution: f64, annual_rate_pct: f64, years: f64) -> f64 {
    let r = monthly_rate(annual_rate_pct);
    monthly_contribution * annuity_factor_monthly(r, month_count(years))
}

/// Existing corpus and new monthly contributions growing side by side.
pub fn future_value_mf(
    current_corpus: f64,
    monthly_contribution: f64,
    annual_rate_pct: f64,
    years: f64,
) -> f64 {
    future_value_lump_sum(current_corpus, annual_rate_pct, years)
        + future_value_sip(monthly_contribution, annual_rate_pct, years)
}

/// Number of installments for a loan; a loan always has at least one.
pub fn loan_months(years: f64) -> u32 {
    month_count(years).max(1)
}

/// Level monthly installment that amortizes `principal` over the loan term.
pub fn loan_emi(principal: f64, annual_rate_pct: f64, years: f64) -> f64 {
    let r = monthly_rate(annual_rate_pct);
    let n = loan_months(years);
    if r.abs() < RATE_EPSILON {
        return principal / n as f64;
    }
    let factor = growth_factor(r, n);
    if !factor.is_finite() {
        // Interest-only limit of an unbounded term.
        return principal * r;
    }
    principal * r * factor / (factor - 1.0)
}

/// Balance left after `payments_made` installments, clamped to the loan term.
pub fn loan_outstanding(
    principal: f64,
    annual_rate_pct: f64,
    years: f64,
    payments_made: u32,
) -> f64 {
    let r = monthly_rate(annual_rate_pct);
    let n = loan_months(years);
    let k = payments_made.min(n);
    if r.abs() < RATE_EPSILON {
        return principal * (1.0 - k as f64 / n as f64);
    }
    let emi = loan_emi(principal, annual_rate_pct, years);
    let factor_k = growth_factor(r, k);
    (principal * factor_k - emi * ((factor_k - 1.0) / r)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn zero_rate_reduces_to_linear_forms() {
        assert_approx_tol(future_value_fd(50_000.0, 0.0, 3.0, 4.0), 50_000.0, 1e-9);
        assert_approx_tol(
            future_value_ppf(10_000.0, 0.0, 15.0, 5_000.0),
            155_000.0,
            1e-9,
        );
        assert_approx_tol(loan_emi(120_000.0, 0.0, 10.0), 1_000.0, 1e-9);
        assert_approx_tol(loan_outstanding(120_000.0, 0.0, 10.0, 30), 90_000.0, 1e-9);
    }

    #[test]
    fn fd_quarterly_matches_closed_form() {
        let expected = 200_000.0 * (1.0_f64 + 0.07 / 4.0).powi(20);
        assert_approx_tol(future_value_fd(200_000.0, 7.0, 5.0, 4.0), expected, 1e-6);
        assert_approx_tol(expected, 282_955.64, 0.01);
    }

    #[test]
    fn fd_floors_compounding_frequency_at_one() {
        let yearly = future_value_fd(1_000.0, 10.0, 2.0, 1.0);
        assert_approx_tol(future_value_fd(1_000.0, 10.0, 2.0, 0.0), yearly, 1e-9);
        assert_approx_tol(future_value_fd(1_000.0, 10.0, 2.0, 1.9), yearly, 1e-9);
        assert_approx_tol(yearly, 1_210.0, 1e-9);
    }

    #[test]
    fn lump_sum_ignores_negative_tenure() {
        assert_approx_tol(future_value_lump_sum(1_000.0, 12.0, -4.0), 1_000.0, 1e-12);
        assert_approx_tol(future_value_lump_sum(1_000.0, 10.0, 2.0), 1_210.0, 1e-9);
    }

    #[test]
    fn ppf_non_positive_tenure_returns_grown_initial_only() {
        assert_approx_tol(future_value_ppf(150_000.0, 7.1, 0.0, 2_000.0), 2_000.0, 1e-9);
        assert_approx_tol(
            future_value_ppf(150_000.0, 7.1, -1.0, 2_000.0),
            2_000.0,
            1e-9,
        );
    }

    #[test]
    fn ppf_uses_year_end_deposits() {
        // Two deposits of 100 at 10%: 100 * 1.1 + 100.
        assert_approx_tol(future_value_ppf(100.0, 10.0, 2.0, 0.0), 210.0, 1e-9);
    }

    #[test]
    fn home_loan_emi_uses_effective_monthly_rate() {
        let emi = loan_emi(2_000_000.0, 9.0, 20.0);
        assert_approx_tol(emi, 17_545.26, 0.01);
        assert_approx_tol(loan_outstanding(2_000_000.0, 9.0, 20.0, 0), 2_000_000.0, 1e-6);
        assert_approx_tol(loan_outstanding(2_000_000.0, 9.0, 20.0, 240), 0.0, 1e-4);
    }

    #[test]
    fn outstanding_clamps_payments_to_term() {
        let at_term = loan_outstanding(500_000.0, 8.5, 5.0, 60);
        let beyond = loan_outstanding(500_000.0, 8.5, 5.0, 600);
        assert_approx_tol(beyond, at_term, 1e-9);
        assert!(beyond >= 0.0);
    }

    #[test]
    fn loan_has_at_least_one_installment() {
        assert_eq!(loan_months(0.0), 1);
        assert_approx_tol(loan_emi(1_000.0, 0.0, 0.0), 1_000.0, 1e-9);
    }

    #[test]
    fn absurd_tenure_still_yields_positive_emi() {
        let emi = loan_emi(1_000_000.0, 9.0, 1e12);
        assert!(emi.is_finite() && emi > 0.0, "got {emi}");
        assert_approx_tol(emi, 1_000_000.0 * monthly_rate(9.0), 1e-9);
        assert!(loan_outstanding(1_000_000.0, 9.0, 1e12, 12) <= 1_000_000.0 + 1e-6);
    }

    #[test]
    fn sip_without_contribution_is_zero() {
        assert_eq!(future_value_sip(0.0, 12.0, 10.0), 0.0);
        assert_eq!(future_value_sip(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn mf_is_sum_of_lump_sum_and_sip() {
        let total = future_value_mf(100_000.0, 5_000.0, 11.0, 7.0);
        let parts = future_value_lump_sum(100_000.0, 11.0, 7.0) + future_value_sip(5_000.0, 11.0, 7.0);
        assert_approx_tol(total, parts, 1e-9);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_lump_sum_non_decreasing_in_years(
            pv in 0u32..10_000_000,
            rate_bp in 0u32..3_000,
            years_tenths in 0u32..500,
            extra_tenths in 0u32..100
        ) {
            let rate = rate_bp as f64 / 100.0;
            let y1 = years_tenths as f64 / 10.0;
            let y2 = y1 + extra_tenths as f64 / 10.0;
            let a = future_value_lump_sum(pv as f64, rate, y1);
            let b = future_value_lump_sum(pv as f64, rate, y2);
            prop_assert!(b + 1e-6 >= a);
        }

        #[test]
        fn prop_loan_fully_amortizes(
            principal in 1_000u32..50_000_000,
            rate_bp in 0u32..2_500,
            years in 1u32..41
        ) {
            let rate = rate_bp as f64 / 100.0;
            let n = loan_months(years as f64);
            let p = principal as f64;
            let start = loan_outstanding(p, rate, years as f64, 0);
            let end = loan_outstanding(p, rate, years as f64, n);
            prop_assert!((start - p).abs() <= p * 1e-9);
            prop_assert!(end.abs() <= p * 1e-9);
        }

        #[test]
        fn prop_outstanding_never_increases(
            principal in 1_000u32..5_000_000,
            rate_bp in 0u32..2_000,
            years in 1u32..31,
            k in 0u32..360
        ) {
            let rate = rate_bp as f64 / 100.0;
            let p = principal as f64;
            let before = loan_outstanding(p, rate, years as f64, k);
            let after = loan_outstanding(p, rate, years as f64, k + 1);
            prop_assert!(after <= before + 1e-6);
        }
    }
}
