/// Rates with an absolute value below this are treated as zero.
pub const RATE_EPSILON: f64 = 1e-10;

/// Effective monthly rate equivalent to an annual rate given in percent.
///
/// This is the true monthly-compounding equivalent `(1 + r)^(1/12) - 1`,
/// not `r / 12`.
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    let r_annual = annual_rate_pct / 100.0;
    (1.0 + r_annual).powf(1.0 / 12.0) - 1.0
}

/// Upper bound on any month or year count, so it fits an `i32` exponent.
pub const MAX_PERIODS: u32 = i32::MAX as u32;

/// Whole months in `years`, rounded to the nearest month, floored at zero
/// and capped at [`MAX_PERIODS`].
pub fn month_count(years: f64) -> u32 {
    if !years.is_finite() || years <= 0.0 {
        return 0;
    }
    ((years * 12.0).round() as u32).min(MAX_PERIODS)
}

/// `(1 + rate)^periods` for a period count that may exceed `i32::MAX`.
pub fn growth_factor(rate: f64, periods: u32) -> f64 {
    (1.0 + rate).powi(periods.min(MAX_PERIODS) as i32)
}

/// Future value factor of a level monthly payment over `n_months`.
pub fn annuity_factor_monthly(r_monthly: f64, n_months: u32) -> f64 {
    if n_months == 0 {
        return 0.0;
    }
    if r_monthly.abs() < RATE_EPSILON {
        return n_months as f64;
    }
    (growth_factor(r_monthly, n_months) - 1.0) / r_monthly
}

/// Deflates a nominal value by `year_index` years of inflation.
pub fn real_value(nominal: f64, inflation_pct: f64, year_index: u32) -> f64 {
    if inflation_pct == 0.0 {
        return nominal;
    }
    nominal / growth_factor(inflation_pct / 100.0, year_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn monthly_rate_is_zero_for_zero_annual_rate() {
        assert_eq!(monthly_rate(0.0), 0.0);
    }

    #[test]
    fn twelve_monthly_steps_reproduce_annual_rate() {
        let r = monthly_rate(12.0);
        assert_approx((1.0 + r).powi(12), 1.12);
        assert!(r < 0.01);
    }

    #[test]
    fn month_count_rounds_and_floors() {
        assert_eq!(month_count(1.0), 12);
        assert_eq!(month_count(0.25), 3);
        assert_eq!(month_count(2.04), 24);
        assert_eq!(month_count(2.05), 25);
        assert_eq!(month_count(-3.0), 0);
        assert_eq!(month_count(f64::NAN), 0);
    }

    #[test]
    fn huge_tenures_stay_within_exponent_range() {
        assert_eq!(month_count(1e12), MAX_PERIODS);
        assert_eq!(month_count(f64::MAX), MAX_PERIODS);
        assert!(annuity_factor_monthly(1e-9, u32::MAX) > 0.0);
        assert_eq!(growth_factor(0.01, u32::MAX), growth_factor(0.01, MAX_PERIODS));
        assert!(real_value(100.0, 6.0, u32::MAX) >= 0.0);
    }

    #[test]
    fn annuity_factor_edge_cases() {
        assert_eq!(annuity_factor_monthly(0.01, 0), 0.0);
        assert_approx(annuity_factor_monthly(0.0, 36), 36.0);
        assert_approx(annuity_factor_monthly(1e-12, 36), 36.0);
        assert_approx(annuity_factor_monthly(0.01, 2), 2.01);
    }

    #[test]
    fn real_value_deflates_by_year_index() {
        assert_approx(real_value(121.0, 10.0, 2), 100.0);
        assert_approx(real_value(121.0, 0.0, 2), 121.0);
        assert_approx(real_value(121.0, 10.0, 0), 121.0);
    }
}
