use super::engine::{build_projection, sip_growth};
use super::rates::{annuity_factor_monthly, month_count, monthly_rate};
use super::types::{NpsInputs, NpsMode, NpsPlan, SipMode, SipParams, SipResult, TargetType};

/// Smallest annuity rate or share used when converting a pension goal.
const ANNUITY_FLOOR: f64 = 0.0001;

/// Flat monthly contribution that grows, alongside the current corpus, into
/// `target_fv`. Never negative.
///
/// When the annuity factor is not positive (no months to contribute) the raw
/// shortfall is returned undiscounted.
pub fn required_monthly_contribution(
    target_fv: f64,
    current_corpus: f64,
    annual_rate_pct: f64,
    years: f64,
) -> f64 {
    let r_annual = annual_rate_pct / 100.0;
    let r_monthly = monthly_rate(annual_rate_pct);
    let fv_current = current_corpus * (1.0 + r_annual).powf(years.max(0.0));
    let af = annuity_factor_monthly(r_monthly, month_count(years));
    let shortfall = target_fv - fv_current;
    if af <= 0.0 {
        return shortfall.max(0.0);
    }
    (shortfall / af).max(0.0)
}

pub fn sip_required_for_target(
    target_fv: f64,
    current_corpus: f64,
    annual_rate_pct: f64,
    years: f64,
) -> f64 {
    required_monthly_contribution(target_fv, current_corpus, annual_rate_pct, years)
}

/// Lump-sum corpus needed at retirement.
///
/// A pension goal is converted assuming only `annuity_share_pct` of the
/// corpus is annuitized and that slice yields `annuity_rate_pct` a year.
pub fn effective_target_corpus(
    target_type: TargetType,
    target_corpus: f64,
    target_monthly_pension: f64,
    annuity_rate_pct: f64,
    annuity_share_pct: f64,
) -> f64 {
    match target_type {
        TargetType::Corpus => target_corpus.max(0.0),
        TargetType::Pension => {
            let rate = (annuity_rate_pct / 100.0).max(ANNUITY_FLOOR);
            let share = (annuity_share_pct / 100.0).max(ANNUITY_FLOOR);
            target_monthly_pension.max(0.0) * 12.0 / (rate * share)
        }
    }
}

/// SIP projection. In target mode the contribution is solved with no
/// starting corpus and rounded to a whole currency unit before projecting.
pub fn plan_sip(params: &SipParams) -> SipResult {
    let monthly_contribution = match params.mode {
        SipMode::Project => params.monthly_contribution,
        SipMode::Target => {
            sip_required_for_target(params.target_amount, 0.0, params.rate_pct, params.years)
                .round()
        }
    };
    sip_growth(
        monthly_contribution,
        params.rate_pct,
        params.years,
        params.inflation_pct,
    )
}

/// NPS plan for either mode.
///
/// Target mode solves a flat contribution that ignores the step-up, then
/// projects with the step-up applied on top of it. The projected corpus
/// therefore overshoots the effective target whenever the step-up is
/// positive; callers see both numbers in the plan.
pub fn plan_nps(
    inputs: &NpsInputs,
    mode: NpsMode,
    target_type: TargetType,
    inflation_adjusted: bool,
) -> NpsPlan {
    let years = inputs.retirement_age.saturating_sub(inputs.current_age) as f64;
    let effective_target = effective_target_corpus(
        target_type,
        inputs.target_corpus,
        inputs.target_monthly_pension,
        inputs.annuity_rate_pct,
        inputs.annuity_share_pct,
    );

    let required_contribution = match mode {
        NpsMode::Contribution => None,
        NpsMode::Target => Some(required_monthly_contribution(
            effective_target,
            inputs.current_corpus,
            inputs.expected_return_pct,
            years,
        )),
    };

    let projection_inputs = NpsInputs {
        monthly_contribution: required_contribution.unwrap_or(inputs.monthly_contribution),
        ..*inputs
    };
    let projection = build_projection(&projection_inputs, inflation_adjusted);
    let projected_real_value = projection
        .points
        .last()
        .map(|p| p.real_value)
        .unwrap_or(0.0);

    let (progress_base, progress_target) = match mode {
        NpsMode::Contribution => (
            if inflation_adjusted {
                projected_real_value
            } else {
                projection.projected_corpus
            },
            inputs.target_corpus,
        ),
        NpsMode::Target => (inputs.current_corpus, effective_target),
    };
    let progress_pct = if progress_target > 0.0 {
        (progress_base / progress_target * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    NpsPlan {
        effective_target_corpus: effective_target,
        required_contribution,
        contribution_used: projection_inputs.monthly_contribution,
        projected_corpus: projection.projected_corpus,
        projected_real_value,
        progress_pct,
        projection: projection.points,
    }
}
