mod engine;
mod formulas;
mod rates;
pub mod registry;
mod solver;
mod types;

pub use engine::{
    amortization_schedule, build_projection, epf_growth, fd_growth, future_value_epf,
    future_value_rd, future_value_ssy, loan_growth, loan_summary, lumpsum_growth, mf_growth,
    ppf_growth, rd_growth, simulate_swp, sip_growth, ssy_growth, swp_final_corpus,
};
pub use formulas::{
    future_value_fd, future_value_lump_sum, future_value_mf, future_value_ppf, future_value_sip,
    loan_emi, loan_months, loan_outstanding,
};
pub use rates::{RATE_EPSILON, annuity_factor_monthly, month_count, monthly_rate, real_value};
pub use solver::{
    effective_target_corpus, plan_nps, plan_sip, required_monthly_contribution,
    sip_required_for_target,
};
pub use types::{
    AmortizationRow, Compounding, EpfParams, EpfResult, EpfYearPoint, FdParams, GrowthResult,
    LoanParams, LoanResult, LoanSummary, LumpsumParams, MfParams, MfResult, MfYearPoint,
    NpsInputs, NpsMode, NpsPlan, NpsPoint, NpsProjection, PpfParams, RdParams, SipMode,
    SipParams, SipResult, SsyParams, SwpMonthPoint, SwpParams, SwpResult, TargetType, YearPoint,
};
