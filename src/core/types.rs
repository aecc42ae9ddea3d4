use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Compounding {
    Yearly,
    HalfYearly,
    #[default]
    Quarterly,
    Monthly,
}

impl Compounding {
    pub fn per_year(self) -> u32 {
        match self {
            Compounding::Yearly => 1,
            Compounding::HalfYearly => 2,
            Compounding::Quarterly => 4,
            Compounding::Monthly => 12,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SipMode {
    /// Project the future value of a given contribution.
    Project,
    /// Solve for the contribution that reaches a target amount.
    Target,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TargetType {
    Corpus,
    Pension,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NpsMode {
    Contribution,
    Target,
}

// Amounts are in currency units, rates in annual percent, durations in years
// unless a field name says otherwise.

#[derive(Debug, Clone, Copy)]
pub struct LumpsumParams {
    pub amount: f64,
    pub rate_pct: f64,
    pub years: f64,
    pub inflation_pct: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct FdParams {
    pub principal: f64,
    pub rate_pct: f64,
    pub years: f64,
    pub compounding: Compounding,
}

#[derive(Debug, Clone, Copy)]
pub struct RdParams {
    pub monthly_deposit: f64,
    pub rate_pct: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct SsyParams {
    pub yearly_contribution: f64,
    pub rate_pct: f64,
    pub maturity_years: u32,
    pub contrib_years: u32,
    pub initial: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PpfParams {
    pub yearly_contribution: f64,
    pub rate_pct: f64,
    pub years: f64,
    pub initial: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct EpfParams {
    /// Monthly basic salary in the first year.
    pub starting_basic: f64,
    pub salary_growth_pct: f64,
    pub employee_pct: f64,
    pub employer_pct: f64,
    pub epf_rate_pct: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct LoanParams {
    pub principal: f64,
    pub rate_pct: f64,
    pub years: f64,
    pub payments_made: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct SipParams {
    pub mode: SipMode,
    pub monthly_contribution: f64,
    /// Only read in [`SipMode::Target`].
    pub target_amount: f64,
    pub rate_pct: f64,
    pub years: f64,
    pub inflation_pct: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct MfParams {
    pub current_corpus: f64,
    pub monthly_contribution: f64,
    pub rate_pct: f64,
    pub years: f64,
    pub inflation_pct: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct SwpParams {
    pub initial_corpus: f64,
    pub monthly_withdrawal: f64,
    pub rate_pct: f64,
    pub years: f64,
    pub inflation_pct: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct NpsInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    /// Calendar year of projection year 0.
    pub start_year: i32,
    pub current_corpus: f64,
    pub expected_return_pct: f64,
    pub inflation_pct: f64,
    pub monthly_contribution: f64,
    /// Step-up applied to the monthly contribution once per year.
    pub contribution_growth_pct: f64,
    pub target_corpus: f64,
    pub target_monthly_pension: f64,
    /// Annual annuity yield at retirement.
    pub annuity_rate_pct: f64,
    /// Share of the corpus annuitized at retirement.
    pub annuity_share_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPoint {
    pub year: u32,
    pub value: f64,
    pub real_value: f64,
    pub invested: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthResult {
    pub maturity_value: f64,
    pub invested: f64,
    pub gains: f64,
    pub series: Vec<YearPoint>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpfYearPoint {
    pub year: u32,
    pub basic_salary: f64,
    pub monthly_contribution: f64,
    pub total_contributed: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpfResult {
    pub balance: f64,
    pub total_contributed: f64,
    pub interest_earned: f64,
    pub series: Vec<EpfYearPoint>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub emi: f64,
    pub months: u32,
    pub total_payment: f64,
    pub total_interest: f64,
    pub payments_made: u32,
    pub outstanding: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub year: u32,
    pub payments_made: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub summary: LoanSummary,
    pub schedule: Vec<AmortizationRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub monthly_contribution: f64,
    pub invested: f64,
    pub future_value: f64,
    pub gains: f64,
    pub series: Vec<YearPoint>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MfYearPoint {
    pub year: u32,
    pub lumpsum_value: f64,
    pub sip_value: f64,
    pub total: f64,
    pub real_value: f64,
    pub invested: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MfResult {
    pub future_value: f64,
    pub lumpsum_value: f64,
    pub sip_value: f64,
    pub invested: f64,
    pub gains: f64,
    pub series: Vec<MfYearPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpMonthPoint {
    pub month: u32,
    pub year: u32,
    pub value: f64,
    pub real_value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpResult {
    pub final_corpus: f64,
    pub depleted: bool,
    /// First month the corpus reached zero.
    pub depletion_month: Option<u32>,
    pub depletion_year: Option<u32>,
    pub total_withdrawn: f64,
    pub monthly: Vec<SwpMonthPoint>,
    pub yearly: Vec<SwpMonthPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsPoint {
    pub age: u32,
    pub year: i32,
    pub corpus: f64,
    pub real_value: f64,
    /// Monthly contribution level after this year's step-up.
    pub contribution: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsProjection {
    pub points: Vec<NpsPoint>,
    pub projected_corpus: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsPlan {
    pub effective_target_corpus: f64,
    pub required_contribution: Option<f64>,
    pub contribution_used: f64,
    pub projected_corpus: f64,
    pub projected_real_value: f64,
    pub progress_pct: f64,
    pub projection: Vec<NpsPoint>,
}
