use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{
    self, Compounding, EpfParams, EpfResult, FdParams, GrowthResult, LoanParams, LoanResult,
    LumpsumParams, MfParams, MfResult, NpsInputs, NpsMode, NpsPlan, PpfParams, RdParams, SipMode,
    SipParams, SipResult, SsyParams, SwpParams, SwpResult, TargetType,
};
use crate::error::{FincalcError, Result};

/// A calculator reachable over HTTP or the command line. Missing payload
/// fields fall back to the calculator's defaults.
pub trait CalculatorPayload: DeserializeOwned + Default + std::fmt::Debug + Send + 'static {
    const SLUG: &'static str;
    type Output: Serialize + Send;

    fn evaluate(self) -> Result<Self::Output>;
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    if !value.is_finite() || value < min || value > max {
        return Err(FincalcError::invalid(
            field,
            format!("must be between {min} and {max}"),
        ));
    }
    Ok(value)
}

fn check_amount(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(FincalcError::invalid(field, "must be a finite amount >= 0"));
    }
    Ok(value)
}

fn check_years(field: &str, value: u32, min: u32, max: u32) -> Result<u32> {
    if !(min..=max).contains(&value) {
        return Err(FincalcError::invalid(
            field,
            format!("must be between {min} and {max}"),
        ));
    }
    Ok(value)
}

/// Inflation only enters a chart when the caller asks for real values.
fn chart_inflation(inflation_adjusted: bool, inflation_pct: f64) -> f64 {
    if inflation_adjusted { inflation_pct } else { 0.0 }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiCompounding {
    #[serde(alias = "annual", alias = "annually")]
    Yearly,
    #[serde(alias = "halfyearly", alias = "halfYearly", alias = "half_yearly")]
    HalfYearly,
    Quarterly,
    Monthly,
}

impl From<ApiCompounding> for Compounding {
    fn from(value: ApiCompounding) -> Self {
        match value {
            ApiCompounding::Yearly => Compounding::Yearly,
            ApiCompounding::HalfYearly => Compounding::HalfYearly,
            ApiCompounding::Quarterly => Compounding::Quarterly,
            ApiCompounding::Monthly => Compounding::Monthly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiSipMode {
    Project,
    Target,
}

impl From<ApiSipMode> for SipMode {
    fn from(value: ApiSipMode) -> Self {
        match value {
            ApiSipMode::Project => SipMode::Project,
            ApiSipMode::Target => SipMode::Target,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiNpsMode {
    #[serde(alias = "project")]
    Contribution,
    #[serde(alias = "find-contribution", alias = "findContribution")]
    Target,
}

impl From<ApiNpsMode> for NpsMode {
    fn from(value: ApiNpsMode) -> Self {
        match value {
            ApiNpsMode::Contribution => NpsMode::Contribution,
            ApiNpsMode::Target => NpsMode::Target,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiTargetType {
    Corpus,
    Pension,
}

impl From<ApiTargetType> for TargetType {
    fn from(value: ApiTargetType) -> Self {
        match value {
            ApiTargetType::Corpus => TargetType::Corpus,
            ApiTargetType::Pension => TargetType::Pension,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmiPayload {
    pub principal: Option<f64>,
    pub rate: Option<f64>,
    pub years: Option<f64>,
    pub months_paid: Option<u32>,
}

impl EmiPayload {
    pub fn into_params(self) -> Result<LoanParams> {
        let principal = check_amount("principal", self.principal.unwrap_or(2_000_000.0))?;
        let rate_pct = check_range("rate", self.rate.unwrap_or(9.0), 4.0, 18.0)?;
        let years = check_range("years", self.years.unwrap_or(20.0), 1.0, 40.0)?;
        let months = core::loan_months(years);
        let payments_made = self.months_paid.unwrap_or(0);
        if payments_made > months {
            return Err(FincalcError::invalid(
                "monthsPaid",
                format!("must be between 0 and {months}"),
            ));
        }
        Ok(LoanParams {
            principal,
            rate_pct,
            years,
            payments_made,
        })
    }
}

impl CalculatorPayload for EmiPayload {
    const SLUG: &'static str = "emi";
    type Output = LoanResult;

    fn evaluate(self) -> Result<LoanResult> {
        Ok(core::loan_growth(&self.into_params()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FdPayload {
    pub principal: Option<f64>,
    pub rate: Option<f64>,
    pub years: Option<f64>,
    pub compounding: Option<ApiCompounding>,
}

impl FdPayload {
    pub fn into_params(self) -> Result<FdParams> {
        Ok(FdParams {
            principal: check_amount("principal", self.principal.unwrap_or(200_000.0))?,
            rate_pct: check_range("rate", self.rate.unwrap_or(7.0), 3.0, 12.0)?,
            years: check_range("years", self.years.unwrap_or(5.0), 0.25, 20.0)?,
            compounding: self.compounding.map(Compounding::from).unwrap_or_default(),
        })
    }
}

impl CalculatorPayload for FdPayload {
    const SLUG: &'static str = "fd";
    type Output = GrowthResult;

    fn evaluate(self) -> Result<GrowthResult> {
        Ok(core::fd_growth(&self.into_params()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RdPayload {
    pub monthly_deposit: Option<f64>,
    pub rate: Option<f64>,
    pub years: Option<f64>,
}

impl RdPayload {
    pub fn into_params(self) -> Result<RdParams> {
        Ok(RdParams {
            monthly_deposit: check_amount(
                "monthlyDeposit",
                self.monthly_deposit.unwrap_or(10_000.0),
            )?,
            rate_pct: check_range("rate", self.rate.unwrap_or(7.0), 3.0, 12.0)?,
            years: check_range("years", self.years.unwrap_or(5.0), 1.0, 15.0)?,
        })
    }
}

impl CalculatorPayload for RdPayload {
    const SLUG: &'static str = "rd";
    type Output = GrowthResult;

    fn evaluate(self) -> Result<GrowthResult> {
        Ok(core::rd_growth(&self.into_params()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SsyPayload {
    pub yearly_contribution: Option<f64>,
    pub rate: Option<f64>,
    pub maturity_years: Option<u32>,
    pub contrib_years: Option<u32>,
    pub initial: Option<f64>,
}

impl SsyPayload {
    pub fn into_params(self) -> Result<SsyParams> {
        let maturity_years = check_years("maturityYears", self.maturity_years.unwrap_or(21), 1, 30)?;
        let contrib_years = check_years(
            "contribYears",
            self.contrib_years.unwrap_or(15),
            1,
            maturity_years,
        )?;
        Ok(SsyParams {
            yearly_contribution: check_amount(
                "yearlyContribution",
                self.yearly_contribution.unwrap_or(50_000.0),
            )?,
            rate_pct: check_range("rate", self.rate.unwrap_or(8.0), 6.0, 10.0)?,
            maturity_years,
            contrib_years,
            initial: check_amount("initial", self.initial.unwrap_or(0.0))?,
        })
    }
}

impl CalculatorPayload for SsyPayload {
    const SLUG: &'static str = "ssy";
    type Output = GrowthResult;

    fn evaluate(self) -> Result<GrowthResult> {
        Ok(core::ssy_growth(&self.into_params()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PpfPayload {
    pub yearly_contribution: Option<f64>,
    pub rate: Option<f64>,
    pub years: Option<f64>,
    pub initial: Option<f64>,
}

impl PpfPayload {
    pub fn into_params(self) -> Result<PpfParams> {
        Ok(PpfParams {
            yearly_contribution: check_amount(
                "yearlyContribution",
                self.yearly_contribution.unwrap_or(150_000.0),
            )?,
            rate_pct: check_range("rate", self.rate.unwrap_or(7.1), 6.0, 9.0)?,
            years: check_range("years", self.years.unwrap_or(15.0), 1.0, 25.0)?,
            initial: check_amount("initial", self.initial.unwrap_or(0.0))?,
        })
    }
}

impl CalculatorPayload for PpfPayload {
    const SLUG: &'static str = "ppf";
    type Output = GrowthResult;

    fn evaluate(self) -> Result<GrowthResult> {
        Ok(core::ppf_growth(&self.into_params()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpfPayload {
    pub starting_basic: Option<f64>,
    pub annual_growth: Option<f64>,
    pub employee_pct: Option<f64>,
    pub employer_pct: Option<f64>,
    pub epf_rate: Option<f64>,
    pub years: Option<u32>,
}

impl EpfPayload {
    pub fn into_params(self) -> Result<EpfParams> {
        Ok(EpfParams {
            starting_basic: check_amount("startingBasic", self.starting_basic.unwrap_or(30_000.0))?,
            salary_growth_pct: check_range(
                "annualGrowth",
                self.annual_growth.unwrap_or(7.0),
                0.0,
                20.0,
            )?,
            employee_pct: check_range("employeePct", self.employee_pct.unwrap_or(12.0), 0.0, 20.0)?,
            employer_pct: check_range("employerPct", self.employer_pct.unwrap_or(12.0), 0.0, 20.0)?,
            epf_rate_pct: check_range("epfRate", self.epf_rate.unwrap_or(8.25), 6.0, 10.0)?,
            years: check_years("years", self.years.unwrap_or(20), 1, 40)?,
        })
    }
}

impl CalculatorPayload for EpfPayload {
    const SLUG: &'static str = "epf";
    type Output = EpfResult;

    fn evaluate(self) -> Result<EpfResult> {
        Ok(core::epf_growth(&self.into_params()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SipPayload {
    pub mode: Option<ApiSipMode>,
    pub monthly_contribution: Option<f64>,
    pub target_amount: Option<f64>,
    pub expected_return: Option<f64>,
    pub years: Option<f64>,
    pub inflation: Option<f64>,
    pub inflation_adjusted: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResponse {
    pub mode: ApiSipMode,
    #[serde(flatten)]
    pub result: SipResult,
}

impl SipPayload {
    pub fn into_params(self) -> Result<SipParams> {
        let inflation = check_range("inflation", self.inflation.unwrap_or(6.0), 0.0, 12.0)?;
        Ok(SipParams {
            mode: self.mode.unwrap_or(ApiSipMode::Project).into(),
            monthly_contribution: check_amount(
                "monthlyContribution",
                self.monthly_contribution.unwrap_or(10_000.0),
            )?,
            target_amount: check_amount("targetAmount", self.target_amount.unwrap_or(2_500_000.0))?,
            rate_pct: check_range("expectedReturn", self.expected_return.unwrap_or(12.0), 4.0, 20.0)?,
            years: check_range("years", self.years.unwrap_or(10.0), 1.0, 50.0)?,
            inflation_pct: chart_inflation(self.inflation_adjusted.unwrap_or(false), inflation),
        })
    }
}

impl CalculatorPayload for SipPayload {
    const SLUG: &'static str = "sip";
    type Output = SipResponse;

    fn evaluate(self) -> Result<SipResponse> {
        let mode = self.mode.unwrap_or(ApiSipMode::Project);
        let params = self.into_params()?;
        Ok(SipResponse {
            mode,
            result: core::plan_sip(&params),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LumpsumPayload {
    pub amount: Option<f64>,
    pub expected_return: Option<f64>,
    pub years: Option<f64>,
    pub inflation: Option<f64>,
    pub inflation_adjusted: Option<bool>,
}

impl LumpsumPayload {
    pub fn into_params(self) -> Result<LumpsumParams> {
        let inflation = check_range("inflation", self.inflation.unwrap_or(6.0), 0.0, 12.0)?;
        Ok(LumpsumParams {
            amount: check_amount("amount", self.amount.unwrap_or(100_000.0))?,
            rate_pct: check_range("expectedReturn", self.expected_return.unwrap_or(12.0), 2.0, 20.0)?,
            years: check_range("years", self.years.unwrap_or(10.0), 1.0, 50.0)?,
            inflation_pct: chart_inflation(self.inflation_adjusted.unwrap_or(false), inflation),
        })
    }
}

impl CalculatorPayload for LumpsumPayload {
    const SLUG: &'static str = "lumpsum";
    type Output = GrowthResult;

    fn evaluate(self) -> Result<GrowthResult> {
        Ok(core::lumpsum_growth(&self.into_params()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MfPayload {
    pub current_corpus: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub expected_return: Option<f64>,
    pub years: Option<f64>,
    pub inflation: Option<f64>,
    pub inflation_adjusted: Option<bool>,
}

impl MfPayload {
    pub fn into_params(self) -> Result<MfParams> {
        let inflation = check_range("inflation", self.inflation.unwrap_or(6.0), 0.0, 12.0)?;
        Ok(MfParams {
            current_corpus: check_amount("currentCorpus", self.current_corpus.unwrap_or(500_000.0))?,
            monthly_contribution: check_amount(
                "monthlyContribution",
                self.monthly_contribution.unwrap_or(10_000.0),
            )?,
            rate_pct: check_range("expectedReturn", self.expected_return.unwrap_or(12.0), 4.0, 20.0)?,
            years: check_range("years", self.years.unwrap_or(10.0), 1.0, 50.0)?,
            inflation_pct: chart_inflation(self.inflation_adjusted.unwrap_or(false), inflation),
        })
    }
}

impl CalculatorPayload for MfPayload {
    const SLUG: &'static str = "mf";
    type Output = MfResult;

    fn evaluate(self) -> Result<MfResult> {
        Ok(core::mf_growth(&self.into_params()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwpPayload {
    pub initial_corpus: Option<f64>,
    pub monthly_withdrawal: Option<f64>,
    pub expected_return: Option<f64>,
    pub years: Option<f64>,
    pub inflation: Option<f64>,
    pub inflation_adjusted: Option<bool>,
}

impl SwpPayload {
    pub fn into_params(self) -> Result<SwpParams> {
        let inflation = check_range("inflation", self.inflation.unwrap_or(6.0), 0.0, 12.0)?;
        Ok(SwpParams {
            initial_corpus: check_amount("initialCorpus", self.initial_corpus.unwrap_or(1_000_000.0))?,
            monthly_withdrawal: check_amount(
                "monthlyWithdrawal",
                self.monthly_withdrawal.unwrap_or(15_000.0),
            )?,
            rate_pct: check_range("expectedReturn", self.expected_return.unwrap_or(10.0), 4.0, 20.0)?,
            years: check_range("years", self.years.unwrap_or(10.0), 1.0, 50.0)?,
            inflation_pct: chart_inflation(self.inflation_adjusted.unwrap_or(false), inflation),
        })
    }
}

impl CalculatorPayload for SwpPayload {
    const SLUG: &'static str = "swp";
    type Output = SwpResult;

    fn evaluate(self) -> Result<SwpResult> {
        Ok(core::simulate_swp(&self.into_params()?))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NpsPayload {
    pub calculation_mode: Option<ApiNpsMode>,
    pub target_type: Option<ApiTargetType>,
    pub inflation_adjusted: Option<bool>,
    pub current_age: Option<u32>,
    pub retirement_age: Option<u32>,
    pub start_year: Option<i32>,
    pub current_corpus: Option<f64>,
    pub expected_return: Option<f64>,
    pub inflation: Option<f64>,
    pub monthly_contribution: Option<f64>,
    pub contribution_growth: Option<f64>,
    pub target_corpus: Option<f64>,
    pub target_monthly_pension: Option<f64>,
    pub annuity_rate: Option<f64>,
    pub annuity_share: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsResponse {
    pub calculation_mode: ApiNpsMode,
    pub target_type: ApiTargetType,
    pub inflation_adjusted: bool,
    #[serde(flatten)]
    pub plan: NpsPlan,
}

pub const MAX_RETIREMENT_AGE: u32 = 100;
pub const MIN_START_YEAR: i32 = 1900;
pub const MAX_START_YEAR: i32 = 3000;

impl NpsPayload {
    pub fn into_inputs(self) -> Result<NpsInputs> {
        let current_age = self.current_age.unwrap_or(30);
        let retirement_age = self.retirement_age.unwrap_or(60);
        if retirement_age < current_age {
            return Err(FincalcError::invalid(
                "retirementAge",
                "must be >= currentAge",
            ));
        }
        if retirement_age > MAX_RETIREMENT_AGE {
            return Err(FincalcError::invalid(
                "retirementAge",
                format!("must be <= {MAX_RETIREMENT_AGE}"),
            ));
        }
        let start_year = self
            .start_year
            .unwrap_or_else(|| chrono::Local::now().year());
        if !(MIN_START_YEAR..=MAX_START_YEAR).contains(&start_year) {
            return Err(FincalcError::invalid(
                "startYear",
                format!("must be between {MIN_START_YEAR} and {MAX_START_YEAR}"),
            ));
        }
        Ok(NpsInputs {
            current_age,
            retirement_age,
            start_year,
            current_corpus: check_amount("currentCorpus", self.current_corpus.unwrap_or(500_000.0))?,
            expected_return_pct: check_range(
                "expectedReturn",
                self.expected_return.unwrap_or(12.0),
                6.0,
                18.0,
            )?,
            inflation_pct: check_range("inflation", self.inflation.unwrap_or(6.0), 3.0, 10.0)?,
            monthly_contribution: check_amount(
                "monthlyContribution",
                self.monthly_contribution.unwrap_or(10_000.0),
            )?,
            contribution_growth_pct: check_range(
                "contributionGrowth",
                self.contribution_growth.unwrap_or(5.0),
                0.0,
                15.0,
            )?,
            target_corpus: check_amount("targetCorpus", self.target_corpus.unwrap_or(10_000_000.0))?,
            target_monthly_pension: check_amount(
                "targetMonthlyPension",
                self.target_monthly_pension.unwrap_or(50_000.0),
            )?,
            annuity_rate_pct: check_range("annuityRate", self.annuity_rate.unwrap_or(6.5), 4.0, 9.0)?,
            annuity_share_pct: check_range(
                "annuityShare",
                self.annuity_share.unwrap_or(40.0),
                40.0,
                100.0,
            )?,
        })
    }
}

impl CalculatorPayload for NpsPayload {
    const SLUG: &'static str = "nps";
    type Output = NpsResponse;

    fn evaluate(self) -> Result<NpsResponse> {
        let calculation_mode = self.calculation_mode.unwrap_or(ApiNpsMode::Contribution);
        let target_type = self.target_type.unwrap_or(ApiTargetType::Corpus);
        let inflation_adjusted = self.inflation_adjusted.unwrap_or(true);
        let inputs = self.into_inputs()?;
        let plan = core::plan_nps(
            &inputs,
            calculation_mode.into(),
            target_type.into(),
            inflation_adjusted,
        );
        Ok(NpsResponse {
            calculation_mode,
            target_type,
            inflation_adjusted,
            plan,
        })
    }
}

fn evaluate_json_as<P: CalculatorPayload>(json: &str) -> Result<serde_json::Value> {
    let payload: P = if json.trim().is_empty() {
        P::default()
    } else {
        serde_json::from_str(json)?
    };
    Ok(serde_json::to_value(payload.evaluate()?)?)
}

/// Runs the calculator named by `slug` on a JSON payload. An empty payload
/// means every field takes its default.
pub fn evaluate_json(slug: &str, json: &str) -> Result<serde_json::Value> {
    let info = core::registry::find(slug)
        .ok_or_else(|| FincalcError::UnknownCalculator(slug.to_string()))?;
    match info.slug {
        EmiPayload::SLUG => evaluate_json_as::<EmiPayload>(json),
        FdPayload::SLUG => evaluate_json_as::<FdPayload>(json),
        RdPayload::SLUG => evaluate_json_as::<RdPayload>(json),
        SsyPayload::SLUG => evaluate_json_as::<SsyPayload>(json),
        PpfPayload::SLUG => evaluate_json_as::<PpfPayload>(json),
        EpfPayload::SLUG => evaluate_json_as::<EpfPayload>(json),
        SipPayload::SLUG => evaluate_json_as::<SipPayload>(json),
        LumpsumPayload::SLUG => evaluate_json_as::<LumpsumPayload>(json),
        MfPayload::SLUG => evaluate_json_as::<MfPayload>(json),
        SwpPayload::SLUG => evaluate_json_as::<SwpPayload>(json),
        NpsPayload::SLUG => evaluate_json_as::<NpsPayload>(json),
        other => Err(FincalcError::UnknownCalculator(other.to_string())),
    }
}
