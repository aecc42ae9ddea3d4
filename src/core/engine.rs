use super::formulas::{
    future_value_fd, future_value_lump_sum, future_value_ppf, future_value_sip, loan_emi,
    loan_months, loan_outstanding,
};
use super::rates::{annuity_factor_monthly, month_count, monthly_rate, real_value};
use super::types::{
    AmortizationRow, EpfParams, EpfResult, EpfYearPoint, FdParams, GrowthResult, LoanParams,
    LoanResult, LoanSummary, LumpsumParams, MfParams, MfResult, MfYearPoint, NpsInputs, NpsPoint,
    NpsProjection, PpfParams, RdParams, SipResult, SsyParams, SwpMonthPoint, SwpParams, SwpResult,
    YearPoint,
};

/// Whole years covered by a chart series; fractional tails are not plotted.
fn whole_years(years: f64) -> u32 {
    if !years.is_finite() || years <= 0.0 {
        return 0;
    }
    years.floor() as u32
}

fn growth_result(maturity_value: f64, invested: f64, series: Vec<YearPoint>) -> GrowthResult {
    GrowthResult {
        maturity_value,
        invested,
        gains: (maturity_value - invested).max(0.0),
        series,
    }
}

pub fn lumpsum_growth(params: &LumpsumParams) -> GrowthResult {
    let series = (0..=whole_years(params.years))
        .map(|y| {
            let value = future_value_lump_sum(params.amount, params.rate_pct, y as f64);
            YearPoint {
                year: y,
                value,
                real_value: real_value(value, params.inflation_pct, y),
                invested: params.amount,
            }
        })
        .collect();
    let fv = future_value_lump_sum(params.amount, params.rate_pct, params.years);
    growth_result(fv, params.amount, series)
}

pub fn fd_growth(params: &FdParams) -> GrowthResult {
    let per_year = params.compounding.per_year() as f64;
    let series = (0..=whole_years(params.years))
        .map(|y| {
            let value = future_value_fd(params.principal, params.rate_pct, y as f64, per_year);
            YearPoint {
                year: y,
                value,
                real_value: value,
                invested: params.principal,
            }
        })
        .collect();
    let fv = future_value_fd(params.principal, params.rate_pct, params.years, per_year);
    growth_result(fv, params.principal, series)
}

struct RdRun {
    balance: f64,
    year_ends: Vec<f64>,
}

/// Deposit at the start of each month, interest credited at its end.
fn simulate_rd(monthly_deposit: f64, annual_rate_pct: f64, years: f64) -> RdRun {
    let r = monthly_rate(annual_rate_pct);
    let months = month_count(years);
    let mut balance = 0.0;
    let mut year_ends = vec![0.0];
    for m in 1..=months {
        balance += monthly_deposit;
        balance *= 1.0 + r;
        if m % 12 == 0 {
            year_ends.push(balance);
        }
    }
    RdRun { balance, year_ends }
}

/// RD maturity from the month-by-month deposit simulation.
pub fn future_value_rd(monthly_deposit: f64, annual_rate_pct: f64, years: f64) -> f64 {
    simulate_rd(monthly_deposit, annual_rate_pct, years).balance
}

pub fn rd_growth(params: &RdParams) -> GrowthResult {
    let run = simulate_rd(params.monthly_deposit, params.rate_pct, params.years);
    let series = run
        .year_ends
        .iter()
        .enumerate()
        .map(|(y, &value)| YearPoint {
            year: y as u32,
            value,
            real_value: value,
            invested: params.monthly_deposit * 12.0 * y as f64,
        })
        .collect();
    let invested = params.monthly_deposit * 12.0 * params.years.max(0.0);
    growth_result(run.balance, invested, series)
}

pub fn ssy_growth(params: &SsyParams) -> GrowthResult {
    let r = params.rate_pct / 100.0;
    let mut balance = params.initial;
    let mut invested = params.initial;
    let mut series = Vec::with_capacity(params.maturity_years as usize + 1);
    series.push(YearPoint {
        year: 0,
        value: balance,
        real_value: balance,
        invested,
    });
    for y in 0..params.maturity_years {
        balance *= 1.0 + r;
        if y < params.contrib_years {
            balance += params.yearly_contribution;
            invested += params.yearly_contribution;
        }
        series.push(YearPoint {
            year: y + 1,
            value: balance,
            real_value: balance,
            invested,
        });
    }
    growth_result(balance, invested, series)
}

/// SSY maturity: yearly growth, then a deposit while inside the contribution window.
pub fn future_value_ssy(
    yearly_contribution: f64,
    annual_rate_pct: f64,
    maturity_years: u32,
    contrib_years: u32,
    initial: f64,
) -> f64 {
    ssy_growth(&SsyParams {
        yearly_contribution,
        rate_pct: annual_rate_pct,
        maturity_years,
        contrib_years,
        initial,
    })
    .maturity_value
}

pub fn ppf_growth(params: &PpfParams) -> GrowthResult {
    let series = (0..=whole_years(params.years))
        .map(|y| {
            let value = future_value_ppf(
                params.yearly_contribution,
                params.rate_pct,
                y as f64,
                params.initial,
            );
            YearPoint {
                year: y,
                value,
                real_value: value,
                invested: params.initial + params.yearly_contribution * y as f64,
            }
        })
        .collect();
    let fv = future_value_ppf(
        params.yearly_contribution,
        params.rate_pct,
        params.years,
        params.initial,
    );
    let invested = (params.initial + params.yearly_contribution * params.years.max(0.0)).max(0.0);
    growth_result(fv, invested, series)
}

/// Salary-linked EPF accumulation, compounded monthly at the EPF rate.
pub fn epf_growth(params: &EpfParams) -> EpfResult {
    let r = monthly_rate(params.epf_rate_pct);
    let contribution_share = (params.employee_pct + params.employer_pct) / 100.0;
    let mut basic = params.starting_basic;
    let mut balance = 0.0;
    let mut total_contributed = 0.0;
    let mut series = Vec::with_capacity(params.years as usize + 1);
    series.push(EpfYearPoint {
        year: 0,
        basic_salary: basic,
        monthly_contribution: contribution_share * basic,
        total_contributed,
        balance,
    });

    for y in 0..params.years {
        let monthly_contribution = contribution_share * basic;
        for _ in 0..12 {
            balance += monthly_contribution;
            balance *= 1.0 + r;
        }
        total_contributed += monthly_contribution * 12.0;
        series.push(EpfYearPoint {
            year: y + 1,
            basic_salary: basic,
            monthly_contribution,
            total_contributed,
            balance,
        });
        basic *= 1.0 + params.salary_growth_pct / 100.0;
    }

    EpfResult {
        balance,
        total_contributed,
        interest_earned: balance - total_contributed,
        series,
    }
}

/// EPF balance at the end of `years`.
pub fn future_value_epf(
    starting_basic: f64,
    salary_growth_pct: f64,
    employee_pct: f64,
    employer_pct: f64,
    epf_rate_pct: f64,
    years: u32,
) -> f64 {
    epf_growth(&EpfParams {
        starting_basic,
        salary_growth_pct,
        employee_pct,
        employer_pct,
        epf_rate_pct,
        years,
    })
    .balance
}

/// EMI, totals and the balance outstanding after the payments made so far.
pub fn loan_summary(params: &LoanParams) -> LoanSummary {
    let months = loan_months(params.years);
    let emi = loan_emi(params.principal, params.rate_pct, params.years);
    let total_payment = emi * months as f64;
    let payments_made = params.payments_made.min(months);
    LoanSummary {
        emi,
        months,
        total_payment,
        total_interest: total_payment - params.principal,
        payments_made,
        outstanding: loan_outstanding(
            params.principal,
            params.rate_pct,
            params.years,
            payments_made,
        ),
    }
}

/// Yearly amortization rows, starting with the undrawn balance at year 0.
pub fn amortization_schedule(params: &LoanParams) -> Vec<AmortizationRow> {
    let months = loan_months(params.years);
    let emi = loan_emi(params.principal, params.rate_pct, params.years);
    let loan_years = months.div_ceil(12);

    let mut rows = Vec::with_capacity(loan_years as usize + 1);
    rows.push(AmortizationRow {
        year: 0,
        payments_made: 0,
        principal_paid: 0.0,
        interest_paid: 0.0,
        closing_balance: params.principal,
    });

    let mut prev_k = 0;
    let mut prev_balance = params.principal;
    for year in 1..=loan_years {
        let k = (year * 12).min(months);
        let closing_balance = if k == months {
            0.0
        } else {
            loan_outstanding(params.principal, params.rate_pct, params.years, k)
        };
        let principal_paid = prev_balance - closing_balance;
        let interest_paid = (emi * (k - prev_k) as f64 - principal_paid).max(0.0);
        rows.push(AmortizationRow {
            year,
            payments_made: k,
            principal_paid,
            interest_paid,
            closing_balance,
        });
        prev_k = k;
        prev_balance = closing_balance;
    }
    rows
}

pub fn loan_growth(params: &LoanParams) -> LoanResult {
    LoanResult {
        summary: loan_summary(params),
        schedule: amortization_schedule(params),
    }
}

pub fn sip_growth(
    monthly_contribution: f64,
    annual_rate_pct: f64,
    years: f64,
    inflation_pct: f64,
) -> SipResult {
    let r = monthly_rate(annual_rate_pct);
    let series = (0..=whole_years(years))
        .map(|y| {
            let value = monthly_contribution * annuity_factor_monthly(r, y * 12);
            YearPoint {
                year: y,
                value,
                real_value: real_value(value, inflation_pct, y),
                invested: monthly_contribution * 12.0 * y as f64,
            }
        })
        .collect();
    let future_value = future_value_sip(monthly_contribution, annual_rate_pct, years);
    let invested = monthly_contribution * 12.0 * years.max(0.0);
    SipResult {
        monthly_contribution,
        invested,
        future_value,
        gains: (future_value - invested).max(0.0),
        series,
    }
}

pub fn mf_growth(params: &MfParams) -> MfResult {
    let r = monthly_rate(params.rate_pct);
    let series = (0..=whole_years(params.years))
        .map(|y| {
            let lumpsum_value =
                future_value_lump_sum(params.current_corpus, params.rate_pct, y as f64);
            let sip_value = params.monthly_contribution * annuity_factor_monthly(r, y * 12);
            let total = lumpsum_value + sip_value;
            MfYearPoint {
                year: y,
                lumpsum_value,
                sip_value,
                total,
                real_value: real_value(total, params.inflation_pct, y),
                invested: params.current_corpus + params.monthly_contribution * 12.0 * y as f64,
            }
        })
        .collect();

    let lumpsum_value =
        future_value_lump_sum(params.current_corpus, params.rate_pct, params.years);
    let sip_value = future_value_sip(params.monthly_contribution, params.rate_pct, params.years);
    let future_value = lumpsum_value + sip_value;
    let invested =
        params.current_corpus + params.monthly_contribution * 12.0 * params.years.max(0.0);
    MfResult {
        future_value,
        lumpsum_value,
        sip_value,
        invested,
        gains: (future_value - invested).max(0.0),
        series,
    }
}

/// Month-by-month withdrawal plan. The corpus grows, the withdrawal is taken,
/// and a negative balance is pinned at zero for every remaining month.
pub fn simulate_swp(params: &SwpParams) -> SwpResult {
    let r = monthly_rate(params.rate_pct);
    let months = month_count(params.years);
    let mut corpus = params.initial_corpus;
    let mut total_withdrawn = 0.0;
    let mut depletion_month = None;
    let mut monthly = Vec::with_capacity(months as usize + 1);

    for m in 0..=months {
        if m > 0 {
            let grown = corpus * (1.0 + r);
            total_withdrawn += params.monthly_withdrawal.min(grown.max(0.0));
            corpus = (grown - params.monthly_withdrawal).max(0.0);
        }
        if corpus <= 0.0 && depletion_month.is_none() {
            depletion_month = Some(m);
        }
        let year = m / 12;
        monthly.push(SwpMonthPoint {
            month: m,
            year,
            value: corpus,
            real_value: real_value(corpus, params.inflation_pct, year),
        });
    }

    let yearly = monthly.iter().filter(|p| p.month % 12 == 0).copied().collect();
    SwpResult {
        final_corpus: corpus,
        depleted: corpus <= 0.0,
        depletion_month,
        depletion_year: depletion_month.map(|m| m.div_ceil(12)),
        total_withdrawn,
        monthly,
        yearly,
    }
}

/// Corpus left after the last month of a withdrawal plan.
pub fn swp_final_corpus(
    initial_corpus: f64,
    monthly_withdrawal: f64,
    annual_rate_pct: f64,
    years: f64,
) -> f64 {
    simulate_swp(&SwpParams {
        initial_corpus,
        monthly_withdrawal,
        rate_pct: annual_rate_pct,
        years,
        inflation_pct: 0.0,
    })
    .final_corpus
}

/// Year-by-year NPS corpus with monthly contributions and an annual step-up.
pub fn build_projection(inputs: &NpsInputs, inflation_adjusted: bool) -> NpsProjection {
    let years = inputs.retirement_age.saturating_sub(inputs.current_age);
    let r = monthly_rate(inputs.expected_return_pct);
    let inflation_pct = if inflation_adjusted {
        inputs.inflation_pct
    } else {
        0.0
    };

    let mut points = Vec::with_capacity(years as usize + 1);
    let mut corpus = inputs.current_corpus;
    let mut monthly_contribution = inputs.monthly_contribution;

    for i in 0..=years {
        if i > 0 {
            for _ in 0..12 {
                corpus += monthly_contribution;
                corpus *= 1.0 + r;
            }
            monthly_contribution *= 1.0 + inputs.contribution_growth_pct / 100.0;
        }
        points.push(NpsPoint {
            age: inputs.current_age + i,
            year: inputs.start_year.saturating_add_unsigned(i),
            corpus,
            real_value: real_value(corpus, inflation_pct, i),
            contribution: monthly_contribution,
        });
    }

    let projected_corpus = points.last().map(|p| p.corpus).unwrap_or(0.0);
    NpsProjection {
        points,
        projected_corpus,
    }
}
