use serde::{Deserialize, Serialize};

use super::error::{ensure_finite, ensure_principal, ensure_rate, ensure_term, CalculatorError};

/// Inputs for a fully amortizing loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

impl LoanParameters {
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        term_months: u32,
    ) -> Result<Self, CalculatorError> {
        Ok(Self {
            principal: ensure_principal(principal)?,
            annual_rate_percent: ensure_rate(annual_rate_percent)?,
            term_months: ensure_term(term_months)?,
        })
    }
}

/// Payment totals derived from a set of loan parameters. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Converts an annual percentage rate into the monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Fixed monthly payment for a fully amortizing loan.
///
/// A zero rate degrades to straight-line repayment. The annuity factor is
/// evaluated as `r / (1 - (1 + r)^-n)` through `ln_1p`/`exp_m1`, which stays
/// finite for very long terms and accurate for very small rates.
pub fn monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<f64, CalculatorError> {
    let principal = ensure_principal(principal)?;
    let rate = monthly_rate(ensure_rate(annual_rate_percent)?);
    let term_months = ensure_term(term_months)?;

    if rate == 0.0 {
        return Ok(principal / f64::from(term_months));
    }

    let discount = -(-f64::from(term_months) * rate.ln_1p()).exp_m1();
    ensure_finite("monthly payment", principal * rate / discount)
}

pub fn calculate(params: &LoanParameters) -> Result<CalculationResult, CalculatorError> {
    let monthly_payment =
        monthly_payment(params.principal, params.annual_rate_percent, params.term_months)?;
    let total_paid = ensure_finite(
        "total paid",
        monthly_payment * f64::from(params.term_months),
    )?;

    Ok(CalculationResult {
        monthly_payment,
        total_paid,
        total_interest: total_paid - params.principal,
    })
}
