use serde::{Deserialize, Serialize};

use super::amortization::monthly_rate;
use super::bracket::CreditBracket;
use super::error::{ensure_amount, ensure_rate, CalculatorError};
use super::rates::{lookup, ProductTerms, ProductType};

/// Outcome of paying a revolving balance down with a fixed payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoffOutcome {
    Finite { months: u32, total_interest: f64 },
    /// The payment does not exceed the first month's interest charge.
    NeverPaysOff { monthly_interest: f64 },
}

impl PayoffOutcome {
    pub fn months(&self) -> Option<u32> {
        match self {
            PayoffOutcome::Finite { months, .. } => Some(*months),
            PayoffOutcome::NeverPaysOff { .. } => None,
        }
    }

    pub fn total_interest(&self) -> Option<f64> {
        match self {
            PayoffOutcome::Finite { total_interest, .. } => Some(*total_interest),
            PayoffOutcome::NeverPaysOff { .. } => None,
        }
    }
}

/// Months needed to clear `balance` paying `monthly_payment` each month.
///
/// Interest is charged monthly at `apr_percent / 12`. Total interest is
/// `monthly_payment * months - balance`, counting the final month as a full
/// payment.
pub fn payoff_months(
    balance: f64,
    apr_percent: f64,
    monthly_payment: f64,
) -> Result<PayoffOutcome, CalculatorError> {
    let balance = ensure_amount("balance", balance)?;
    let rate = monthly_rate(ensure_rate(apr_percent)?);
    if !monthly_payment.is_finite() || monthly_payment <= 0.0 {
        return Err(CalculatorError::InvalidPayment(monthly_payment));
    }

    if balance == 0.0 {
        return Ok(PayoffOutcome::Finite {
            months: 0,
            total_interest: 0.0,
        });
    }

    let monthly_interest = balance * rate;
    if monthly_payment <= monthly_interest {
        return Ok(PayoffOutcome::NeverPaysOff { monthly_interest });
    }

    let exact_months = if rate == 0.0 {
        balance / monthly_payment
    } else {
        // 1 - B*r/P is in (0, 1) once the guard above has passed.
        -(1.0 - monthly_interest / monthly_payment).ln() / rate.ln_1p()
    };
    let months = whole_months(exact_months.ceil())?;

    Ok(PayoffOutcome::Finite {
        months,
        total_interest: monthly_payment * f64::from(months) - balance,
    })
}

fn whole_months(months: f64) -> Result<u32, CalculatorError> {
    if months.is_finite() && months <= f64::from(u32::MAX) {
        Ok(months as u32)
    } else {
        Err(CalculatorError::PayoffTooLong(months))
    }
}

/// Minimum-due rule: a percentage of the balance with a fixed floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumPaymentPolicy {
    pub floor: f64,
    pub percent: f64,
}

impl Default for MinimumPaymentPolicy {
    fn default() -> Self {
        Self {
            floor: 25.0,
            percent: 0.02,
        }
    }
}

impl MinimumPaymentPolicy {
    pub fn minimum_payment(&self, balance: f64) -> f64 {
        self.floor.max(balance * self.percent)
    }
}

/// How the card holder pays each month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum PaymentStrategy {
    Minimum,
    Fixed(f64),
}

impl PaymentStrategy {
    pub fn payment_for(&self, balance: f64, policy: &MinimumPaymentPolicy) -> f64 {
        match self {
            PaymentStrategy::Minimum => policy.minimum_payment(balance),
            PaymentStrategy::Fixed(amount) => *amount,
        }
    }
}

/// Card terms for a bracket plus the payoff they imply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardQuote {
    pub bracket: CreditBracket,
    pub apr: f64,
    pub annual_fee: f64,
    pub credit_limit: f64,
    pub monthly_payment: f64,
    pub minimum_payment: f64,
    pub payoff: PayoffOutcome,
}

pub fn card_quote(
    bracket: CreditBracket,
    balance: f64,
    strategy: PaymentStrategy,
    policy: &MinimumPaymentPolicy,
) -> Result<CardQuote, CalculatorError> {
    let balance = ensure_amount("balance", balance)?;
    let (apr, annual_fee, credit_limit) = card_terms(bracket);
    let monthly_payment = strategy.payment_for(balance, policy);
    let payoff = payoff_months(balance, apr, monthly_payment)?;

    Ok(CardQuote {
        bracket,
        apr,
        annual_fee,
        credit_limit,
        monthly_payment,
        minimum_payment: policy.minimum_payment(balance),
        payoff,
    })
}

/// One quote per bracket, in the order given.
pub fn compare_card_payoff(
    balance: f64,
    strategy: PaymentStrategy,
    policy: &MinimumPaymentPolicy,
    brackets: &[CreditBracket],
) -> Result<Vec<CardQuote>, CalculatorError> {
    brackets
        .iter()
        .map(|bracket| card_quote(*bracket, balance, strategy, policy))
        .collect()
}

fn card_terms(bracket: CreditBracket) -> (f64, f64, f64) {
    match lookup(ProductType::CreditCard, bracket) {
        ProductTerms::Card {
            apr,
            annual_fee,
            credit_limit,
        } => (apr, annual_fee, credit_limit),
        ProductTerms::Loan { apr } => (apr, 0.0, 0.0),
        ProductTerms::Multiplier { .. } => (0.0, 0.0, 0.0),
    }
}
