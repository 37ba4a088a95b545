/// Input rejected by one of the calculators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculatorError {
    #[error("principal must be a non-negative finite amount (got {0})")]
    InvalidPrincipal(f64),
    #[error("annual rate must be a non-negative finite percentage (got {0})")]
    InvalidRate(f64),
    #[error("term must be at least one month (got {0})")]
    InvalidTerm(u32),
    #[error("{field} must be a non-negative finite amount (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error("monthly payment must be a positive finite amount (got {0})")]
    InvalidPayment(f64),
    #[error("credit score {0} is outside the 300-850 range")]
    ScoreOutOfRange(u16),
    #[error("unknown credit bracket '{0}'")]
    UnknownBracket(String),
    #[error("unknown {kind} '{value}'")]
    UnknownOption { kind: &'static str, value: String },
    #[error("{0} is not a finite amount for these inputs")]
    NotFinite(&'static str),
    #[error("payoff would take {0} months, beyond the supported horizon")]
    PayoffTooLong(f64),
}

pub(crate) fn ensure_amount(field: &'static str, value: f64) -> Result<f64, CalculatorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalculatorError::InvalidAmount { field, value })
    }
}

pub(crate) fn ensure_principal(value: f64) -> Result<f64, CalculatorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalculatorError::InvalidPrincipal(value))
    }
}

pub(crate) fn ensure_rate(value: f64) -> Result<f64, CalculatorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CalculatorError::InvalidRate(value))
    }
}

pub(crate) fn ensure_term(value: u32) -> Result<u32, CalculatorError> {
    if value >= 1 {
        Ok(value)
    } else {
        Err(CalculatorError::InvalidTerm(value))
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, CalculatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculatorError::NotFinite(field))
    }
}
