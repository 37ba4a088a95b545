use serde::{Deserialize, Serialize};

use super::amortization::{calculate, CalculationResult, LoanParameters};
use super::bracket::CreditBracket;
use super::error::CalculatorError;
use super::rates::LoanProduct;

/// Loan size and length; the rate comes from the bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: f64,
    pub term_months: u32,
}

impl LoanRequest {
    pub fn new(principal: f64, term_months: u32) -> Self {
        Self {
            principal,
            term_months,
        }
    }

    /// Request using the product's default term.
    pub fn with_default_term(product: LoanProduct, principal: f64) -> Self {
        Self::new(principal, product.default_term_months())
    }

    fn parameters(&self, apr: f64) -> Result<LoanParameters, CalculatorError> {
        LoanParameters::new(self.principal, apr, self.term_months)
    }
}

/// A bracket's result alongside its signed delta against the best bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub bracket: CreditBracket,
    pub apr: f64,
    pub result: CalculationResult,
    pub monthly_delta: f64,
    pub total_interest_delta: f64,
}

/// The caller's bracket priced next to the best available terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanQuote {
    pub product: LoanProduct,
    pub bracket: CreditBracket,
    pub apr: f64,
    pub result: CalculationResult,
    pub best: CalculationResult,
    /// Extra interest paid over the life of the loan versus the best bracket.
    pub extra_cost: f64,
}

impl LoanQuote {
    pub fn monthly_extra(&self) -> f64 {
        self.result.monthly_payment - self.best.monthly_payment
    }
}

fn price(
    product: LoanProduct,
    request: &LoanRequest,
    bracket: CreditBracket,
) -> Result<(f64, CalculationResult), CalculatorError> {
    let apr = product.apr(bracket);
    let result = calculate(&request.parameters(apr)?)?;
    Ok((apr, result))
}

/// One row per requested bracket, in the order given. Deltas are measured
/// against `Excellent` whether or not it is among `brackets`.
pub fn compare(
    product: LoanProduct,
    request: &LoanRequest,
    brackets: &[CreditBracket],
) -> Result<Vec<ComparisonRow>, CalculatorError> {
    let (_, best) = price(product, request, CreditBracket::BEST)?;

    brackets
        .iter()
        .map(|bracket| {
            let (apr, result) = price(product, request, *bracket)?;
            Ok(ComparisonRow {
                bracket: *bracket,
                apr,
                result,
                monthly_delta: result.monthly_payment - best.monthly_payment,
                total_interest_delta: result.total_interest - best.total_interest,
            })
        })
        .collect()
}

pub fn quote(
    product: LoanProduct,
    request: &LoanRequest,
    bracket: CreditBracket,
) -> Result<LoanQuote, CalculatorError> {
    let (_, best) = price(product, request, CreditBracket::BEST)?;
    let (apr, result) = price(product, request, bracket)?;

    Ok(LoanQuote {
        product,
        bracket,
        apr,
        result,
        best,
        extra_cost: result.total_interest - best.total_interest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excellent_is_never_more_expensive() {
        for product in [LoanProduct::Mortgage, LoanProduct::AutoNew, LoanProduct::AutoUsed] {
            for principal in [1_000.0, 27_500.0, 300_000.0] {
                let request = LoanRequest::with_default_term(product, principal);
                let rows = compare(product, &request, &CreditBracket::WORST_TO_BEST)
                    .expect("valid request");
                let best = rows
                    .iter()
                    .find(|row| row.bracket == CreditBracket::Excellent)
                    .expect("excellent row");
                for row in &rows {
                    assert!(row.result.monthly_payment >= best.result.monthly_payment);
                    assert!(row.monthly_delta >= 0.0);
                    assert!(row.total_interest_delta >= 0.0);
                }
                assert_eq!(best.monthly_delta, 0.0);
            }
        }
    }

    #[test]
    fn output_order_follows_input_order() {
        let request = LoanRequest::new(20_000.0, 48);
        let order = [CreditBracket::Good, CreditBracket::Poor];
        let rows = compare(LoanProduct::AutoNew, &request, &order).expect("valid request");
        let brackets: Vec<_> = rows.iter().map(|row| row.bracket).collect();
        assert_eq!(brackets, order);
        assert!(rows[1].monthly_delta > rows[0].monthly_delta);
    }

    #[test]
    fn comparison_is_bit_identical_across_calls() {
        let request = LoanRequest::new(412_000.0, 360);
        let first = compare(LoanProduct::Mortgage, &request, &CreditBracket::BEST_TO_WORST)
            .expect("valid request");
        let second = compare(LoanProduct::Mortgage, &request, &CreditBracket::BEST_TO_WORST)
            .expect("valid request");
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.result.monthly_payment.to_bits(), b.result.monthly_payment.to_bits());
        }
    }

    #[test]
    fn quote_reports_extra_cost_against_best() {
        let request = LoanRequest::with_default_term(LoanProduct::Mortgage, 300_000.0);
        let quote = quote(LoanProduct::Mortgage, &request, CreditBracket::Poor).expect("valid");
        assert_eq!(quote.apr, 7.5);
        assert!((quote.monthly_extra() - 337.38).abs() < 0.01);
        assert!((quote.extra_cost - quote.monthly_extra() * 360.0).abs() < 1e-6);
    }

    #[test]
    fn invalid_request_propagates() {
        let request = LoanRequest::new(10_000.0, 0);
        assert_eq!(
            compare(LoanProduct::AutoUsed, &request, &[CreditBracket::Fair]),
            Err(CalculatorError::InvalidTerm(0))
        );
    }
}
